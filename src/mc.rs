//! Rank-based Monte Carlo scoring of lineups.
//!
//! In every scenario, a lineup scores the sum of its members' projections. Scores are converted
//! to averaged ranks and inverted, so the best lineup in a scenario finishes first. The finishing
//! ranks accumulate into a [RankHistogram].
//!
//! Scenarios are independent of one another, so [Scorer::histogram_par] spreads them across the
//! rayon pool. Each worker fills its own histogram and the partial histograms are summed.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::debug;

use crate::histogram::RankHistogram;
use crate::lineup::Lineup;
use crate::matrix::Matrix;
use crate::rank::{invert, rank_averaged_into};
use crate::scenario::Scenarios;

const PROGRESS_INTERVAL: usize = 1_000;

/// Scratch buffers reused across scenarios.
#[derive(Debug)]
struct Workspace {
    scores: Vec<f64>,
    order: Vec<usize>,
    ranks: Vec<f64>,
}
impl Workspace {
    fn new(lineups: usize) -> Self {
        Self {
            scores: vec![0.0; lineups],
            order: vec![0; lineups],
            ranks: vec![0.0; lineups],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scorer<'a> {
    lineups: &'a [Lineup],
    scenarios: &'a Scenarios,
}
impl<'a> Scorer<'a> {
    pub fn new(lineups: &'a [Lineup], scenarios: &'a Scenarios) -> Self {
        debug_assert!(
            lineups
                .iter()
                .flat_map(Lineup::members)
                .all(|&member| member < scenarios.players()),
            "lineup member outside the {} projected players",
            scenarios.players()
        );
        Self { lineups, scenarios }
    }

    /// Score of every lineup in the given scenario.
    pub fn scores(&self, scenario: usize) -> Vec<f64> {
        let mut scores = vec![0.0; self.lineups.len()];
        self.score_into(scenario, &mut scores);
        scores
    }

    /// Finishing rank of every lineup in the given scenario, 1 being the best.
    pub fn ranks(&self, scenario: usize) -> Vec<f64> {
        let mut workspace = Workspace::new(self.lineups.len());
        self.rank_into(scenario, &mut workspace);
        workspace.ranks
    }

    /// Full rank matrix, one row per lineup and one column per scenario. Memory grows with the
    /// product of the two; prefer [Scorer::histogram] for large runs.
    pub fn rank_matrix(&self) -> Matrix<f64> {
        let mut matrix = Matrix::allocate(self.lineups.len(), self.scenarios.len());
        let mut workspace = Workspace::new(self.lineups.len());
        for scenario in 0..self.scenarios.len() {
            self.rank_into(scenario, &mut workspace);
            for (lineup, &rank) in workspace.ranks.iter().enumerate() {
                matrix[(lineup, scenario)] = rank;
            }
        }
        matrix
    }

    pub fn histogram(&self) -> RankHistogram {
        let mut histogram = RankHistogram::new(self.lineups.len());
        let mut workspace = Workspace::new(self.lineups.len());
        for scenario in 0..self.scenarios.len() {
            self.rank_into(scenario, &mut workspace);
            histogram.record(&workspace.ranks);
            self.report_progress(scenario + 1);
        }
        histogram
    }

    pub fn histogram_par(&self) -> RankHistogram {
        let lineups = self.lineups.len();
        let ranked = AtomicUsize::new(0);
        (0..self.scenarios.len())
            .into_par_iter()
            .fold(
                || (RankHistogram::new(lineups), Workspace::new(lineups)),
                |(mut histogram, mut workspace), scenario| {
                    self.rank_into(scenario, &mut workspace);
                    histogram.record(&workspace.ranks);
                    self.report_progress(ranked.fetch_add(1, Ordering::Relaxed) + 1);
                    (histogram, workspace)
                },
            )
            .map(|(histogram, _)| histogram)
            .reduce(
                || RankHistogram::new(lineups),
                |mut combined, partial| {
                    combined.merge(&partial);
                    combined
                },
            )
    }

    fn report_progress(&self, ranked: usize) {
        if ranked % PROGRESS_INTERVAL == 0 {
            debug!("ranked {ranked} of {} scenarios", self.scenarios.len());
        }
    }

    fn score_into(&self, scenario: usize, scores: &mut [f64]) {
        let projections = self.scenarios.projections(scenario);
        for (score, lineup) in scores.iter_mut().zip(self.lineups) {
            *score = lineup
                .members()
                .iter()
                .map(|&member| projections[member])
                .sum();
        }
    }

    fn rank_into(&self, scenario: usize, workspace: &mut Workspace) {
        self.score_into(scenario, &mut workspace.scores);
        rank_averaged_into(&workspace.scores, &mut workspace.order, &mut workspace.ranks);
        invert(&mut workspace.ranks);
    }
}

#[cfg(test)]
mod tests {
    use tinyrand::{Rand, Seeded, StdRand};

    use crate::catalog::Catalog;
    use crate::generator::LineupGenerator;
    use crate::lineup::LineupBuilder;
    use crate::probs::random_f64;
    use crate::testing::{catalog, ten_player_catalog};

    use super::*;

    fn lineup(catalog: &Catalog, players: &[usize]) -> Lineup {
        players
            .iter()
            .fold(LineupBuilder::default(), |builder, &player| {
                builder.with_player(player, catalog.salary(player))
            })
            .build(catalog)
    }

    fn scenarios(rows: &[&[f64]]) -> Scenarios {
        let mut matrix = Matrix::allocate(rows.len(), rows[0].len());
        for (scenario, row) in rows.iter().enumerate() {
            matrix.row_slice_mut(scenario).copy_from_slice(row);
        }
        Scenarios::from_matrix(matrix)
    }

    fn random_scenarios(scenarios: usize, players: usize, rand: &mut impl Rand) -> Scenarios {
        let mut matrix = Matrix::allocate(scenarios, players);
        for value in matrix.flatten_mut() {
            // coarse values so that lineup totals tie now and then
            *value = (random_f64(rand) * 4.0).floor();
        }
        Scenarios::from_matrix(matrix)
    }

    #[test]
    fn scores_and_ranks() {
        let catalog = catalog(&[("A", 1, 0.5), ("B", 1, 0.5), ("C", 1, 0.5), ("D", 1, 0.5)]);
        let lineups = [
            lineup(&catalog, &[0, 1]),
            lineup(&catalog, &[2, 3]),
            lineup(&catalog, &[0, 3]),
        ];
        let scenarios = scenarios(&[&[4.0, 6.0, 1.0, 4.0], &[1.0, 2.0, 3.0, 4.0]]);
        let scorer = Scorer::new(&lineups, &scenarios);

        assert_eq!(vec![10.0, 5.0, 8.0], scorer.scores(0));
        assert_eq!(vec![1.0, 3.0, 2.0], scorer.ranks(0));

        assert_eq!(vec![3.0, 7.0, 5.0], scorer.scores(1));
        assert_eq!(vec![3.0, 1.0, 2.0], scorer.ranks(1));
    }

    #[test]
    fn tied_lineups_share_rank() {
        let catalog = catalog(&[("A", 1, 0.5), ("B", 1, 0.5), ("C", 1, 0.5)]);
        let lineups = [
            lineup(&catalog, &[0]),
            lineup(&catalog, &[1]),
            lineup(&catalog, &[2]),
        ];
        let scenarios = scenarios(&[&[10.0, 10.0, 5.0]]);
        let scorer = Scorer::new(&lineups, &scenarios);
        assert_eq!(vec![1.5, 1.5, 3.0], scorer.ranks(0));

        let histogram = scorer.histogram();
        assert_eq!(&[0, 1, 0, 0], histogram.counts(0));
        assert_eq!(&[0, 1, 0, 0], histogram.counts(1));
        assert_eq!(&[0, 0, 0, 1], histogram.counts(2));
    }

    #[test]
    fn rank_matrix_matches_histogram() {
        let catalog = ten_player_catalog();
        let lineups = LineupGenerator::new(&catalog)
            .generate(25, &mut StdRand::seed(1))
            .unwrap();
        let scenarios = random_scenarios(200, catalog.len(), &mut StdRand::seed(2));
        let scorer = Scorer::new(&lineups, &scenarios);

        let matrix = scorer.rank_matrix();
        assert_eq!(25, matrix.rows());
        assert_eq!(200, matrix.cols());
        let mut expected = RankHistogram::new(lineups.len());
        for scenario in 0..scenarios.len() {
            let ranks: Vec<_> = (0..lineups.len())
                .map(|lineup| matrix[(lineup, scenario)])
                .collect();
            let sum: f64 = ranks.iter().sum();
            assert_eq!((25 * 26) as f64 / 2.0, sum);
            expected.record(&ranks);
        }
        assert_eq!(expected, scorer.histogram());
    }

    #[test]
    fn histogram_normalised() {
        let catalog = ten_player_catalog();
        let lineups = LineupGenerator::new(&catalog)
            .generate(40, &mut StdRand::seed(4))
            .unwrap();
        let scenarios = random_scenarios(500, catalog.len(), &mut StdRand::seed(5));
        let histogram = Scorer::new(&lineups, &scenarios).histogram();
        assert_eq!(500, histogram.trials());
        for lineup in 0..lineups.len() {
            let probs = histogram.probabilities(lineup);
            assert_eq!(41, probs.len());
            assert_eq!(0.0, probs[0]);
            let total: f64 = probs.iter().sum();
            assert!((total - 1.0).abs() < 1e-9, "{total}");
        }
    }

    #[test]
    fn parallel_matches_sequential() {
        let catalog = ten_player_catalog();
        let lineups = LineupGenerator::new(&catalog)
            .generate(60, &mut StdRand::seed(8))
            .unwrap();
        let scenarios = random_scenarios(2_500, catalog.len(), &mut StdRand::seed(9));
        let scorer = Scorer::new(&lineups, &scenarios);
        assert_eq!(scorer.histogram(), scorer.histogram_par());
    }

    #[test]
    fn deterministic_under_fixed_scenarios() {
        let catalog = ten_player_catalog();
        let lineups = LineupGenerator::new(&catalog)
            .generate(30, &mut StdRand::seed(12))
            .unwrap();
        let scenarios = random_scenarios(100, catalog.len(), &mut StdRand::seed(13));
        let scorer = Scorer::new(&lineups, &scenarios);
        let first = scorer.rank_matrix();
        for _ in 0..3 {
            assert_eq!(first, scorer.rank_matrix());
            assert_eq!(scorer.histogram(), scorer.histogram_par());
        }
    }

    #[test]
    fn no_scenarios() {
        let catalog = ten_player_catalog();
        let lineups = LineupGenerator::new(&catalog)
            .generate(3, &mut StdRand::seed(1))
            .unwrap();
        let scenarios = Scenarios::from_matrix(Matrix::allocate(0, catalog.len()));
        let scorer = Scorer::new(&lineups, &scenarios);
        assert_eq!(0, scorer.histogram().trials());
        assert_eq!(0, scorer.histogram_par().trials());
    }
}
