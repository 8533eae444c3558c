//! Per-lineup distribution of finishing ranks across simulated scenarios.
//!
//! Each lineup has buckets `0..=lineups`. A rank is filed under its integer part, so a shared
//! rank of 2.5 counts towards bucket 2. Bucket 0 is the no-payout sentinel; ranks produced by
//! [rank_inverted](crate::rank::rank_inverted) are at least 1 and never land there.

use crate::matrix::Matrix;
use crate::probs::SliceExt;

#[derive(Debug, Clone, PartialEq)]
pub struct RankHistogram {
    counts: Matrix<u64>,
    trials: u64,
}
impl RankHistogram {
    pub fn new(lineups: usize) -> Self {
        Self {
            counts: Matrix::allocate(lineups, lineups + 1),
            trials: 0,
        }
    }

    #[inline]
    pub fn bucket(rank: f64) -> usize {
        debug_assert!(rank >= 0.0, "negative rank {rank}");
        rank.trunc() as usize
    }

    pub fn lineups(&self) -> usize {
        self.counts.rows()
    }

    pub fn buckets(&self) -> usize {
        self.counts.cols()
    }

    /// Number of scenarios recorded.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Records one scenario: `ranks[lineup]` is that lineup's finishing rank.
    pub fn record(&mut self, ranks: &[f64]) {
        debug_assert_eq!(
            self.lineups(),
            ranks.len(),
            "{} ranks supplied for {} lineups",
            ranks.len(),
            self.lineups()
        );
        for (lineup, &rank) in ranks.iter().enumerate() {
            self.counts[(lineup, Self::bucket(rank))] += 1;
        }
        self.trials += 1;
    }

    /// Sums the counts of another histogram over the same lineups into this one.
    pub fn merge(&mut self, other: &RankHistogram) {
        assert_eq!(
            self.lineups(),
            other.lineups(),
            "cannot merge histograms of {} and {} lineups",
            self.lineups(),
            other.lineups()
        );
        for (count, &other_count) in self
            .counts
            .flatten_mut()
            .iter_mut()
            .zip(other.counts.flatten())
        {
            *count += other_count;
        }
        self.trials += other.trials;
    }

    pub fn counts(&self, lineup: usize) -> &[u64] {
        self.counts.row_slice(lineup)
    }

    /// Bucket counts of `lineup` divided by the number of recorded scenarios.
    pub fn probabilities(&self, lineup: usize) -> Vec<f64> {
        let mut probs: Vec<_> = self.counts(lineup).iter().map(|&count| count as f64).collect();
        if self.trials > 0 {
            probs.scale(1.0 / self.trials as f64);
        }
        probs
    }
}
