//! Assembly of the final result: each lineup with its salary and expected value, best first.

use crate::catalog::Catalog;
use crate::histogram::RankHistogram;
use crate::lineup::Lineup;
use crate::payout::PayoutSchedule;

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub members: Vec<String>,
    pub salary: u64,
    pub expected_value: f64,
}

/// Expected payout of every lineup, in lineup order.
pub fn expected_values(histogram: &RankHistogram, payouts: &PayoutSchedule) -> Vec<f64> {
    (0..histogram.lineups())
        .map(|lineup| payouts.expected_value(&histogram.probabilities(lineup)))
        .collect()
}

/// Pairs every lineup with its expected value and sorts the result by descending expected value.
/// Equal expected values retain lineup order.
pub fn evaluate(
    catalog: &Catalog,
    lineups: &[Lineup],
    histogram: &RankHistogram,
    payouts: &PayoutSchedule,
) -> Vec<Evaluation> {
    assert_eq!(
        lineups.len(),
        histogram.lineups(),
        "histogram covers {} lineups, expected {}",
        histogram.lineups(),
        lineups.len()
    );
    let mut evaluations: Vec<_> = lineups
        .iter()
        .zip(expected_values(histogram, payouts))
        .map(|(lineup, expected_value)| Evaluation {
            members: lineup.names(catalog).map(ToString::to_string).collect(),
            salary: lineup.salary(),
            expected_value,
        })
        .collect();
    evaluations.sort_by(|a, b| b.expected_value.total_cmp(&a.expected_value));
    evaluations
}
