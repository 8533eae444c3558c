//! Empirical selection frequencies of players across a generated set of lineups.

use crate::catalog::Catalog;
use crate::lineup::Lineup;
use crate::probs::Fraction;

/// For every catalog player, the fraction of `lineups` that include the player.
pub fn reestimate(catalog: &Catalog, lineups: &[Lineup]) -> Vec<Fraction> {
    let mut appearances = vec![0; catalog.len()];
    for lineup in lineups {
        for &member in lineup.members() {
            appearances[member] += 1;
        }
    }
    appearances
        .into_iter()
        .map(|numerator| Fraction {
            numerator,
            denominator: lineups.len() as u64,
        })
        .collect()
}

/// [reestimate] as plain probabilities. An empty lineup set yields zero for every player.
pub fn reestimate_probabilities(catalog: &Catalog, lineups: &[Lineup]) -> Vec<f64> {
    reestimate(catalog, lineups)
        .iter()
        .map(|fraction| {
            if fraction.denominator == 0 {
                0.0
            } else {
                fraction.quotient()
            }
        })
        .collect()
}
