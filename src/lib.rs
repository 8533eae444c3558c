//! Salary-capped fantasy lineup sampling with a rank-based Monte Carlo model of expected value.
//! Lineups are drawn from player selection probabilities, ranked against one another in every
//! simulated scenario, and priced by applying a payout schedule to their rank distributions.

pub mod catalog;
pub mod config;
pub mod csv;
pub mod evaluation;
pub mod frequency;
pub mod generator;
pub mod histogram;
pub mod lineup;
pub mod matrix;
pub mod mc;
pub mod payout;
pub mod pipeline;
pub mod print;
pub mod probs;
pub mod rank;
pub mod scenario;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
