//! Payout schedules and the expected value of a rank distribution.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PayoutError {
    #[error("payout schedule must have at least one entry")]
    Empty,

    #[error("payout ranks must run contiguously from 1: expected rank {expected}, got {actual}")]
    NonContiguous { expected: usize, actual: usize },

    #[error("non-finite payout {amount} for rank {rank}")]
    NonFinite { rank: usize, amount: f64 },
}

/// Payouts indexed by finishing rank, starting at rank 1. Ranks past the last explicit entry pay
/// the last entry; rank 0 pays nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutSchedule {
    payouts: Vec<f64>,
}
impl PayoutSchedule {
    /// `payouts[0]` is paid for rank 1, `payouts[1]` for rank 2, and so on.
    pub fn new(payouts: Vec<f64>) -> Result<Self, PayoutError> {
        if payouts.is_empty() {
            return Err(PayoutError::Empty);
        }
        for (index, &amount) in payouts.iter().enumerate() {
            if !amount.is_finite() {
                return Err(PayoutError::NonFinite {
                    rank: index + 1,
                    amount,
                });
            }
        }
        Ok(Self { payouts })
    }

    /// Builds a schedule from `(rank, payout)` pairs given in any order. The ranks must cover
    /// `1..=N` exactly once.
    pub fn from_ranked(mut ranked: Vec<(usize, f64)>) -> Result<Self, PayoutError> {
        ranked.sort_by_key(|&(rank, _)| rank);
        for (index, &(rank, _)) in ranked.iter().enumerate() {
            if rank != index + 1 {
                return Err(PayoutError::NonContiguous {
                    expected: index + 1,
                    actual: rank,
                });
            }
        }
        Self::new(ranked.into_iter().map(|(_, payout)| payout).collect())
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.payouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payouts.is_empty()
    }

    pub fn payouts(&self) -> &[f64] {
        &self.payouts
    }

    pub fn payout(&self, rank: usize) -> f64 {
        match rank {
            0 => 0.0,
            rank if rank <= self.payouts.len() => self.payouts[rank - 1],
            _ => self.payouts[self.payouts.len() - 1],
        }
    }

    /// Probability-weighted payout, where `rank_probs[rank]` is the probability of finishing at
    /// `rank` (index 0 being the no-payout sentinel).
    pub fn expected_value(&self, rank_probs: &[f64]) -> f64 {
        rank_probs
            .iter()
            .enumerate()
            .map(|(rank, &prob)| prob * self.payout(rank))
            .sum()
    }
}
