//! Utilities for working with probabilities and weighted draws.

use std::fmt::{Display, Formatter};

use tinyrand::Rand;

pub trait SliceExt {
    fn sum(&self) -> f64;
    fn scale(&mut self, factor: f64);
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    fn scale(&mut self, factor: f64) {
        for element in self {
            *element *= factor;
        }
    }
}

/// A uniformly distributed value in `[0, 1)`, taken from the upper 53 bits of the generator output.
#[inline]
pub fn random_f64(rand: &mut impl Rand) -> f64 {
    const MANTISSA_SCALE: f64 = 1.0 / (1u64 << 53) as f64;
    (rand.next_u64() >> 11) as f64 * MANTISSA_SCALE
}

/// Inverse-transform sampling over cumulative `weights`. A uniform value is drawn in
/// `[0, total)` and the first outcome whose cumulative weight exceeds it is chosen.
///
/// Weights need not sum to 1. If rounding leaves the draw at or above the final cumulative
/// weight, the last outcome is chosen.
pub fn weighted_choice(weights: &[f64], rand: &mut impl Rand) -> usize {
    debug_assert!(!weights.is_empty(), "at least one weight must be supplied");
    let total = weights.sum();
    let random = random_f64(rand) * total;
    let mut cumulative = 0.0;
    for (outcome, &weight) in weights.iter().enumerate() {
        cumulative += weight;
        if random < cumulative {
            return outcome;
        }
    }
    weights.len() - 1
}

/// A binary draw that succeeds with the given `probability`.
#[inline]
pub fn bernoulli(probability: f64, rand: &mut impl Rand) -> bool {
    const INCLUDE: usize = 1;
    weighted_choice(&[1.0 - probability, probability], rand) == INCLUDE
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fraction {
    pub numerator: u64,
    pub denominator: u64,
}
impl Fraction {
    pub fn quotient(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
