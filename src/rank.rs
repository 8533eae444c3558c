//! Competition ranking with averaged ties.
//!
//! A value's raw rank is one plus the number of strictly smaller values, plus half the number of
//! other values equal to it. Tied values therefore share the mean of the positions they occupy
//! and the raw ranks of `n` values always sum to `n(n + 1)/2`. Inverting a raw rank `r` as
//! `n + 1 - r` makes the largest value rank 1.

/// Writes the averaged raw rank of each of `values` into `ranks`. `order` is scratch space of
/// the same length. Runs in `O(n log n)`.
pub fn rank_averaged_into(values: &[f64], order: &mut [usize], ranks: &mut [f64]) {
    debug_assert_eq!(values.len(), order.len(), "scratch length must match number of values");
    debug_assert_eq!(values.len(), ranks.len(), "rank length must match number of values");
    for (index, slot) in order.iter_mut().enumerate() {
        *slot = index;
    }
    order.sort_unstable_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut start = 0;
    while start < order.len() {
        let value = values[order[start]];
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == value {
            end += 1;
        }
        // positions start + 1 ..= end share their mean
        let rank = (start + 1 + end) as f64 / 2.0;
        for &index in &order[start..end] {
            ranks[index] = rank;
        }
        start = end;
    }
}

pub fn rank_averaged(values: &[f64]) -> Vec<f64> {
    let mut order = vec![0; values.len()];
    let mut ranks = vec![0.0; values.len()];
    rank_averaged_into(values, &mut order, &mut ranks);
    ranks
}

/// Flips raw ranks in place so that the highest value holds rank 1.
pub fn invert(ranks: &mut [f64]) {
    let max = (ranks.len() + 1) as f64;
    for rank in ranks {
        *rank = max - *rank;
    }
}

pub fn rank_inverted(values: &[f64]) -> Vec<f64> {
    let mut ranks = rank_averaged(values);
    invert(&mut ranks);
    ranks
}
