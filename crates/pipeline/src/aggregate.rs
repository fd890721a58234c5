//! Reduce-by-key and left-outer-join primitives shared by all reports.
//!
//! Reductions run in parallel with Rayon: every worker folds its share of
//! the ratings into a local map, then the maps are merged pairwise. Sum,
//! count and "earliest arrival" are all associative and commutative, so the
//! result does not depend on how the input was split.

use crate::error::{KpiError, Result};
use data_loader::Rating;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Running sum and count of rating values for one key.
///
/// `first_seen` is the index of the earliest rating that contributed to the
/// key and is used as a deterministic tie-break when ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingAccumulator {
    pub sum: u64,
    pub count: u64,
    pub first_seen: usize,
}

impl Default for RatingAccumulator {
    fn default() -> Self {
        Self {
            sum: 0,
            count: 0,
            first_seen: usize::MAX,
        }
    }
}

impl RatingAccumulator {
    pub fn add(&mut self, rating: &Rating, index: usize) {
        self.sum += u64::from(rating.rating);
        self.count += 1;
        self.first_seen = self.first_seen.min(index);
    }

    pub fn merge(&mut self, other: &RatingAccumulator) {
        self.sum += other.sum;
        self.count += other.count;
        self.first_seen = self.first_seen.min(other.first_seen);
    }

    /// `sum / count`.
    ///
    /// Keys are only created by a contributing rating, so a zero count means
    /// the key construction is broken and is reported as an invariant
    /// violation of report `kpi`.
    pub fn average(&self, kpi: &'static str, key: &impl Debug) -> Result<f64> {
        if self.count == 0 {
            return Err(KpiError::InvariantViolation {
                kpi,
                key: format!("{key:?}"),
                reason: "average over zero ratings",
            });
        }
        Ok(self.sum as f64 / self.count as f64)
    }
}

/// Group ratings by the key returned from `key_fn` and accumulate them.
///
/// Ratings for which `key_fn` returns `None` do not contribute to any key.
/// A key is only ever created by a contributing rating, so every
/// accumulator in the result has `count >= 1`.
pub fn reduce_by_key<K, F>(ratings: &[Rating], key_fn: F) -> HashMap<K, RatingAccumulator>
where
    K: Eq + Hash + Send,
    F: Fn(&Rating) -> Option<K> + Sync,
{
    ratings
        .par_iter()
        .enumerate()
        .fold(HashMap::new, |mut local: HashMap<K, RatingAccumulator>, (index, rating)| {
            if let Some(key) = key_fn(rating) {
                local.entry(key).or_default().add(rating, index);
            }
            local
        })
        .reduce(HashMap::new, merge_maps)
}

fn merge_maps<K: Eq + Hash>(
    mut left: HashMap<K, RatingAccumulator>,
    mut right: HashMap<K, RatingAccumulator>,
) -> HashMap<K, RatingAccumulator> {
    // Merge the smaller map into the larger one
    if left.len() < right.len() {
        std::mem::swap(&mut left, &mut right);
    }
    for (key, acc) in right {
        left.entry(key).or_default().merge(&acc);
    }
    left
}

/// Keep every left row, pairing it with the matching right value if any.
pub fn left_outer_join<K, V, W>(
    left: impl IntoIterator<Item = (K, V)>,
    right: &HashMap<K, W>,
) -> Vec<(K, (V, Option<W>))>
where
    K: Eq + Hash,
    W: Clone,
{
    left.into_iter()
        .map(|(key, value)| {
            let companion = right.get(&key).cloned();
            (key, (value, companion))
        })
        .collect()
}

/// Round to a fixed number of decimal digits, exact halves to even
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round_ties_even() / factor
}
