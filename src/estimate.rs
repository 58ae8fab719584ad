// src/estimate.rs

//! Fallback duration for edges without a historical runtime.

use crate::graph::Edge;

/// Duration used when no edge carries an estimate.
pub const MIN_DEFAULT_RUNTIME: u64 = 1;

/// Approximate 75th percentile of the known `estimated_runtime`s.
///
/// Rank-based: the collected values are sorted ascending and the one at
/// zero-based rank `(n - 1) - n / 4` is returned. With no estimates at all
/// the result is [`MIN_DEFAULT_RUNTIME`].
pub fn p75_runtime<'a, I>(edges: I) -> u64
where
    I: IntoIterator<Item = &'a Edge>,
{
    let mut known: Vec<u64> = edges
        .into_iter()
        .filter_map(|e| e.estimated_runtime)
        .collect();

    if known.is_empty() {
        return MIN_DEFAULT_RUNTIME;
    }

    known.sort_unstable();
    let n = known.len();
    known[(n - 1) - n / 4]
}
