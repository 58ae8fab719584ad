// src/priority.rs

//! Critical-path priorities.
//!
//! Each edge's critical time is the longest chain of (estimated) work that
//! starts at the edge and follows its outputs to their consumers. It is
//! computed by a backward worklist relaxation and then folded together with
//! the edge id into a single integer so that comparing priorities compares
//! `(critical_time, -id)` lexicographically.

use std::collections::VecDeque;

use tracing::{debug, info};

use crate::errors::{CritpathError, Result};
use crate::graph::{EdgeIdx, Graph, ensure_acyclic};

/// Per-edge priorities, indexed by [`EdgeIdx`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Priorities {
    critical: Vec<u64>,
    encoded: Vec<u64>,
}

impl Priorities {
    /// Length of the longest remaining chain of work starting at `edge`.
    pub fn critical_time(&self, edge: EdgeIdx) -> u64 {
        self.critical[edge.index()]
    }

    /// Encoded priority: higher runs first. Unique per edge.
    pub fn priority(&self, edge: EdgeIdx) -> u64 {
        self.encoded[edge.index()]
    }

    pub fn critical_times(&self) -> &[u64] {
        &self.critical
    }

    pub fn len(&self) -> usize {
        self.encoded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoded.is_empty()
    }
}

/// Compute priorities for every edge of `graph`.
///
/// Edges without an `estimated_runtime` are charged `default_runtime`.
/// Rejects cyclic graphs before relaxing.
pub fn compute_priorities(graph: &Graph, default_runtime: u64) -> Result<Priorities> {
    ensure_acyclic(graph)?;

    let mut critical: Vec<u64> = graph
        .edges()
        .iter()
        .map(|e| e.runtime_or(default_runtime))
        .collect();

    let updates = relax_critical_times(graph, default_runtime, &mut critical)?;
    let encoded = encode_with_ids(graph, &critical)?;

    info!(
        edges = graph.edge_count(),
        updates,
        max_critical_time = critical.iter().copied().max().unwrap_or(0),
        "computed critical-path priorities"
    );

    Ok(Priorities { critical, encoded })
}

/// Run the worklist relaxation to a fixpoint over `critical`, which must
/// hold one value per edge. Returns how many values were raised.
///
/// Every edge is processed at least once and an edge is never queued twice
/// at the same time. Terminates only on acyclic graphs; callers that cannot
/// guarantee that should go through [`compute_priorities`].
pub fn relax_critical_times(
    graph: &Graph,
    default_runtime: u64,
    critical: &mut [u64],
) -> Result<usize> {
    let mut worklist: VecDeque<EdgeIdx> = graph.edge_indices().collect();
    let mut active = vec![true; graph.edge_count()];
    let mut updates = 0;

    while let Some(edge) = worklist.pop_front() {
        active[edge.index()] = false;

        for producer in graph.producers_of(edge) {
            let p = graph.edge(producer);
            let candidate = critical[edge.index()]
                .checked_add(p.runtime_or(default_runtime))
                .ok_or(CritpathError::PriorityOverflow { edge_id: p.id })?;

            if candidate <= critical[producer.index()] {
                continue;
            }

            critical[producer.index()] = candidate;
            updates += 1;

            if !active[producer.index()] {
                active[producer.index()] = true;
                worklist.push_back(producer);
            }
        }
    }

    debug!(updates, "relaxation reached fixpoint");
    Ok(updates)
}

/// `critical * M + (M - 1 - id)` with `M = max(id) + 1`.
fn encode_with_ids(graph: &Graph, critical: &[u64]) -> Result<Vec<u64>> {
    let Some(max_id) = graph.edges().iter().map(|e| e.id).max() else {
        return Ok(Vec::new());
    };

    graph
        .edges()
        .iter()
        .zip(critical)
        .map(|(e, &crit)| {
            let overflow = || CritpathError::PriorityOverflow { edge_id: e.id };
            let m = max_id.checked_add(1).ok_or_else(overflow)?;
            crit.checked_mul(m)
                .and_then(|v| v.checked_add(max_id - e.id))
                .ok_or_else(overflow)
        })
        .collect()
}
