// src/plan/simulator.rs

//! Discrete-event greedy list scheduler over `n_jobs` virtual worker slots.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::errors::{CritpathError, Result};
use crate::graph::{EdgeId, EdgeIdx};
use crate::plan::Plan;

/// When an edge ran in the simulated timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub start: u64,
    pub finish: u64,
}

/// Result of a simulation: edge id -> timing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    timings: BTreeMap<EdgeId, Timing>,
}

impl Schedule {
    pub fn start_time(&self, id: EdgeId) -> Option<u64> {
        self.timings.get(&id).map(|t| t.start)
    }

    pub fn timing(&self, id: EdgeId) -> Option<Timing> {
        self.timings.get(&id).copied()
    }

    /// Edge id -> start time.
    pub fn start_times(&self) -> BTreeMap<EdgeId, u64> {
        self.timings.iter().map(|(id, t)| (*id, t.start)).collect()
    }

    /// Time at which the last edge finishes (0 for an empty schedule).
    pub fn makespan(&self) -> u64 {
        self.timings.values().map(|t| t.finish).max().unwrap_or(0)
    }

    /// Entries ordered by start time, then by edge id.
    pub fn in_start_order(&self) -> Vec<(EdgeId, Timing)> {
        let mut entries: Vec<(EdgeId, Timing)> =
            self.timings.iter().map(|(id, t)| (*id, *t)).collect();
        entries.sort_by_key(|(id, t)| (t.start, *id));
        entries
    }

    pub fn len(&self) -> usize {
        self.timings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timings.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Running {
    edge: EdgeIdx,
    completes_at: u64,
}

impl Plan<'_> {
    /// Simulate the run on `n_jobs` interchangeable slots.
    ///
    /// Each iteration fills idle slots from the ready queue in priority
    /// order, stops once every slot is idle, otherwise advances the clock
    /// to the earliest completion and finishes every edge due at that time.
    pub fn execute(&mut self, n_jobs: usize) -> Result<Schedule> {
        if n_jobs == 0 {
            return Err(CritpathError::InvalidJobs(n_jobs));
        }

        let graph = self.graph();
        let mut slots: Vec<Option<Running>> = vec![None; n_jobs];
        let mut now: u64 = 0;
        let mut schedule = Schedule::default();

        loop {
            // Assign.
            for slot in slots.iter_mut().filter(|s| s.is_none()) {
                let Some(edge) = self.find_work() else {
                    break;
                };

                let e = graph.edge(edge);
                let completes_at = now
                    .checked_add(e.actual_runtime)
                    .ok_or(CritpathError::ClockOverflow { edge_id: e.id })?;

                debug!(edge_id = e.id, start = now, completes_at, "edge started");
                schedule.timings.insert(
                    e.id,
                    Timing {
                        start: now,
                        finish: completes_at,
                    },
                );
                *slot = Some(Running { edge, completes_at });
            }

            // Advance.
            let Some(next) = slots.iter().flatten().map(|r| r.completes_at).min() else {
                break;
            };
            now = next;

            // Complete.
            for slot in slots.iter_mut() {
                if let Some(running) = *slot {
                    if running.completes_at == now {
                        self.edge_finished(running.edge);
                        *slot = None;
                    }
                }
            }
        }

        if schedule.len() < graph.edge_count() {
            warn!(
                scheduled = schedule.len(),
                edges = graph.edge_count(),
                "simulation ended with edges that never became ready"
            );
        }

        info!(
            n_jobs,
            edges = schedule.len(),
            makespan = schedule.makespan(),
            "simulation complete"
        );

        Ok(schedule)
    }
}
