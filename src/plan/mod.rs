// src/plan/mod.rs

//! Dependency-readiness tracking and execution simulation.
//!
//! - [`ready_queue`] orders ready edges by descending priority.
//! - [`readiness`] holds per-run node readiness and the `waiting_for` index.
//! - [`simulator`] runs a greedy list schedule over virtual worker slots.

pub mod readiness;
pub mod ready_queue;
pub mod simulator;

pub use readiness::Readiness;
pub use ready_queue::ReadyQueue;
pub use simulator::{Schedule, Timing};

use tracing::{debug, warn};

use crate::graph::{EdgeIdx, Graph};
use crate::priority::Priorities;

/// State of one scheduling run over a graph.
///
/// The graph itself is never mutated; everything that changes during a run
/// (node readiness, the ready queue, which edges finished) lives here. A
/// plan is single-use: build a new one for every run.
#[derive(Debug)]
pub struct Plan<'g> {
    graph: &'g Graph,
    priorities: &'g Priorities,
    readiness: Readiness,
    ready: ReadyQueue,
    finished: Vec<bool>,
}

impl<'g> Plan<'g> {
    /// Build the readiness index and seed the ready queue with every edge
    /// whose inputs are ready before anything runs (all zero-input edges,
    /// plus edges that only consume external inputs).
    pub fn new(graph: &'g Graph, priorities: &'g Priorities) -> Self {
        let readiness = Readiness::new(graph);
        let mut ready = ReadyQueue::new();

        for edge in graph.edge_indices() {
            if readiness.all_inputs_ready(graph, edge) {
                ready.push(edge, priorities.priority(edge));
            }
        }

        debug!(
            edges = graph.edge_count(),
            seeded = ready.len(),
            "plan constructed"
        );

        Self {
            graph,
            priorities,
            readiness,
            ready,
            finished: vec![false; graph.edge_count()],
        }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Highest-priority ready edge, or `None` if nothing is ready right now.
    ///
    /// `None` does not mean the run is over; edges still executing may
    /// release more work when they finish.
    pub fn find_work(&mut self) -> Option<EdgeIdx> {
        self.ready.pop()
    }

    /// Mark the outputs of `edge` ready and queue every consumer whose
    /// inputs are now all ready. Returns the newly queued edges.
    pub fn edge_finished(&mut self, edge: EdgeIdx) -> Vec<EdgeIdx> {
        let graph = self.graph;

        if std::mem::replace(&mut self.finished[edge.index()], true) {
            warn!(
                edge_id = graph.edge(edge).id,
                "edge reported finished twice; ignoring"
            );
            return Vec::new();
        }

        let mut newly_ready = Vec::new();

        for &node in graph.edge(edge).outputs.iter() {
            if !self.readiness.mark_ready(node) {
                continue;
            }

            for &waiter in self.readiness.waiting_for(node) {
                if self.readiness.all_inputs_ready(graph, waiter) {
                    self.ready.push(waiter, self.priorities.priority(waiter));
                    newly_ready.push(waiter);
                }
            }
        }

        debug!(
            edge_id = graph.edge(edge).id,
            newly_ready = newly_ready.len(),
            "edge finished"
        );

        newly_ready
    }

    pub fn all_inputs_ready(&self, edge: EdgeIdx) -> bool {
        self.readiness.all_inputs_ready(self.graph, edge)
    }

    pub fn is_finished(&self, edge: EdgeIdx) -> bool {
        self.finished[edge.index()]
    }

    pub fn finished_count(&self) -> usize {
        self.finished.iter().filter(|f| **f).count()
    }

    /// Number of edges currently waiting in the ready queue.
    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }
}
