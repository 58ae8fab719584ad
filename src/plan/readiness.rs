// src/plan/readiness.rs

//! Per-run readiness of nodes and the reverse index from a node to the
//! edges waiting on it.

use crate::graph::{EdgeIdx, Graph, NodeIdx};

#[derive(Debug, Clone)]
pub struct Readiness {
    /// Indexed by node. Only ever flips false -> true.
    node_ready: Vec<bool>,
    /// Indexed by node: every edge that lists the node as an input, once
    /// per edge even if the edge lists it several times.
    waiting_for: Vec<Vec<EdgeIdx>>,
}

impl Readiness {
    /// Build the index for a fresh run. External inputs (nodes without a
    /// producer) start out ready.
    pub fn new(graph: &Graph) -> Self {
        let node_ready: Vec<bool> = graph
            .nodes()
            .iter()
            .map(|n| n.producer.is_none())
            .collect();
        let mut waiting_for: Vec<Vec<EdgeIdx>> = vec![Vec::new(); graph.nodes().len()];

        for edge in graph.edge_indices() {
            for node in graph.edge(edge).inputs.iter() {
                let waiters = &mut waiting_for[node.index()];
                if waiters.last() != Some(&edge) {
                    waiters.push(edge);
                }
            }
        }

        Self {
            node_ready,
            waiting_for,
        }
    }

    pub fn is_node_ready(&self, node: NodeIdx) -> bool {
        self.node_ready[node.index()]
    }

    /// Mark `node` ready. Returns `false` if it already was.
    pub fn mark_ready(&mut self, node: NodeIdx) -> bool {
        let slot = &mut self.node_ready[node.index()];
        let changed = !*slot;
        *slot = true;
        changed
    }

    pub fn waiting_for(&self, node: NodeIdx) -> &[EdgeIdx] {
        &self.waiting_for[node.index()]
    }

    pub fn all_inputs_ready(&self, graph: &Graph, edge: EdgeIdx) -> bool {
        graph
            .edge(edge)
            .inputs
            .iter()
            .all(|n| self.node_ready[n.index()])
    }
}
