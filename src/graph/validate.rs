// src/graph/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::errors::{CritpathError, Result};
use crate::graph::model::Graph;

/// Fail with [`CritpathError::Cycle`] if following inputs back to their
/// producing edges ever revisits an edge.
///
/// Edge direction: producer -> consumer. An edge that consumes its own
/// output is a self-loop and counts as a cycle.
pub fn ensure_acyclic(graph: &Graph) -> Result<()> {
    let mut deps: DiGraphMap<usize, ()> = DiGraphMap::new();

    for idx in graph.edge_indices() {
        deps.add_node(idx.index());
    }

    for consumer in graph.edge_indices() {
        for producer in graph.producers_of(consumer) {
            deps.add_edge(producer.index(), consumer.index(), ());
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&deps, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(CritpathError::Cycle {
            edge_id: graph.edges[cycle.node_id()].id,
        }),
    }
}
