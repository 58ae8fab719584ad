// src/graph/builder.rs

//! Incremental construction of a [`Graph`].

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::errors::{CritpathError, Result};
use crate::graph::model::{Edge, EdgeId, EdgeIdx, Graph, Node, NodeIdx};

/// Description of an edge before it is inserted into a graph.
///
/// `actual_runtime` is optional here only so that its absence can be
/// reported with the offending edge id; [`GraphBuilder::add_edge`] rejects
/// a spec without one.
#[derive(Debug, Clone)]
pub struct EdgeSpec {
    pub id: EdgeId,
    pub inputs: Vec<NodeIdx>,
    pub outputs: Vec<NodeIdx>,
    pub estimated_runtime: Option<u64>,
    pub actual_runtime: Option<u64>,
}

impl EdgeSpec {
    pub fn new(id: EdgeId) -> Self {
        Self {
            id,
            inputs: Vec::new(),
            outputs: Vec::new(),
            estimated_runtime: None,
            actual_runtime: None,
        }
    }

    pub fn input(mut self, node: NodeIdx) -> Self {
        self.inputs.push(node);
        self
    }

    pub fn output(mut self, node: NodeIdx) -> Self {
        self.outputs.push(node);
        self
    }

    pub fn estimated(mut self, runtime: u64) -> Self {
        self.estimated_runtime = Some(runtime);
        self
    }

    pub fn actual(mut self, runtime: u64) -> Self {
        self.actual_runtime = Some(runtime);
        self
    }
}

/// Builds a [`Graph`], interning nodes by name and wiring producer
/// back-references as edges are added.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
    names: HashMap<String, NodeIdx>,
    ids: HashSet<EdgeId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node called `name`, creating it on first use.
    pub fn node(&mut self, name: &str) -> NodeIdx {
        if let Some(idx) = self.names.get(name) {
            return *idx;
        }

        let idx = NodeIdx(self.graph.nodes.len());
        self.graph.nodes.push(Node {
            name: name.to_string(),
            producer: None,
        });
        self.names.insert(name.to_string(), idx);
        idx
    }

    /// Validate and insert an edge.
    ///
    /// Nothing is modified when an error is returned.
    pub fn add_edge(&mut self, spec: EdgeSpec) -> Result<EdgeIdx> {
        let edge_id = spec.id;

        let actual_runtime = spec
            .actual_runtime
            .ok_or(CritpathError::MissingActualRuntime { edge_id })?;

        if self.ids.contains(&edge_id) {
            return Err(CritpathError::DuplicateEdgeId { edge_id });
        }

        for node in spec.inputs.iter().chain(spec.outputs.iter()) {
            if node.0 >= self.graph.nodes.len() {
                return Err(CritpathError::UnknownNode(node.0));
            }
        }

        for node in spec.outputs.iter() {
            if let Some(existing) = self.graph.nodes[node.0].producer {
                return Err(CritpathError::MultipleProducers {
                    node: self.graph.nodes[node.0].name.clone(),
                    first: self.graph.edges[existing.0].id,
                    second: edge_id,
                });
            }
        }

        let idx = EdgeIdx(self.graph.edges.len());
        for node in spec.outputs.iter() {
            self.graph.nodes[node.0].producer = Some(idx);
        }

        debug!(
            edge_id,
            inputs = spec.inputs.len(),
            outputs = spec.outputs.len(),
            "added edge"
        );

        self.graph.edges.push(Edge {
            id: edge_id,
            inputs: spec.inputs,
            outputs: spec.outputs,
            estimated_runtime: spec.estimated_runtime,
            actual_runtime,
        });
        self.ids.insert(edge_id);

        Ok(idx)
    }

    pub fn build(self) -> Graph {
        self.graph
    }
}
