// src/graph/model.rs

use std::fmt;

/// Externally assigned edge identifier. Used as the deterministic tie-break
/// between edges with equal critical time.
pub type EdgeId = u64;

/// Position of a node in [`Graph::nodes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIdx(pub(crate) usize);

/// Position of an edge in [`Graph::edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeIdx(pub(crate) usize);

impl NodeIdx {
    pub fn index(self) -> usize {
        self.0
    }
}

impl EdgeIdx {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl fmt::Display for EdgeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// One produced artifact.
///
/// Readiness is not stored here: it is per-run state owned by
/// [`crate::plan::Plan`], so one graph can be scheduled many times.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    /// The single edge that outputs this node, or `None` for an external
    /// input.
    pub producer: Option<EdgeIdx>,
}

/// One schedulable work item.
#[derive(Debug, Clone)]
pub struct Edge {
    pub id: EdgeId,
    pub inputs: Vec<NodeIdx>,
    pub outputs: Vec<NodeIdx>,
    /// Historical measurement, if any.
    pub estimated_runtime: Option<u64>,
    /// Duration the simulator charges for this edge.
    pub actual_runtime: u64,
}

impl Edge {
    pub fn runtime_or(&self, default_runtime: u64) -> u64 {
        self.estimated_runtime.unwrap_or(default_runtime)
    }
}

/// Flat node / edge arenas. All cross references are indices.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
}

impl Graph {
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.0]
    }

    pub fn edge(&self, idx: EdgeIdx) -> &Edge {
        &self.edges[idx.0]
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        (0..self.edges.len()).map(EdgeIdx)
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        (0..self.nodes.len()).map(NodeIdx)
    }

    /// Look up an edge by its external id.
    pub fn find_edge(&self, id: EdgeId) -> Option<EdgeIdx> {
        self.edges.iter().position(|e| e.id == id).map(EdgeIdx)
    }

    /// Look up a node by name.
    pub fn find_node(&self, name: &str) -> Option<NodeIdx> {
        self.nodes.iter().position(|n| n.name == name).map(NodeIdx)
    }

    /// Edges that produce the inputs of `idx`, in input order. External
    /// inputs are skipped.
    pub fn producers_of(&self, idx: EdgeIdx) -> impl Iterator<Item = EdgeIdx> + '_ {
        self.edge(idx)
            .inputs
            .iter()
            .filter_map(|n| self.nodes[n.0].producer)
    }
}
