// src/graph/mod.rs

//! Arena-backed dependency graph of work items.
//!
//! - [`model`] holds the node / edge data and index types.
//! - [`builder`] constructs a [`Graph`] and enforces structural rules
//!   (unique ids, single producer per node, required actual runtime).
//! - [`validate`] checks acyclicity of the producer → consumer relation.

pub mod builder;
pub mod model;
pub mod validate;

pub use builder::{EdgeSpec, GraphBuilder};
pub use model::{Edge, EdgeId, EdgeIdx, Graph, Node, NodeIdx};
pub use validate::ensure_acyclic;
