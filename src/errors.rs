// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::graph::EdgeId;

#[derive(Error, Debug)]
pub enum CritpathError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Cycle detected in dependency graph involving edge {edge_id}")]
    Cycle { edge_id: EdgeId },

    #[error("Edge {edge_id} has no actual runtime")]
    MissingActualRuntime { edge_id: EdgeId },

    #[error("Duplicate edge id {edge_id}")]
    DuplicateEdgeId { edge_id: EdgeId },

    #[error("Node '{node}' is produced by both edge {first} and edge {second}")]
    MultipleProducers {
        node: String,
        first: EdgeId,
        second: EdgeId,
    },

    #[error("Unknown node index {0}")]
    UnknownNode(usize),

    #[error("n_jobs must be >= 1 (got {0})")]
    InvalidJobs(usize),

    #[error("Priority overflow while relaxing edge {edge_id}")]
    PriorityOverflow { edge_id: EdgeId },

    #[error("Simulated clock overflow while running edge {edge_id}")]
    ClockOverflow { edge_id: EdgeId },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, CritpathError>;
