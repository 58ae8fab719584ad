// src/config/model.rs

use serde::Deserialize;

use crate::PlanOptions;
use crate::graph::Graph;

/// Plan description as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// n_jobs = 4
/// default_runtime = 10
///
/// [[edge]]
/// id = 0
/// inputs = ["a.c"]
/// outputs = ["a.o"]
/// estimated_runtime = 12
/// actual_runtime = 14
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    /// All `[[edge]]` entries, in file order.
    #[serde(default)]
    pub edge: Vec<EdgeConfig>,
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Number of virtual worker slots.
    #[serde(default = "default_n_jobs")]
    pub n_jobs: usize,

    /// Fallback duration for edges without `estimated_runtime`. When absent
    /// the 75th percentile of the known estimates is used.
    #[serde(default)]
    pub default_runtime: Option<u64>,
}

fn default_n_jobs() -> usize {
    1
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            n_jobs: default_n_jobs(),
            default_runtime: None,
        }
    }
}

/// `[[edge]]` entry. Nodes are referred to by name and created on first
/// mention.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeConfig {
    pub id: u64,

    #[serde(default)]
    pub inputs: Vec<String>,

    #[serde(default)]
    pub outputs: Vec<String>,

    #[serde(default)]
    pub estimated_runtime: Option<u64>,

    /// Required; kept optional so a missing value can be reported with the
    /// edge id instead of a bare TOML error.
    #[serde(default)]
    pub actual_runtime: Option<u64>,
}

/// A validated plan: the graph is structurally sound and acyclic.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    graph: Graph,
}

impl ConfigFile {
    /// Only `validate.rs` should call this, after checking the raw config.
    pub(crate) fn new_unchecked(config: ConfigSection, graph: Graph) -> Self {
        Self { config, graph }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn options(&self) -> PlanOptions {
        PlanOptions {
            n_jobs: self.config.n_jobs,
            default_runtime: self.config.default_runtime,
        }
    }
}
