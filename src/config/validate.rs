// src/config/validate.rs

use crate::config::model::{ConfigFile, ConfigSection, RawConfigFile};
use crate::errors::{CritpathError, Result};
use crate::graph::{EdgeSpec, Graph, GraphBuilder, ensure_acyclic};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = CritpathError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_global_config(&raw.config)?;
        let graph = build_graph(&raw)?;
        ensure_acyclic(&graph)?;
        Ok(ConfigFile::new_unchecked(raw.config, graph))
    }
}

fn validate_global_config(cfg: &ConfigSection) -> Result<()> {
    if cfg.n_jobs == 0 {
        return Err(CritpathError::ConfigError(
            "[config].n_jobs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

/// Turn the `[[edge]]` entries into a graph. Structural errors (missing
/// actual runtime, duplicate ids, two producers for one node) come from
/// [`GraphBuilder::add_edge`].
fn build_graph(cfg: &RawConfigFile) -> Result<Graph> {
    let mut builder = GraphBuilder::new();

    for edge in cfg.edge.iter() {
        let mut spec = EdgeSpec::new(edge.id);
        for name in edge.inputs.iter() {
            spec = spec.input(builder.node(name));
        }
        for name in edge.outputs.iter() {
            spec = spec.output(builder.node(name));
        }
        spec.estimated_runtime = edge.estimated_runtime;
        spec.actual_runtime = edge.actual_runtime;

        builder.add_edge(spec)?;
    }

    Ok(builder.build())
}
