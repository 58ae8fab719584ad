#![allow(dead_code)]

use critpath::config::{ConfigFile, ConfigSection, EdgeConfig, RawConfigFile};
use critpath::graph::{EdgeSpec, Graph, GraphBuilder};

/// Builder for graphs whose nodes are named by strings, to keep test
/// setup close to how the graphs are drawn in comments.
pub struct TestGraphBuilder {
    inner: GraphBuilder,
}

impl TestGraphBuilder {
    pub fn new() -> Self {
        Self {
            inner: GraphBuilder::new(),
        }
    }

    /// Add an edge with an estimate equal to its actual runtime.
    pub fn edge(self, id: u64, inputs: &[&str], outputs: &[&str], runtime: u64) -> Self {
        self.edge_with(id, inputs, outputs, Some(runtime), runtime)
    }

    pub fn edge_with(
        mut self,
        id: u64,
        inputs: &[&str],
        outputs: &[&str],
        estimated: Option<u64>,
        actual: u64,
    ) -> Self {
        let mut spec = EdgeSpec::new(id).actual(actual);
        spec.estimated_runtime = estimated;
        for name in inputs {
            spec = spec.input(self.inner.node(name));
        }
        for name in outputs {
            spec = spec.output(self.inner.node(name));
        }
        self.inner
            .add_edge(spec)
            .expect("test graph edge should be valid");
        self
    }

    pub fn build(self) -> Graph {
        self.inner.build()
    }
}

impl Default for TestGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear chain: edge `i` consumes `n{i}` and produces `n{i+1}`; ids are
/// `0..runtimes.len()`.
pub fn chain(runtimes: &[u64]) -> Graph {
    let mut builder = TestGraphBuilder::new();
    for (i, runtime) in runtimes.iter().enumerate() {
        let input = format!("n{i}");
        let output = format!("n{}", i + 1);
        let inputs: Vec<&str> = if i == 0 { vec![] } else { vec![input.as_str()] };
        builder = builder.edge(i as u64, &inputs, &[output.as_str()], *runtime);
    }
    builder.build()
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                edge: Vec::new(),
            },
        }
    }

    pub fn n_jobs(mut self, n_jobs: usize) -> Self {
        self.config.config.n_jobs = n_jobs;
        self
    }

    pub fn default_runtime(mut self, runtime: u64) -> Self {
        self.config.config.default_runtime = Some(runtime);
        self
    }

    pub fn with_edge(mut self, edge: EdgeConfig) -> Self {
        self.config.edge.push(edge);
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `EdgeConfig`.
pub struct EdgeConfigBuilder {
    edge: EdgeConfig,
}

impl EdgeConfigBuilder {
    pub fn new(id: u64) -> Self {
        Self {
            edge: EdgeConfig {
                id,
                inputs: vec![],
                outputs: vec![],
                estimated_runtime: None,
                actual_runtime: None,
            },
        }
    }

    pub fn input(mut self, name: &str) -> Self {
        self.edge.inputs.push(name.to_string());
        self
    }

    pub fn output(mut self, name: &str) -> Self {
        self.edge.outputs.push(name.to_string());
        self
    }

    pub fn estimated(mut self, runtime: u64) -> Self {
        self.edge.estimated_runtime = Some(runtime);
        self
    }

    pub fn actual(mut self, runtime: u64) -> Self {
        self.edge.actual_runtime = Some(runtime);
        self
    }

    pub fn build(self) -> EdgeConfig {
        self.edge
    }
}
