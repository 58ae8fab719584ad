// src/lib.rs

//! Critical-path prioritisation and simulated list scheduling for a
//! dependency graph of work items.
//!
//! Pipeline: [`estimate::p75_runtime`] picks a fallback duration,
//! [`priority::compute_priorities`] ranks edges by critical time, and
//! [`plan::Plan::execute`] replays the graph on a fixed number of virtual
//! worker slots to produce a [`plan::Schedule`].

pub mod cli;
pub mod config;
pub mod errors;
pub mod estimate;
pub mod graph;
pub mod logging;
pub mod plan;
pub mod priority;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_and_validate;
use crate::estimate::p75_runtime;
use crate::graph::{EdgeIdx, Graph};
use crate::plan::{Plan, Schedule};
use crate::priority::{Priorities, compute_priorities};

/// Knobs for one scheduling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanOptions {
    /// Number of virtual worker slots; must be at least 1.
    pub n_jobs: usize,
    /// Fallback runtime for edges without an estimate. `None` means "use
    /// the 75th percentile of the known estimates".
    pub default_runtime: Option<u64>,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            n_jobs: 1,
            default_runtime: None,
        }
    }
}

impl PlanOptions {
    pub fn effective_default_runtime(&self, graph: &Graph) -> u64 {
        self.default_runtime
            .unwrap_or_else(|| p75_runtime(graph.edges()))
    }
}

/// Estimate, prioritise and simulate `graph` in one go.
pub fn schedule(graph: &Graph, options: &PlanOptions) -> errors::Result<Schedule> {
    let default_runtime = options.effective_default_runtime(graph);
    debug!(default_runtime, n_jobs = options.n_jobs, "scheduling graph");

    let priorities = compute_priorities(graph, default_runtime)?;
    let mut plan = Plan::new(graph, &priorities);
    plan.execute(options.n_jobs)
}

/// High-level entry point used by `main.rs`: load a plan file, schedule it
/// and print the timeline.
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)
        .with_context(|| format!("failed to load plan {}", config_path.display()))?;

    let mut options = cfg.options();
    if let Some(jobs) = args.jobs {
        options.n_jobs = jobs;
    }

    let graph = cfg.graph();
    info!(
        edges = graph.edge_count(),
        nodes = graph.nodes().len(),
        n_jobs = options.n_jobs,
        "loaded plan"
    );

    if args.dry_run {
        let priorities = compute_priorities(graph, options.effective_default_runtime(graph))?;
        print_priorities(graph, &priorities);
        return Ok(());
    }

    let timeline = schedule(graph, &options)?;
    print_schedule(&timeline, options.n_jobs);
    Ok(())
}

/// Edges from highest to lowest priority.
fn print_priorities(graph: &Graph, priorities: &Priorities) {
    let mut order: Vec<EdgeIdx> = graph.edge_indices().collect();
    order.sort_by_key(|e| std::cmp::Reverse(priorities.priority(*e)));

    println!("critpath dry-run");
    println!("edges ({}):", graph.edge_count());
    for edge in order {
        println!(
            "  - edge {:>4}  critical_time {:>8}  priority {}",
            graph.edge(edge).id,
            priorities.critical_time(edge),
            priorities.priority(edge)
        );
    }
}

fn print_schedule(schedule: &Schedule, n_jobs: usize) {
    println!("critpath schedule (n_jobs = {n_jobs})");
    for (id, timing) in schedule.in_start_order() {
        println!(
            "  edge {:>4}  start {:>8}  finish {:>8}",
            id, timing.start, timing.finish
        );
    }
    println!("makespan: {}", schedule.makespan());
}
