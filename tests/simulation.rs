use std::collections::BTreeMap;

use critpath::errors::CritpathError;
use critpath::graph::Graph;
use critpath::plan::{Plan, Timing};
use critpath::priority::compute_priorities;
use critpath::{PlanOptions, schedule};
use critpath_test_utils::builders::{TestGraphBuilder, chain};
use critpath_test_utils::init_tracing;

fn options(n_jobs: usize) -> PlanOptions {
    PlanOptions {
        n_jobs,
        default_runtime: None,
    }
}

#[test]
fn test_linear_chain_single_worker() {
    init_tracing();
    let graph = chain(&[10, 20, 30]);
    let timeline = schedule(&graph, &options(1)).unwrap();

    assert_eq!(
        timeline.start_times(),
        BTreeMap::from([(0, 0), (1, 10), (2, 30)])
    );
    assert_eq!(timeline.makespan(), 60);
}

#[test]
fn test_independent_edges_run_in_parallel() {
    let graph = TestGraphBuilder::new()
        .edge(0, &[], &["a"], 5)
        .edge(1, &[], &["b"], 3)
        .build();
    let timeline = schedule(&graph, &options(2)).unwrap();

    assert_eq!(timeline.start_time(0), Some(0));
    assert_eq!(timeline.start_time(1), Some(0));
    assert_eq!(timeline.makespan(), 5);
}

#[test]
fn test_single_worker_runs_longest_critical_path_first() {
    let graph = TestGraphBuilder::new()
        .edge(0, &[], &[], 2)
        .edge(1, &[], &[], 10)
        .edge(2, &[], &[], 4)
        .build();
    let timeline = schedule(&graph, &options(1)).unwrap();

    assert_eq!(
        timeline.start_times(),
        BTreeMap::from([(1, 0), (2, 10), (0, 14)])
    );
}

#[test]
fn test_limited_workers_fill_slots_in_priority_order() {
    let graph = TestGraphBuilder::new()
        .edge(0, &[], &[], 2)
        .edge(1, &[], &[], 10)
        .edge(2, &[], &[], 4)
        .build();
    let timeline = schedule(&graph, &options(2)).unwrap();

    assert_eq!(timeline.start_time(1), Some(0));
    assert_eq!(timeline.start_time(2), Some(0));
    assert_eq!(timeline.start_time(0), Some(4));
    assert_eq!(timeline.makespan(), 10);
}

#[test]
fn test_diamond_with_two_workers() {
    let graph = TestGraphBuilder::new()
        .edge(0, &[], &["a"], 1)
        .edge(1, &["a"], &["b"], 10)
        .edge(2, &["a"], &["c"], 2)
        .edge(3, &["b", "c"], &["d"], 3)
        .build();
    let timeline = schedule(&graph, &options(2)).unwrap();

    assert_eq!(timeline.timing(0), Some(Timing { start: 0, finish: 1 }));
    assert_eq!(timeline.timing(1), Some(Timing { start: 1, finish: 11 }));
    assert_eq!(timeline.timing(2), Some(Timing { start: 1, finish: 3 }));
    assert_eq!(timeline.timing(3), Some(Timing { start: 11, finish: 14 }));
}

#[test]
fn test_simultaneous_completions_release_together() {
    let graph = TestGraphBuilder::new()
        .edge(0, &[], &["a"], 4)
        .edge(1, &[], &["b"], 4)
        .edge(2, &["a"], &[], 1)
        .edge(3, &["b"], &[], 1)
        .build();
    let timeline = schedule(&graph, &options(2)).unwrap();

    assert_eq!(timeline.start_time(2), Some(4));
    assert_eq!(timeline.start_time(3), Some(4));
}

#[test]
fn test_actual_runtime_drives_clock_not_estimate() {
    // Estimates say e0 is quick, but it really takes 50.
    let graph = TestGraphBuilder::new()
        .edge_with(0, &[], &["a"], Some(1), 50)
        .edge(1, &["a"], &[], 1)
        .build();
    let timeline = schedule(&graph, &options(1)).unwrap();

    assert_eq!(timeline.start_time(1), Some(50));
}

#[test]
fn test_zero_runtime_edges_complete_immediately() {
    let graph = TestGraphBuilder::new()
        .edge(0, &[], &["a"], 0)
        .edge(1, &["a"], &["b"], 0)
        .edge(2, &["b"], &[], 3)
        .build();
    let timeline = schedule(&graph, &options(1)).unwrap();

    assert_eq!(
        timeline.start_times(),
        BTreeMap::from([(0, 0), (1, 0), (2, 0)])
    );
    assert_eq!(timeline.makespan(), 3);
}

#[test]
fn test_every_edge_finishes_exactly_once() {
    let graph = TestGraphBuilder::new()
        .edge(0, &[], &["a", "b"], 2)
        .edge(1, &["a"], &["c"], 3)
        .edge(2, &["b"], &["d"], 1)
        .edge(3, &["c", "d"], &[], 2)
        .edge(4, &[], &[], 7)
        .build();
    let prio = compute_priorities(&graph, 1).unwrap();
    let mut plan = Plan::new(&graph, &prio);
    let timeline = plan.execute(3).unwrap();

    assert_eq!(timeline.len(), graph.edge_count());
    assert_eq!(plan.finished_count(), graph.edge_count());
    assert_eq!(plan.ready_len(), 0);
}

#[test]
fn test_schedule_start_order() {
    let graph = chain(&[1, 1, 1]);
    let timeline = schedule(&graph, &options(1)).unwrap();

    let ids: Vec<u64> = timeline.in_start_order().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn test_empty_graph_yields_empty_schedule() {
    let graph = Graph::default();
    let timeline = schedule(&graph, &options(4)).unwrap();

    assert!(timeline.is_empty());
    assert_eq!(timeline.makespan(), 0);
}

#[test]
fn test_zero_jobs_is_rejected() {
    let graph = chain(&[1]);
    let prio = compute_priorities(&graph, 1).unwrap();
    let mut plan = Plan::new(&graph, &prio);

    match plan.execute(0) {
        Err(CritpathError::InvalidJobs(0)) => {}
        other => panic!("Expected InvalidJobs, got: {:?}", other),
    }
}

#[test]
fn test_clock_overflow_is_reported() {
    let graph = TestGraphBuilder::new()
        .edge_with(0, &[], &["a"], Some(1), u64::MAX)
        .edge_with(1, &["a"], &[], Some(1), 1)
        .build();

    match schedule(&graph, &options(1)) {
        Err(CritpathError::ClockOverflow { edge_id }) => assert_eq!(edge_id, 1),
        other => panic!("Expected ClockOverflow, got: {:?}", other),
    }
}
