use critpath::errors::CritpathError;
use critpath::graph::{EdgeIdx, EdgeSpec, Graph, GraphBuilder};
use critpath::priority::{compute_priorities, relax_critical_times};
use critpath_test_utils::builders::{TestGraphBuilder, chain};
use critpath_test_utils::init_tracing;

fn idx(graph: &Graph, id: u64) -> EdgeIdx {
    graph.find_edge(id).expect("edge id should exist")
}

/// e0 -> a; e1: a -> b; e2: a -> c; e3: b, c -> d
fn diamond() -> Graph {
    TestGraphBuilder::new()
        .edge(0, &[], &["a"], 1)
        .edge(1, &["a"], &["b"], 10)
        .edge(2, &["a"], &["c"], 2)
        .edge(3, &["b", "c"], &["d"], 3)
        .build()
}

#[test]
fn test_diamond_critical_times() {
    init_tracing();
    let graph = diamond();
    let prio = compute_priorities(&graph, 1).unwrap();

    assert_eq!(prio.critical_time(idx(&graph, 3)), 3);
    assert_eq!(prio.critical_time(idx(&graph, 1)), 13);
    assert_eq!(prio.critical_time(idx(&graph, 2)), 5);
    assert_eq!(prio.critical_time(idx(&graph, 0)), 14);
}

#[test]
fn test_diamond_encoded_priorities() {
    let graph = diamond();
    let prio = compute_priorities(&graph, 1).unwrap();

    // M = 4; priority = critical * 4 + (3 - id)
    assert_eq!(prio.priority(idx(&graph, 0)), 59);
    assert_eq!(prio.priority(idx(&graph, 1)), 54);
    assert_eq!(prio.priority(idx(&graph, 2)), 21);
    assert_eq!(prio.priority(idx(&graph, 3)), 12);
}

#[test]
fn test_equal_critical_time_prefers_smaller_id() {
    let graph = TestGraphBuilder::new()
        .edge(7, &[], &["x"], 5)
        .edge(3, &[], &["y"], 5)
        .build();
    let prio = compute_priorities(&graph, 1).unwrap();

    assert_eq!(prio.critical_time(idx(&graph, 3)), prio.critical_time(idx(&graph, 7)));
    // M = 8: id 3 -> 5 * 8 + 4, id 7 -> 5 * 8 + 0
    assert_eq!(prio.priority(idx(&graph, 3)), 44);
    assert_eq!(prio.priority(idx(&graph, 7)), 40);
}

#[test]
fn test_longer_critical_time_beats_smaller_id() {
    let graph = TestGraphBuilder::new()
        .edge(0, &[], &["x"], 1)
        .edge(9, &[], &["y"], 2)
        .build();
    let prio = compute_priorities(&graph, 1).unwrap();

    assert!(prio.priority(idx(&graph, 9)) > prio.priority(idx(&graph, 0)));
}

#[test]
fn test_missing_estimate_uses_default_runtime() {
    let graph = TestGraphBuilder::new()
        .edge_with(0, &[], &["a"], None, 100)
        .edge(1, &["a"], &["b"], 4)
        .build();
    let prio = compute_priorities(&graph, 6).unwrap();

    assert_eq!(prio.critical_time(idx(&graph, 1)), 4);
    assert_eq!(prio.critical_time(idx(&graph, 0)), 10);
}

#[test]
fn test_critical_time_follows_longest_downstream_chain() {
    // e0 feeds a short sink and a long chain; the long chain wins.
    let graph = TestGraphBuilder::new()
        .edge(0, &[], &["a"], 2)
        .edge(1, &["a"], &[], 1)
        .edge(2, &["a"], &["b"], 3)
        .edge(3, &["b"], &["c"], 3)
        .edge(4, &["c"], &[], 3)
        .build();
    let prio = compute_priorities(&graph, 1).unwrap();

    assert_eq!(prio.critical_time(idx(&graph, 1)), 1);
    assert_eq!(prio.critical_time(idx(&graph, 2)), 9);
    assert_eq!(prio.critical_time(idx(&graph, 0)), 11);
}

#[test]
fn test_relaxation_is_idempotent() {
    let graph = diamond();
    let prio = compute_priorities(&graph, 1).unwrap();

    let mut critical = prio.critical_times().to_vec();
    let updates = relax_critical_times(&graph, 1, &mut critical).unwrap();

    assert_eq!(updates, 0);
    assert_eq!(critical, prio.critical_times());
    assert_eq!(compute_priorities(&graph, 1).unwrap(), prio);
}

#[test]
fn test_cycle_is_rejected() {
    let mut builder = GraphBuilder::new();
    let a = builder.node("a");
    let b = builder.node("b");
    builder
        .add_edge(EdgeSpec::new(0).input(b).output(a).actual(1))
        .unwrap();
    builder
        .add_edge(EdgeSpec::new(1).input(a).output(b).actual(1))
        .unwrap();
    let graph = builder.build();

    match compute_priorities(&graph, 1) {
        Err(CritpathError::Cycle { edge_id }) => assert!(edge_id == 0 || edge_id == 1),
        other => panic!("Expected Cycle error, got: {:?}", other),
    }
}

#[test]
fn test_transitive_cycle_is_rejected() {
    // x -> e0 -> y -> e1 -> z -> e2 -> x
    let mut builder = GraphBuilder::new();
    let x = builder.node("x");
    let y = builder.node("y");
    let z = builder.node("z");
    let upstream = builder.node("upstream");
    builder
        .add_edge(EdgeSpec::new(0).input(x).input(upstream).output(y).actual(1))
        .unwrap();
    builder
        .add_edge(EdgeSpec::new(1).input(y).output(z).actual(1))
        .unwrap();
    builder
        .add_edge(EdgeSpec::new(2).input(z).output(x).actual(1))
        .unwrap();
    let graph = builder.build();

    let err = compute_priorities(&graph, 1).unwrap_err();
    assert!(matches!(err, CritpathError::Cycle { .. }));
    assert!(err.to_string().contains("Cycle detected"));
}

#[test]
fn test_self_loop_is_rejected() {
    let mut builder = GraphBuilder::new();
    let n = builder.node("n");
    builder
        .add_edge(EdgeSpec::new(5).input(n).output(n).actual(1))
        .unwrap();
    let graph = builder.build();

    match compute_priorities(&graph, 1) {
        Err(CritpathError::Cycle { edge_id }) => assert_eq!(edge_id, 5),
        other => panic!("Expected Cycle error, got: {:?}", other),
    }
}

#[test]
fn test_empty_graph_has_no_priorities() {
    let graph = Graph::default();
    let prio = compute_priorities(&graph, 1).unwrap();
    assert!(prio.is_empty());
}

#[test]
fn test_overflow_is_reported() {
    let graph = TestGraphBuilder::new()
        .edge_with(0, &[], &["a"], Some(u64::MAX), 1)
        .edge_with(1, &["a"], &[], Some(u64::MAX), 1)
        .build();

    match compute_priorities(&graph, 1) {
        Err(CritpathError::PriorityOverflow { edge_id }) => assert_eq!(edge_id, 0),
        other => panic!("Expected PriorityOverflow, got: {:?}", other),
    }
}

#[test]
fn test_chain_priorities_decrease_downstream() {
    let graph = chain(&[10, 20, 30]);
    let prio = compute_priorities(&graph, 1).unwrap();

    assert_eq!(prio.critical_time(idx(&graph, 0)), 60);
    assert_eq!(prio.critical_time(idx(&graph, 1)), 50);
    assert_eq!(prio.critical_time(idx(&graph, 2)), 30);
    assert!(prio.priority(idx(&graph, 0)) > prio.priority(idx(&graph, 1)));
    assert!(prio.priority(idx(&graph, 1)) > prio.priority(idx(&graph, 2)));
}
