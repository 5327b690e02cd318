//! End-to-end pipeline tests: program tree -> trace -> graph -> slice.

use skuld_ast::{CallStmt, Expression, Program, RegRef, Stmt, StmtKind};
use skuld_graph::{build_graph, export_graph, import_graph};
use skuld_slice::{Criterion, Direction, slice};
use skuld_trace::{ActionKind, build_trace};

fn elem(register: &str, i: i64) -> RegRef {
    RegRef::indexed(register, Expression::Int(i))
}

fn gate(line: u32, name: &str, qargs: Vec<RegRef>) -> Stmt {
    Stmt::new(
        line,
        StmtKind::Call(CallStmt {
            name: name.into(),
            modifiers: vec![],
            qargs,
        }),
    )
}

/// qubit[2] q; qubit m; h q[0]; cx q[0], q[1]; cx q[1], m; c = measure m;
fn teleport_like_program() -> Program {
    Program {
        statements: vec![
            Stmt::new(
                1,
                StmtKind::QubitDecl {
                    name: "q".into(),
                    size: Some(Expression::Int(2)),
                },
            ),
            Stmt::new(
                2,
                StmtKind::QubitDecl {
                    name: "m".into(),
                    size: None,
                },
            ),
            gate(3, "h", vec![elem("q", 0)]),
            gate(4, "cx", vec![elem("q", 0), elem("q", 1)]),
            gate(5, "cx", vec![elem("q", 1), RegRef::whole("m")]),
            Stmt::new(
                6,
                StmtKind::MeasureAssign {
                    store: "c".into(),
                    target: RegRef::whole("m"),
                },
            ),
        ],
    }
}

#[test]
fn test_backward_slice_from_measure_crosses_the_whole_chain() {
    let trace = build_trace(&teleport_like_program()).unwrap();
    let graph = build_graph(&trace);

    let criterion = Criterion::new().with_wire("m").with_action("measure");
    let result = slice(&graph, &criterion, Direction::Backward).unwrap();

    // The nearest prior non-measure action on m is reached through the
    // explicit measurement edge.
    let predecessor = graph
        .nodes()
        .find(|(_, n)| n.wire() == "m" && n.action_name() == "ctrl-gate-call")
        .map(|(idx, _)| idx)
        .unwrap();
    assert!(result.contains(predecessor));
    let explanation = result.explanation(predecessor).unwrap();
    assert_eq!(explanation.reason.as_str(), "measurement");
    assert_eq!(explanation.direction, Direction::Backward);

    // Entanglement carries the slice across to the h on q[0].
    let h = graph
        .nodes()
        .find(|(_, n)| n.gate() == "h")
        .map(|(idx, _)| idx)
        .unwrap();
    assert!(result.contains(h));
}

#[test]
fn test_forward_slice_from_h_reaches_classical_definition() {
    let trace = build_trace(&teleport_like_program()).unwrap();
    let graph = build_graph(&trace);

    let criterion = Criterion::new().with_gate("h");
    let result = slice(&graph, &criterion, Direction::Forward).unwrap();

    let def = graph
        .nodes()
        .find(|(_, n)| n.action_name() == "def")
        .map(|(idx, _)| idx)
        .unwrap();
    assert!(result.contains(def));
}

#[test]
fn test_trace_roundtrip_feeds_identical_graph() {
    let mut trace = build_trace(&teleport_like_program()).unwrap();
    trace.set_source("teleport.qasm");

    let json = trace.to_json().unwrap();
    let reloaded = skuld_trace::Trace::from_json(&json).unwrap();

    let first = build_graph(&trace);
    let second = build_graph(&reloaded);
    assert_eq!(first.node_count(), second.node_count());
    assert_eq!(first.edge_count(), second.edge_count());
    for (_, node) in first.nodes() {
        assert!(second.lookup(&node.key()).is_some());
    }
}

#[test]
fn test_graph_roundtrip_supports_slicing() {
    let trace = build_trace(&teleport_like_program()).unwrap();
    let graph = build_graph(&trace);
    let reloaded = import_graph(&export_graph(&graph)).unwrap();

    let criterion = Criterion::new().with_action("ctrl");
    let direct = slice(&graph, &criterion, Direction::Backward).unwrap();
    let indirect = slice(&reloaded, &criterion, Direction::Backward).unwrap();
    assert_eq!(direct.len(), indirect.len());
}

#[test]
fn test_ctrl_criterion_matches_every_control() {
    let trace = build_trace(&teleport_like_program()).unwrap();
    let graph = build_graph(&trace);

    let expected = trace
        .iter()
        .flat_map(|(_, w)| w.actions.iter())
        .filter(|a| a.kind == ActionKind::Ctrl)
        .count();

    let criterion = Criterion::new().with_action("ctrl");
    let result = slice(&graph, &criterion, Direction::Backward).unwrap();
    assert_eq!(result.seeds().len(), expected);
}
