//! Property-based tests for trace construction.
//!
//! Checks the timeline invariants over randomly generated gate sequences:
//! per-wire times never decrease, rebuilding is deterministic, and array
//! broadcasting produces exactly one duplicate per element.

use proptest::prelude::*;
use skuld_ast::{CallStmt, Expression, Program, RegRef, Stmt, StmtKind};
use skuld_trace::{ActionKind, build_trace};

const REG_SIZE: u32 = 4;

/// Gate operations over a fixed `qubit[4] q` register.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    Cx(u32, u32),
    Swap(u32, u32),
    Measure(u32),
    BroadcastH,
}

impl GateOp {
    fn to_stmt(&self, line: u32) -> Stmt {
        let elem = |i: u32| RegRef::indexed("q", Expression::Int(i64::from(i)));
        match self {
            GateOp::H(i) => Stmt::new(
                line,
                StmtKind::Call(CallStmt {
                    name: "h".into(),
                    modifiers: vec![],
                    qargs: vec![elem(*i)],
                }),
            ),
            GateOp::X(i) => Stmt::new(
                line,
                StmtKind::Call(CallStmt {
                    name: "x".into(),
                    modifiers: vec![],
                    qargs: vec![elem(*i)],
                }),
            ),
            GateOp::Cx(c, t) => Stmt::new(
                line,
                StmtKind::Call(CallStmt {
                    name: "cx".into(),
                    modifiers: vec![],
                    qargs: vec![elem(*c), elem(*t)],
                }),
            ),
            GateOp::Swap(a, b) => Stmt::new(
                line,
                StmtKind::Call(CallStmt {
                    name: "swap".into(),
                    modifiers: vec![],
                    qargs: vec![elem(*a), elem(*b)],
                }),
            ),
            GateOp::Measure(i) => Stmt::new(
                line,
                StmtKind::MeasureAssign {
                    store: "c".into(),
                    target: elem(*i),
                },
            ),
            GateOp::BroadcastH => Stmt::new(
                line,
                StmtKind::Call(CallStmt {
                    name: "h".into(),
                    modifiers: vec![],
                    qargs: vec![RegRef::whole("q")],
                }),
            ),
        }
    }
}

fn arb_gate_op() -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (0..REG_SIZE).prop_map(GateOp::H),
        (0..REG_SIZE).prop_map(GateOp::X),
        (0..REG_SIZE, 0..REG_SIZE).prop_map(|(c, t)| GateOp::Cx(c, t)),
        (0..REG_SIZE, 0..REG_SIZE).prop_map(|(a, b)| GateOp::Swap(a, b)),
        (0..REG_SIZE).prop_map(GateOp::Measure),
        Just(GateOp::BroadcastH),
    ]
}

fn arb_program() -> impl Strategy<Value = Program> {
    prop::collection::vec(arb_gate_op(), 1..=20).prop_map(|ops| {
        let mut statements = vec![Stmt::new(
            1,
            StmtKind::QubitDecl {
                name: "q".into(),
                size: Some(Expression::Int(i64::from(REG_SIZE))),
            },
        )];
        for (i, op) in ops.iter().enumerate() {
            statements.push(op.to_stmt(2 + i as u32));
        }
        Program { statements }
    })
}

proptest! {
    #[test]
    fn prop_wire_times_never_decrease(program in arb_program()) {
        let trace = build_trace(&program).unwrap();
        for (id, wire) in trace.iter() {
            for pair in wire.actions.windows(2) {
                prop_assert!(
                    pair[0].time <= pair[1].time,
                    "times decreased on wire {id}"
                );
            }
        }
    }

    #[test]
    fn prop_build_is_deterministic(program in arb_program()) {
        let first = build_trace(&program).unwrap();
        let second = build_trace(&program).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_broadcast_duplicates_per_element(ops in prop::collection::vec(Just(GateOp::BroadcastH), 1..=4)) {
        let mut statements = vec![Stmt::new(
            1,
            StmtKind::QubitDecl {
                name: "q".into(),
                size: Some(Expression::Int(i64::from(REG_SIZE))),
            },
        )];
        for (i, op) in ops.iter().enumerate() {
            statements.push(op.to_stmt(2 + i as u32));
        }
        let trace = build_trace(&Program { statements }).unwrap();

        // Every broadcast lands exactly once on every element, at a
        // distinct time per duplicate.
        let mut all_times = Vec::new();
        for i in 0..REG_SIZE {
            let wire = trace.get(&format!("q[{i}]")).unwrap();
            prop_assert_eq!(wire.actions.len(), ops.len());
            for action in &wire.actions {
                prop_assert_eq!(action.kind, ActionKind::GateCall);
                all_times.push(action.time);
            }
        }
        all_times.sort_unstable();
        all_times.dedup();
        prop_assert_eq!(all_times.len(), ops.len() * REG_SIZE as usize);
    }

    #[test]
    fn prop_lineage_pairs_ctrl_with_target(program in arb_program()) {
        let trace = build_trace(&program).unwrap();
        // Every ctrl-gate-call from a cx names exactly its paired control.
        for (_, wire) in trace.iter() {
            for action in &wire.actions {
                if action.kind == ActionKind::CtrlGateCall {
                    let lineage = action.lineage.as_deref().unwrap_or("");
                    prop_assert!(!lineage.is_empty(), "controlled gate without lineage");
                }
            }
        }
    }
}
