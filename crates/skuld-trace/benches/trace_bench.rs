//! Benchmarks for trace construction
//!
//! Run with: cargo bench -p skuld-trace

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use skuld_ast::{CallStmt, Expression, Program, Range, RegRef, Stmt, StmtKind};
use skuld_trace::build_trace;

/// GHZ-style program: `h q[0]` then a chain of `cx q[i], q[i+1]`.
fn ghz_program(n: u32) -> Program {
    let elem = |i: u32| RegRef::indexed("q", Expression::Int(i64::from(i)));
    let mut statements = vec![
        Stmt::new(
            1,
            StmtKind::QubitDecl {
                name: "q".into(),
                size: Some(Expression::Int(i64::from(n))),
            },
        ),
        Stmt::new(
            2,
            StmtKind::Call(CallStmt {
                name: "h".into(),
                modifiers: vec![],
                qargs: vec![elem(0)],
            }),
        ),
    ];
    for i in 0..n - 1 {
        statements.push(Stmt::new(
            3 + i,
            StmtKind::Call(CallStmt {
                name: "cx".into(),
                modifiers: vec![],
                qargs: vec![elem(i), elem(i + 1)],
            }),
        ));
    }
    Program { statements }
}

/// Loop-heavy program exercising the unroller.
fn unroll_program(iterations: i64) -> Program {
    Program {
        statements: vec![
            Stmt::new(
                1,
                StmtKind::QubitDecl {
                    name: "q".into(),
                    size: Some(Expression::Int(8)),
                },
            ),
            Stmt::new(
                2,
                StmtKind::For {
                    variable: "i".into(),
                    range: Range {
                        start: Expression::Int(0),
                        end: Expression::Int(7),
                        step: None,
                    },
                    body: (0..iterations)
                        .map(|k| {
                            Stmt::new(
                                3 + k as u32,
                                StmtKind::Call(CallStmt {
                                    name: "h".into(),
                                    modifiers: vec![],
                                    qargs: vec![RegRef::indexed("q", Expression::ident("i"))],
                                }),
                            )
                        })
                        .collect(),
                },
            ),
        ],
    }
}

fn bench_trace_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_build");

    for num_qubits in &[4u32, 16, 64] {
        let program = ghz_program(*num_qubits);
        group.bench_with_input(
            BenchmarkId::new("ghz", num_qubits),
            &program,
            |b, program| {
                b.iter(|| build_trace(black_box(program)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_loop_unrolling(c: &mut Criterion) {
    let mut group = c.benchmark_group("loop_unrolling");

    for body_len in &[1i64, 8, 32] {
        let program = unroll_program(*body_len);
        group.bench_with_input(
            BenchmarkId::new("unroll", body_len),
            &program,
            |b, program| {
                b.iter(|| build_trace(black_box(program)).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_trace_build, bench_loop_unrolling);
criterion_main!(benches);
