//! CLI-level flow tests.
//!
//! The binary's commands are thin wrappers over the library crates; the
//! file-level flows are exercised here through the same crates, with the
//! program interchange format pinned as a raw JSON literal.

use std::fs;

use skuld_ast::Program;
use skuld_graph::{DotOptions, build_graph, export_graph, import_graph, render_dot};
use skuld_slice::{Criterion, Direction, export_slice, slice};
use skuld_trace::{Trace, TraceBuilder};

/// qubit a; cx a, $0; c = measure $0;  — as the serialized tree the
/// `trace` command consumes.
const PROGRAM_JSON: &str = r#"{
  "statements": [
    { "line": 1, "kind": { "QubitDecl": { "name": "a", "size": null } } },
    { "line": 10, "kind": { "Call": {
        "name": "cx",
        "modifiers": [],
        "qargs": [
          { "register": "a", "select": "All" },
          { "register": "$0", "select": "All" }
        ] } } },
    { "line": 11, "kind": { "MeasureAssign": {
        "store": "c",
        "target": { "register": "$0", "select": "All" } } } }
  ]
}"#;

#[test]
fn test_program_json_interchange_parses() {
    let program: Program = serde_json::from_str(PROGRAM_JSON).unwrap();
    assert_eq!(program.statements.len(), 3);
}

#[test]
fn test_trace_file_flow() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("program.json");
    let out = dir.path().join("trace.json");
    fs::write(&input, PROGRAM_JSON).unwrap();

    // trace command equivalent
    let source = fs::read_to_string(&input).unwrap();
    let program: Program = serde_json::from_str(&source).unwrap();
    let mut trace = TraceBuilder::with_physical_wires(6).build(&program).unwrap();
    trace.set_source(input.to_string_lossy());
    fs::write(
        &out,
        serde_json::to_string_pretty(&trace.to_json().unwrap()).unwrap(),
    )
    .unwrap();

    // The written trace reloads to the same wires.
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let reloaded = Trace::from_json(&value).unwrap();
    assert!(reloaded.contains("a"));
    assert!(reloaded.contains("$0"));
    assert_eq!(reloaded.get("$0").unwrap().actions.len(), 2);
    assert!(reloaded.source().unwrap().ends_with("program.json"));
}

#[test]
fn test_slice_file_flow() {
    let program: Program = serde_json::from_str(PROGRAM_JSON).unwrap();
    let trace = TraceBuilder::with_physical_wires(6).build(&program).unwrap();
    let graph = build_graph(&trace);

    let criterion = Criterion::new().with_wire("$0").with_action("measure");
    let result = slice(&graph, &criterion, Direction::Backward).unwrap();
    let export = export_slice(&graph, &result, &criterion, true);

    // Success reporting surfaces matches and slice size.
    assert_eq!(export.criterion.matched_nodes.len(), 1);
    assert!(export.slice_actions.len() >= 3);
    assert!(export.slice_lines.contains(&10));

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("slice.json");
    fs::write(&out, serde_json::to_string_pretty(&export).unwrap()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["criterion"]["direction"], "backward");
    assert!(value["slice_actions"][0].get("reason_path").is_some());
}

#[test]
fn test_graph_file_flow_with_dot() {
    let program: Program = serde_json::from_str(PROGRAM_JSON).unwrap();
    let trace = TraceBuilder::with_physical_wires(6).build(&program).unwrap();
    let graph = build_graph(&trace);

    let dir = tempfile::tempdir().unwrap();
    let json_out = dir.path().join("graph.json");
    let dot_out = dir.path().join("graph.dot");

    let export = export_graph(&graph);
    fs::write(&json_out, serde_json::to_string_pretty(&export).unwrap()).unwrap();
    fs::write(&dot_out, render_dot(&graph, &DotOptions::default())).unwrap();

    let reloaded: skuld_graph::GraphExport =
        serde_json::from_str(&fs::read_to_string(&json_out).unwrap()).unwrap();
    let back = import_graph(&reloaded).unwrap();
    assert_eq!(back.node_count(), graph.node_count());
    assert_eq!(back.edge_count(), graph.edge_count());

    let dot = fs::read_to_string(&dot_out).unwrap();
    assert!(dot.contains("digraph skuld"));
}

#[test]
fn test_empty_criterion_fails_the_run() {
    let program: Program = serde_json::from_str(PROGRAM_JSON).unwrap();
    let trace = TraceBuilder::with_physical_wires(6).build(&program).unwrap();
    let graph = build_graph(&trace);

    let criterion = Criterion::new().with_wire("nowhere");
    let err = slice(&graph, &criterion, Direction::Backward).unwrap_err();
    assert!(err.to_string().contains("No nodes matched"));
}
