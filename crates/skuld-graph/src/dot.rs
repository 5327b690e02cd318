//! Graphviz projection of the dependency graph.
//!
//! A pure read-only view: nodes clustered by wire, time flowing left to
//! right, temporal edges solid, entanglement edges dashed, measurement
//! and classical edges dotted.

use std::fmt::Write as _;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::graph::{DepGraph, NodeIndex};
use crate::node::{DepNode, EdgeKind};

/// Options controlling the DOT projection.
#[derive(Debug, Clone, Default)]
pub struct DotOptions {
    /// Cap on rendered nodes, ordered by (time, line, wire, action).
    pub max_nodes: Option<usize>,
    /// Nodes filled light gray, typically the current slice.
    pub highlight: FxHashSet<NodeIndex>,
}

/// Render the graph as Graphviz DOT.
pub fn render_dot(graph: &DepGraph, options: &DotOptions) -> String {
    let mut ordered: Vec<(NodeIndex, &DepNode)> = graph.nodes().collect();
    ordered.sort_by(|(_, a), (_, b)| {
        (a.time(), a.line(), a.wire(), a.action_name())
            .cmp(&(b.time(), b.line(), b.wire(), b.action_name()))
    });
    if let Some(cap) = options.max_nodes {
        ordered.truncate(cap);
    }
    let included: FxHashSet<NodeIndex> = ordered.iter().map(|(idx, _)| *idx).collect();

    let mut by_wire: FxHashMap<&str, Vec<(NodeIndex, &DepNode)>> = FxHashMap::default();
    for &(idx, node) in &ordered {
        by_wire.entry(node.wire()).or_default().push((idx, node));
    }
    let mut wires: Vec<&str> = by_wire.keys().copied().collect();
    wires.sort_by_key(|w| wire_sort_key(w));

    let mut out = String::new();
    out.push_str("digraph skuld {\n");
    out.push_str("  rankdir=LR;\n");
    out.push_str("  compound=true;\n");
    out.push_str("  node [shape=box, fontsize=10];\n");
    out.push_str("  graph [fontsize=12];\n");

    for (cluster, wire) in wires.iter().enumerate() {
        let _ = writeln!(out, "  subgraph cluster_w{cluster} {{");
        out.push_str("    style=\"rounded\";\n");
        let _ = writeln!(out, "    label=\"{}\";", escape(wire));

        let mut members = by_wire[wire].clone();
        members.sort_by(|(_, a), (_, b)| {
            (a.time(), a.line(), a.action_name()).cmp(&(b.time(), b.line(), b.action_name()))
        });

        for &(idx, node) in &members {
            let style = if options.highlight.contains(&idx) {
                "style=\"filled\", fillcolor=\"lightgray\""
            } else {
                "style=\"solid\""
            };
            let _ = writeln!(
                out,
                "    n{} [{style}, label=\"{}\"];",
                idx.index(),
                escape(&node_label(node))
            );
        }

        // Invisible edges keep temporal order within the wire.
        for pair in members.windows(2) {
            let _ = writeln!(
                out,
                "    n{} -> n{} [style=invis, weight=10];",
                pair[0].0.index(),
                pair[1].0.index()
            );
        }

        out.push_str("  }\n");
    }

    for (src, dst, kind) in graph.edges() {
        if !included.contains(&src) || !included.contains(&dst) {
            continue;
        }
        let style = match kind {
            EdgeKind::Temporal => "[style=\"solid\"]",
            EdgeKind::Entanglement => "[style=\"dashed\", penwidth=2]",
            EdgeKind::Measurement | EdgeKind::QuantumToClassical => "[style=\"dotted\"]",
        };
        let _ = writeln!(out, "  n{} -> n{} {style};", src.index(), dst.index());
    }

    out.push_str("}\n");
    out
}

/// Compact node label; the cluster already names the wire.
fn node_label(node: &DepNode) -> String {
    let gate = node.gate();
    if gate.is_empty() {
        node.action_name().to_string()
    } else {
        format!("{} {gate}", node.action_name())
    }
}

fn escape(text: &str) -> String {
    text.replace('"', "\\\"")
}

/// Sort wires so array elements stay together in index order.
fn wire_sort_key(wire: &str) -> (String, u32) {
    if let Some(open) = wire.find('[') {
        if let Ok(index) = wire[open + 1..wire.len() - 1].parse::<u32>() {
            return (wire[..open].to_string(), index);
        }
    }
    (wire.to_string(), 0)
}
