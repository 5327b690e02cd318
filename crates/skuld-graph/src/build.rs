//! Building the dependency graph from a trace.

use rustc_hash::FxHashMap;
use tracing::debug;

use skuld_trace::{Action, ActionKind, Trace};

use crate::graph::{DepGraph, NodeIndex};
use crate::node::{DefNode, DepNode, EdgeKind, OpNode};

/// Build the dependency graph of a trace.
///
/// Per wire, consecutive actions (ordered by time, then line) are linked
/// with temporal edges. Actions sharing one (time, line) couple through
/// entanglement edges. Measurements additionally receive an explicit
/// edge from their wire predecessor and feed a classical-definition node
/// keyed by their destination store.
///
/// The trace is borrowed immutably; one trace can serve any number of
/// independent graph builds.
pub fn build_graph(trace: &Trace) -> DepGraph {
    let mut graph = DepGraph::new();
    let mut last_on_wire: FxHashMap<String, NodeIndex> = FxHashMap::default();
    let mut groups: FxHashMap<(u32, u32), Vec<(NodeIndex, ActionKind)>> = FxHashMap::default();
    let mut group_order: Vec<(u32, u32)> = Vec::new();
    let mut defs: FxHashMap<String, NodeIndex> = FxHashMap::default();

    for (id, wire) in trace.iter() {
        let mut actions: Vec<&Action> = wire.actions.iter().collect();
        actions.sort_by_key(|a| (a.time, a.line));

        for action in actions {
            let node = graph.add_node(DepNode::Op(OpNode {
                wire: id.to_string(),
                time: action.time,
                line: action.line,
                action: action.kind,
                gate: action.gate.clone().unwrap_or_default(),
                local: action.local.clone().unwrap_or_default(),
            }));

            if let Some(&prev) = last_on_wire.get(id) {
                graph.add_edge(prev, node, EdgeKind::Temporal);
                if action.kind == ActionKind::Measure {
                    // The wire predecessor feeds the measurement
                    // explicitly, on top of the temporal order.
                    graph.add_edge(prev, node, EdgeKind::Measurement);
                }
            }
            last_on_wire.insert(id.to_string(), node);

            if action.kind == ActionKind::Measure {
                if let Some(store) = &action.store {
                    let def = graph.add_node(DepNode::ClassicalDef(DefNode {
                        store: store.clone(),
                        time: action.time,
                        line: action.line,
                    }));
                    graph.add_edge(node, def, EdgeKind::QuantumToClassical);
                    defs.insert(store.clone(), def);
                }
            } else {
                // Measurements stay out of entanglement grouping; their
                // coupling is the measurement edge above.
                let key = (action.time, action.line);
                if !groups.contains_key(&key) {
                    group_order.push(key);
                }
                groups.entry(key).or_default().push((node, action.kind));
            }
        }
    }

    add_entanglement_edges(&mut graph, &groups, &group_order);

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "built dependency graph"
    );
    graph
}

/// Couple participants of each (time, line) group.
///
/// Groups with at least one control and one target connect every
/// ctrl-target pair in both directions. A mixed group that does not
/// classify falls back to fully connecting all pairs; coupling is never
/// silently dropped.
fn add_entanglement_edges(
    graph: &mut DepGraph,
    groups: &FxHashMap<(u32, u32), Vec<(NodeIndex, ActionKind)>>,
    group_order: &[(u32, u32)],
) {
    for key in group_order {
        let members = &groups[key];
        if members.len() < 2 {
            continue;
        }
        let ctrls: Vec<NodeIndex> = members
            .iter()
            .filter(|(_, kind)| *kind == ActionKind::Ctrl)
            .map(|(idx, _)| *idx)
            .collect();
        let targets: Vec<NodeIndex> = members
            .iter()
            .filter(|(_, kind)| *kind == ActionKind::CtrlGateCall)
            .map(|(idx, _)| *idx)
            .collect();

        if !ctrls.is_empty() && !targets.is_empty() {
            for &c in &ctrls {
                for &t in &targets {
                    graph.add_edge(c, t, EdgeKind::Entanglement);
                    graph.add_edge(t, c, EdgeKind::Entanglement);
                }
            }
        } else {
            for i in 0..members.len() {
                for j in i + 1..members.len() {
                    graph.add_edge(members[i].0, members[j].0, EdgeKind::Entanglement);
                    graph.add_edge(members[j].0, members[i].0, EdgeKind::Entanglement);
                }
            }
        }
    }
}
