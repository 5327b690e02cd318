//! Slice interchange shape.

use serde::{Deserialize, Serialize};

use skuld_graph::{DepGraph, NodeIndex};

use crate::criterion::{Criterion, Direction};
use crate::slicer::Slice;

/// Serialized slice: the touched wires/times/lines, every slice node
/// with its provenance, and the criterion echo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceExport {
    pub slice_wires: Vec<String>,
    pub slice_times: Vec<u32>,
    pub slice_lines: Vec<u32>,
    pub slice_actions: Vec<SliceEntry>,
    pub criterion: CriterionExport,
}

/// Compact node description used throughout the slice export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeBrief {
    pub wire: String,
    pub time: u32,
    pub line: u32,
    pub action: String,
    pub gate: String,
    pub local_name: String,
}

/// One slice node with its explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliceEntry {
    #[serde(flatten)]
    pub node: NodeBrief,
    /// `criterion` or the kind of the discovering edge.
    pub reason_type: String,
    /// Direction the slice was computed in.
    pub reason_direction: String,
    /// The discovering neighbor; `None` for criterion seeds.
    pub reason_neighbor: Option<NodeBrief>,
    /// Witness parent chain back to a criterion seed, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_path: Option<Vec<NodeBrief>>,
}

/// The criterion echoed into the output, with its matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionExport {
    pub wire: Option<String>,
    pub line: Option<u32>,
    pub time: Option<u32>,
    pub action: Option<String>,
    pub gate: Option<String>,
    pub direction: String,
    pub matched_nodes: Vec<NodeBrief>,
}

fn brief(graph: &DepGraph, idx: NodeIndex) -> NodeBrief {
    let node = graph.node(idx);
    NodeBrief {
        wire: node.wire().to_string(),
        time: node.time(),
        line: node.line(),
        action: node.action_name().to_string(),
        gate: node.gate().to_string(),
        local_name: node.local_name().to_string(),
    }
}

/// Render a computed slice into its interchange shape.
///
/// Entries are ordered by (time, line, wire, action); the wire, time and
/// line summaries are sorted and deduplicated.
pub fn export_slice(
    graph: &DepGraph,
    slice: &Slice,
    criterion: &Criterion,
    include_paths: bool,
) -> SliceExport {
    let mut ordered = slice.nodes().to_vec();
    ordered.sort_by(|&a, &b| {
        let na = graph.node(a);
        let nb = graph.node(b);
        (na.time(), na.line(), na.wire(), na.action_name()).cmp(&(
            nb.time(),
            nb.line(),
            nb.wire(),
            nb.action_name(),
        ))
    });

    let mut entries = Vec::with_capacity(ordered.len());
    for idx in &ordered {
        let explanation = slice
            .explanation(*idx)
            .expect("every slice node carries an explanation");
        entries.push(SliceEntry {
            node: brief(graph, *idx),
            reason_type: explanation.reason.as_str().to_string(),
            reason_direction: explanation.direction.as_str().to_string(),
            reason_neighbor: explanation.neighbor.map(|n| brief(graph, n)),
            reason_path: include_paths
                .then(|| slice.path(*idx).into_iter().map(|n| brief(graph, n)).collect()),
        });
    }

    let mut slice_wires: Vec<String> = entries.iter().map(|e| e.node.wire.clone()).collect();
    slice_wires.sort();
    slice_wires.dedup();
    let mut slice_times: Vec<u32> = entries.iter().map(|e| e.node.time).collect();
    slice_times.sort_unstable();
    slice_times.dedup();
    let mut slice_lines: Vec<u32> = entries.iter().map(|e| e.node.line).collect();
    slice_lines.sort_unstable();
    slice_lines.dedup();

    let mut matched = slice.seeds().to_vec();
    matched.sort_by(|&a, &b| {
        let na = graph.node(a);
        let nb = graph.node(b);
        (na.time(), na.line(), na.wire()).cmp(&(nb.time(), nb.line(), nb.wire()))
    });

    SliceExport {
        slice_wires,
        slice_times,
        slice_lines,
        slice_actions: entries,
        criterion: CriterionExport {
            wire: criterion.wire.clone(),
            line: criterion.line,
            time: criterion.time,
            action: criterion.action.clone(),
            gate: criterion.gate.clone(),
            direction: slice.direction().to_string(),
            matched_nodes: matched.into_iter().map(|idx| brief(graph, idx)).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slicer::slice;
    use skuld_graph::build_graph;
    use skuld_trace::{Action, ActionKind, Trace, Wire};

    fn sample() -> DepGraph {
        let mut trace = Trace::new();
        trace.declare("a", Wire::named());
        trace.declare("b", Wire::named());
        let mut h = Action::new(0, 1, ActionKind::GateCall);
        h.gate = Some("h".into());
        trace.record("a", h).unwrap();
        trace.record("a", Action::new(1, 2, ActionKind::Ctrl)).unwrap();
        let mut cx = Action::new(1, 2, ActionKind::CtrlGateCall);
        cx.gate = Some("cx".into());
        trace.record("b", cx).unwrap();
        build_graph(&trace)
    }

    #[test]
    fn test_export_contains_summaries_and_echo() {
        let graph = sample();
        let criterion = Criterion::new().with_wire("b");
        let result = slice(&graph, &criterion, Direction::Backward).unwrap();
        let export = export_slice(&graph, &result, &criterion, false);

        assert_eq!(export.criterion.wire.as_deref(), Some("b"));
        assert_eq!(export.criterion.direction, "backward");
        assert_eq!(export.criterion.matched_nodes.len(), 1);
        assert!(export.slice_wires.contains(&"a".to_string()));
        assert!(export.slice_wires.contains(&"b".to_string()));
        assert_eq!(export.slice_actions.len(), result.len());

        // Seeds come first in time order and carry no neighbor.
        let seed = export
            .slice_actions
            .iter()
            .find(|e| e.reason_type == "criterion")
            .unwrap();
        assert!(seed.reason_neighbor.is_none());
        assert!(seed.reason_path.is_none());
    }

    #[test]
    fn test_export_paths_when_requested() {
        let graph = sample();
        let criterion = Criterion::new().with_wire("b");
        let result = slice(&graph, &criterion, Direction::Backward).unwrap();
        let export = export_slice(&graph, &result, &criterion, true);

        for entry in &export.slice_actions {
            let path = entry.reason_path.as_ref().unwrap();
            assert_eq!(path.first().unwrap(), &entry.node);
            assert_eq!(path.last().unwrap().action, export.criterion.matched_nodes[0].action);
        }
    }

    #[test]
    fn test_export_serializes_flat_entries() {
        let graph = sample();
        let criterion = Criterion::new();
        let result = slice(&graph, &criterion, Direction::Forward).unwrap();
        let export = export_slice(&graph, &result, &criterion, false);
        let json = serde_json::to_value(&export).unwrap();

        let entry = &json["slice_actions"][0];
        // Flattened node fields live next to the reason fields.
        assert!(entry.get("wire").is_some());
        assert!(entry.get("reason_type").is_some());
        assert!(entry.get("reason_direction").is_some());
    }
}
