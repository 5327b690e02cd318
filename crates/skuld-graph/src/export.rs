//! Graph interchange: JSON-shaped export and import.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use skuld_trace::ActionKind;

use crate::error::{GraphError, GraphResult};
use crate::graph::{DepGraph, NodeIndex};
use crate::node::{DEF_ACTION, DefNode, DepNode, EdgeKind, OpNode};

/// Serialized graph: flat node and edge lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<NodeExport>,
    pub edges: Vec<EdgeExport>,
}

/// One exported node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeExport {
    pub id: usize,
    pub wire: String,
    pub time: u32,
    pub line: u32,
    pub action: String,
    pub gate: String,
    pub local_name: String,
}

/// One exported edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeExport {
    pub from: usize,
    pub to: usize,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// Export a graph to its interchange shape. Node ids are the graph's
/// insertion indices, stable for a fixed trace.
pub fn export_graph(graph: &DepGraph) -> GraphExport {
    let nodes = graph
        .nodes()
        .map(|(idx, node)| NodeExport {
            id: idx.index(),
            wire: node.wire().to_string(),
            time: node.time(),
            line: node.line(),
            action: node.action_name().to_string(),
            gate: node.gate().to_string(),
            local_name: node.local_name().to_string(),
        })
        .collect();
    let edges = graph
        .edges()
        .map(|(src, dst, kind)| EdgeExport {
            from: src.index(),
            to: dst.index(),
            kind,
        })
        .collect();
    GraphExport { nodes, edges }
}

/// Rebuild a graph from its interchange shape, preserving every node
/// identity and edge kind.
pub fn import_graph(export: &GraphExport) -> GraphResult<DepGraph> {
    let mut graph = DepGraph::new();
    let mut by_id: FxHashMap<usize, NodeIndex> = FxHashMap::default();

    for entry in &export.nodes {
        let node = if entry.action == DEF_ACTION {
            DepNode::ClassicalDef(DefNode {
                store: entry.wire.clone(),
                time: entry.time,
                line: entry.line,
            })
        } else {
            let action = ActionKind::from_name(&entry.action)
                .ok_or_else(|| GraphError::UnknownAction(entry.action.clone()))?;
            DepNode::Op(OpNode {
                wire: entry.wire.clone(),
                time: entry.time,
                line: entry.line,
                action,
                gate: entry.gate.clone(),
                local: entry.local_name.clone(),
            })
        };
        let idx = graph.add_node(node);
        by_id.insert(entry.id, idx);
    }

    for edge in &export.edges {
        let src = *by_id.get(&edge.from).ok_or(GraphError::DanglingEdge {
            from: edge.from,
            to: edge.to,
        })?;
        let dst = *by_id.get(&edge.to).ok_or(GraphError::DanglingEdge {
            from: edge.from,
            to: edge.to,
        })?;
        graph.add_edge(src, dst, edge.kind);
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_graph;
    use skuld_trace::{Action, Trace, Wire};

    fn sample_graph() -> DepGraph {
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

        let mut m = Action::new(2, 3, ActionKind::Measure);
        m.store = Some("c".into());
        trace.record("b", m).unwrap();

        build_graph(&trace)
    }

    #[test]
    fn test_roundtrip_preserves_nodes_and_edge_kinds() {
        let graph = sample_graph();
        let export = export_graph(&graph);
        let back = import_graph(&export).unwrap();

        assert_eq!(back.node_count(), graph.node_count());
        assert_eq!(back.edge_count(), graph.edge_count());

        // Every original identity key resolves in the reimport.
        for (_, node) in graph.nodes() {
            assert!(back.lookup(&node.key()).is_some(), "lost node {node:?}");
        }

        // Edge kind multiset survives.
        let kinds = |g: &DepGraph| {
            let mut v: Vec<&'static str> =
                g.edges().map(|(_, _, k)| k.as_str()).collect();
            v.sort_unstable();
            v
        };
        assert_eq!(kinds(&graph), kinds(&back));
    }

    #[test]
    fn test_export_serializes_to_expected_shape() {
        let export = export_graph(&sample_graph());
        let json = serde_json::to_value(&export).unwrap();

        assert!(json["nodes"].as_array().unwrap().len() >= 4);
        let edge = &json["edges"][0];
        assert!(edge.get("from").is_some());
        assert!(edge.get("to").is_some());
        assert!(edge.get("type").is_some());
    }

    #[test]
    fn test_import_rejects_unknown_action() {
        let export = GraphExport {
            nodes: vec![NodeExport {
                id: 0,
                wire: "a".into(),
                time: 0,
                line: 1,
                action: "teleport".into(),
                gate: String::new(),
                local_name: String::new(),
            }],
            edges: vec![],
        };
        assert!(matches!(
            import_graph(&export),
            Err(GraphError::UnknownAction(_))
        ));
    }

    #[test]
    fn test_import_rejects_dangling_edge() {
        let export = GraphExport {
            nodes: vec![],
            edges: vec![EdgeExport {
                from: 0,
                to: 1,
                kind: EdgeKind::Temporal,
            }],
        };
        assert!(matches!(
            import_graph(&export),
            Err(GraphError::DanglingEdge { .. })
        ));
    }
}
