//! The dependency graph container.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::node::{DepNode, EdgeKind, NodeKey};

/// Node index type for the dependency graph.
pub type NodeIndex = PetNodeIndex<u32>;

/// Directed multigraph of dependency nodes with idempotent insertion.
///
/// Nodes are deduplicated by identity key and edges by their
/// (source, destination, kind) triple, so building twice from the same
/// trace yields identical node and edge sets. Parallel edges of
/// different kinds between the same pair are allowed; that is what makes
/// a measurement reachable through both its temporal and its explicit
/// measurement edge.
#[derive(Debug, Clone, Default)]
pub struct DepGraph {
    graph: DiGraph<DepNode, EdgeKind, u32>,
    index: FxHashMap<NodeKey, NodeIndex>,
    seen_edges: FxHashSet<(NodeIndex, NodeIndex, EdgeKind)>,
}

impl DepGraph {
    /// An empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning the existing index when its identity key
    /// is already present.
    pub fn add_node(&mut self, node: DepNode) -> NodeIndex {
        let key = node.key();
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.index.insert(key, idx);
        idx
    }

    /// Insert an edge unless the same (src, dst, kind) already exists.
    pub fn add_edge(&mut self, src: NodeIndex, dst: NodeIndex, kind: EdgeKind) {
        if self.seen_edges.insert((src, dst, kind)) {
            self.graph.add_edge(src, dst, kind);
        }
    }

    /// Look up a node index by identity key.
    pub fn lookup(&self, key: &NodeKey) -> Option<NodeIndex> {
        self.index.get(key).copied()
    }

    /// The node at an index.
    pub fn node(&self, idx: NodeIndex) -> &DepNode {
        &self.graph[idx]
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterate all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &DepNode)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Iterate all edges as (source, destination, kind).
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, EdgeKind)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), *e.weight()))
    }

    /// Neighbors along a direction, with the kind of the edge reaching
    /// each one. `Outgoing` follows edges forward, `Incoming` follows
    /// the reverse adjacency.
    pub fn neighbors_directed(
        &self,
        idx: NodeIndex,
        direction: Direction,
    ) -> impl Iterator<Item = (NodeIndex, EdgeKind)> + '_ {
        self.graph
            .edges_directed(idx, direction)
            .map(move |e| match direction {
                Direction::Outgoing => (e.target(), *e.weight()),
                Direction::Incoming => (e.source(), *e.weight()),
            })
    }

    /// Outgoing neighbors with edge kinds.
    pub fn outgoing(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, EdgeKind)> + '_ {
        self.neighbors_directed(idx, Direction::Outgoing)
    }

    /// Incoming neighbors with edge kinds.
    pub fn incoming(&self, idx: NodeIndex) -> impl Iterator<Item = (NodeIndex, EdgeKind)> + '_ {
        self.neighbors_directed(idx, Direction::Incoming)
    }

    /// The underlying petgraph graph.
    pub fn graph(&self) -> &DiGraph<DepNode, EdgeKind, u32> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::OpNode;
    use skuld_trace::ActionKind;

    fn op(wire: &str, time: u32) -> DepNode {
        DepNode::Op(OpNode {
            wire: wire.into(),
            time,
            line: 1,
            action: ActionKind::GateCall,
            gate: "h".into(),
            local: String::new(),
        })
    }

    #[test]
    fn test_node_insertion_is_idempotent() {
        let mut g = DepGraph::new();
        let a = g.add_node(op("a", 0));
        let b = g.add_node(op("a", 0));
        assert_eq!(a, b);
        assert_eq!(g.node_count(), 1);
    }

    #[test]
    fn test_edge_insertion_is_idempotent_per_kind() {
        let mut g = DepGraph::new();
        let a = g.add_node(op("a", 0));
        let b = g.add_node(op("a", 1));
        g.add_edge(a, b, EdgeKind::Temporal);
        g.add_edge(a, b, EdgeKind::Temporal);
        assert_eq!(g.edge_count(), 1);

        // A different kind between the same pair is a distinct edge.
        g.add_edge(a, b, EdgeKind::Measurement);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_neighbor_lookup() {
        let mut g = DepGraph::new();
        let a = g.add_node(op("a", 0));
        let b = g.add_node(op("a", 1));
        g.add_edge(a, b, EdgeKind::Temporal);

        let out: Vec<_> = g.outgoing(a).collect();
        assert_eq!(out, vec![(b, EdgeKind::Temporal)]);
        let inc: Vec<_> = g.incoming(b).collect();
        assert_eq!(inc, vec![(a, EdgeKind::Temporal)]);
        assert!(g.outgoing(b).next().is_none());
    }
}
