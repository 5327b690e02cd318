//! Breadth-first slicing with fixed-at-discovery explanations.

use std::collections::VecDeque;

use petgraph::Direction as Adjacency;
use rustc_hash::FxHashMap;

use skuld_graph::{DepGraph, EdgeKind, NodeIndex};

use crate::criterion::{Criterion, Direction};
use crate::error::{SliceError, SliceResult};

/// Why a node is part of the slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    /// The node matched the criterion itself.
    Criterion,
    /// The node was discovered through an edge of this kind.
    Edge(EdgeKind),
}

impl Reason {
    /// The serialized reason name.
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Criterion => "criterion",
            Reason::Edge(kind) => kind.as_str(),
        }
    }
}

/// Per-node provenance, fixed at first discovery and never revised.
#[derive(Debug, Clone, Copy)]
pub struct Explanation {
    /// How the node entered the slice.
    pub reason: Reason,
    /// Direction of the traversal that found it.
    pub direction: Direction,
    /// The already-visited node that discovered this one; `None` for
    /// criterion seeds.
    pub neighbor: Option<NodeIndex>,
}

/// A computed slice: the reachability closure plus provenance.
///
/// Slices borrow nothing and mutate nothing; any number can be computed
/// from one graph independently.
#[derive(Debug, Clone)]
pub struct Slice {
    direction: Direction,
    seeds: Vec<NodeIndex>,
    visited: Vec<NodeIndex>,
    explanations: FxHashMap<NodeIndex, Explanation>,
    parents: FxHashMap<NodeIndex, Option<NodeIndex>>,
}

impl Slice {
    /// Direction the slice was computed in.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The criterion seed nodes.
    pub fn seeds(&self) -> &[NodeIndex] {
        &self.seeds
    }

    /// Every node in the slice, in discovery order.
    pub fn nodes(&self) -> &[NodeIndex] {
        &self.visited
    }

    /// Number of nodes in the slice.
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    /// A slice always contains its seeds.
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Whether a node is in the slice.
    pub fn contains(&self, idx: NodeIndex) -> bool {
        self.explanations.contains_key(&idx)
    }

    /// The fixed explanation of a slice node.
    pub fn explanation(&self, idx: NodeIndex) -> Option<&Explanation> {
        self.explanations.get(&idx)
    }

    /// Witness path from a node back to a criterion seed, the node
    /// first. BFS guarantees shortest hop-count, not a canonical choice
    /// among equal-length alternatives.
    pub fn path(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut chain = Vec::new();
        let mut cursor = Some(idx);
        while let Some(node) = cursor {
            if !self.parents.contains_key(&node) {
                break;
            }
            chain.push(node);
            cursor = self.parents[&node];
        }
        chain
    }
}

/// Compute the slice of `graph` seeded by `criterion` in `direction`.
///
/// Traversal is breadth-first from all seeds at once; a node is marked
/// visited on first discovery only, and its explanation never changes
/// afterwards. Parallel edges reaching the same undiscovered neighbor
/// collapse to the most specific kind (measurement over classical over
/// entanglement over temporal) before the neighbor is marked.
pub fn slice(
    graph: &DepGraph,
    criterion: &Criterion,
    direction: Direction,
) -> SliceResult<Slice> {
    let seeds = criterion.seeds(graph);
    if seeds.is_empty() {
        return Err(SliceError::EmptyCriterion(criterion.to_string()));
    }

    let adjacency = match direction {
        Direction::Forward => Adjacency::Outgoing,
        Direction::Backward => Adjacency::Incoming,
    };

    let mut explanations: FxHashMap<NodeIndex, Explanation> = FxHashMap::default();
    let mut parents: FxHashMap<NodeIndex, Option<NodeIndex>> = FxHashMap::default();
    let mut visited: Vec<NodeIndex> = Vec::new();
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    for &seed in &seeds {
        explanations.insert(
            seed,
            Explanation {
                reason: Reason::Criterion,
                direction,
                neighbor: None,
            },
        );
        parents.insert(seed, None);
        visited.push(seed);
        queue.push_back(seed);
    }

    while let Some(current) = queue.pop_front() {
        let mut best: FxHashMap<NodeIndex, EdgeKind> = FxHashMap::default();
        let mut order: Vec<NodeIndex> = Vec::new();
        for (neighbor, kind) in graph.neighbors_directed(current, adjacency) {
            match best.get(&neighbor) {
                None => {
                    best.insert(neighbor, kind);
                    order.push(neighbor);
                }
                Some(existing) => {
                    if specificity(kind) > specificity(*existing) {
                        best.insert(neighbor, kind);
                    }
                }
            }
        }
        order.sort_by_key(|idx| idx.index());

        for neighbor in order {
            if explanations.contains_key(&neighbor) {
                continue;
            }
            explanations.insert(
                neighbor,
                Explanation {
                    reason: Reason::Edge(best[&neighbor]),
                    direction,
                    neighbor: Some(current),
                },
            );
            parents.insert(neighbor, Some(current));
            visited.push(neighbor);
            queue.push_back(neighbor);
        }
    }

    Ok(Slice {
        direction,
        seeds,
        visited,
        explanations,
        parents,
    })
}

/// Tie-break among parallel edges discovering one neighbor.
fn specificity(kind: EdgeKind) -> u8 {
    match kind {
        EdgeKind::Temporal => 0,
        EdgeKind::Entanglement => 1,
        EdgeKind::QuantumToClassical => 2,
        EdgeKind::Measurement => 3,
        _ => 0,
    }
}
