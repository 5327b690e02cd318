//! Slicing criteria and directions.

use serde::{Deserialize, Serialize};
use std::fmt;

use skuld_graph::{DepGraph, DepNode, NodeIndex};

/// Predicate selecting a slice's seed nodes.
///
/// Unset fields match anything; set fields must all match. A criterion
/// that matches nothing is a fatal [`EmptyCriterion`] at slice time.
///
/// [`EmptyCriterion`]: crate::SliceError::EmptyCriterion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Wire id (or store name for classical definitions).
    pub wire: Option<String>,
    /// Source line.
    pub line: Option<u32>,
    /// Logical time.
    pub time: Option<u32>,
    /// Action name, e.g. `ctrl` or `gate-call`.
    pub action: Option<String>,
    /// Gate name, e.g. `cx` or `h`.
    pub gate: Option<String>,
}

impl Criterion {
    /// A criterion matching every node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one wire.
    pub fn with_wire(mut self, wire: impl Into<String>) -> Self {
        self.wire = Some(wire.into());
        self
    }

    /// Restrict to one source line.
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Restrict to one logical time.
    pub fn with_time(mut self, time: u32) -> Self {
        self.time = Some(time);
        self
    }

    /// Restrict to one action name.
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Restrict to one gate name.
    pub fn with_gate(mut self, gate: impl Into<String>) -> Self {
        self.gate = Some(gate.into());
        self
    }

    /// Whether a node satisfies every set field.
    pub fn matches(&self, node: &DepNode) -> bool {
        if let Some(wire) = &self.wire {
            if node.wire() != wire {
                return false;
            }
        }
        if let Some(line) = self.line {
            if node.line() != line {
                return false;
            }
        }
        if let Some(time) = self.time {
            if node.time() != time {
                return false;
            }
        }
        if let Some(action) = &self.action {
            if node.action_name() != action {
                return false;
            }
        }
        if let Some(gate) = &self.gate {
            if node.gate() != gate {
                return false;
            }
        }
        true
    }

    /// All matching node indices.
    pub fn seeds(&self, graph: &DepGraph) -> Vec<NodeIndex> {
        graph
            .nodes()
            .filter(|(_, node)| self.matches(node))
            .map(|(idx, _)| idx)
            .collect()
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn field(value: &Option<impl fmt::Display>) -> String {
            match value {
                Some(v) => v.to_string(),
                None => "any".to_string(),
            }
        }
        write!(
            f,
            "wire={}, line={}, time={}, action={}, gate={}",
            field(&self.wire),
            field(&self.line),
            field(&self.time),
            field(&self.action),
            field(&self.gate)
        )
    }
}

/// Slice direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Traverse reverse adjacency: what could have caused this.
    Backward,
    /// Traverse forward adjacency: what this could affect.
    Forward,
}

impl Direction {
    /// The serialized name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Backward => "backward",
            Direction::Forward => "forward",
        }
    }

    /// Parse a serialized direction name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "backward" => Some(Direction::Backward),
            "forward" => Some(Direction::Forward),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skuld_graph::OpNode;
    use skuld_trace::ActionKind;

    fn node(wire: &str, time: u32, action: ActionKind, gate: &str) -> DepNode {
        DepNode::Op(OpNode {
            wire: wire.into(),
            time,
            line: time + 1,
            action,
            gate: gate.into(),
            local: String::new(),
        })
    }

    #[test]
    fn test_unset_fields_match_anything() {
        let criterion = Criterion::new();
        assert!(criterion.matches(&node("a", 0, ActionKind::Ctrl, "")));
        assert!(criterion.matches(&node("b", 7, ActionKind::GateCall, "h")));
    }

    #[test]
    fn test_set_fields_are_anded() {
        let criterion = Criterion::new().with_wire("a").with_action("ctrl");
        assert!(criterion.matches(&node("a", 0, ActionKind::Ctrl, "")));
        assert!(!criterion.matches(&node("a", 0, ActionKind::GateCall, "h")));
        assert!(!criterion.matches(&node("b", 0, ActionKind::Ctrl, "")));
    }

    #[test]
    fn test_display_shows_unset_as_any() {
        let criterion = Criterion::new().with_action("ctrl");
        let text = criterion.to_string();
        assert!(text.contains("action=ctrl"));
        assert!(text.contains("wire=any"));
    }

    #[test]
    fn test_direction_names() {
        assert_eq!(Direction::from_name("backward"), Some(Direction::Backward));
        assert_eq!(Direction::from_name("forward"), Some(Direction::Forward));
        assert_eq!(Direction::from_name("sideways"), None);
    }
}
