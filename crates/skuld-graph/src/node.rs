//! Graph nodes, identity keys and edge kinds.

use serde::{Deserialize, Serialize};
use skuld_trace::ActionKind;
use std::fmt;

/// The serialized action name of classical-definition nodes.
pub const DEF_ACTION: &str = "def";

/// A node of the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepNode {
    /// A quantum event on a wire.
    Op(OpNode),
    /// A classical value definition produced by a measurement.
    ClassicalDef(DefNode),
}

/// A quantum event: one recorded action on one wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpNode {
    /// Wire the event happened on.
    pub wire: String,
    /// Logical time.
    pub time: u32,
    /// Source line.
    pub line: u32,
    /// Action kind.
    pub action: ActionKind,
    /// Gate name, empty for non-gate actions.
    pub gate: String,
    /// Call-site spelling, empty when none was recorded.
    pub local: String,
}

/// A classical definition synthesized for a measurement destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DefNode {
    /// Destination store name; also the node's identity.
    pub store: String,
    /// Time of the first measurement defining this store.
    pub time: u32,
    /// Line of the first measurement defining this store.
    pub line: u32,
}

/// Node identity. Operation nodes are identified by their full tuple;
/// classical definitions by store name alone, so a recurring store
/// reuses its node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Op {
        wire: String,
        time: u32,
        line: u32,
        action: ActionKind,
        gate: String,
        local: String,
    },
    Def {
        store: String,
    },
}

impl DepNode {
    /// The identity key used for idempotent insertion.
    pub fn key(&self) -> NodeKey {
        match self {
            DepNode::Op(op) => NodeKey::Op {
                wire: op.wire.clone(),
                time: op.time,
                line: op.line,
                action: op.action,
                gate: op.gate.clone(),
                local: op.local.clone(),
            },
            DepNode::ClassicalDef(def) => NodeKey::Def {
                store: def.store.clone(),
            },
        }
    }

    /// Wire id for operation nodes, store name for definitions.
    pub fn wire(&self) -> &str {
        match self {
            DepNode::Op(op) => &op.wire,
            DepNode::ClassicalDef(def) => &def.store,
        }
    }

    /// Logical time.
    pub fn time(&self) -> u32 {
        match self {
            DepNode::Op(op) => op.time,
            DepNode::ClassicalDef(def) => def.time,
        }
    }

    /// Source line.
    pub fn line(&self) -> u32 {
        match self {
            DepNode::Op(op) => op.line,
            DepNode::ClassicalDef(def) => def.line,
        }
    }

    /// Serialized action name (`def` for classical definitions).
    pub fn action_name(&self) -> &str {
        match self {
            DepNode::Op(op) => op.action.as_str(),
            DepNode::ClassicalDef(_) => DEF_ACTION,
        }
    }

    /// Gate name, empty when not a gate.
    pub fn gate(&self) -> &str {
        match self {
            DepNode::Op(op) => &op.gate,
            DepNode::ClassicalDef(_) => "",
        }
    }

    /// Call-site spelling, empty when none.
    pub fn local_name(&self) -> &str {
        match self {
            DepNode::Op(op) => &op.local,
            DepNode::ClassicalDef(_) => "",
        }
    }
}

/// Dependency edge kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum EdgeKind {
    /// Consecutive actions on one wire.
    Temporal,
    /// Coupling between participants of one multi-wire operation.
    Entanglement,
    /// Wire predecessor feeding a measurement.
    Measurement,
    /// Measurement feeding its classical definition.
    QuantumToClassical,
}

impl EdgeKind {
    /// The serialized name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Temporal => "temporal",
            EdgeKind::Entanglement => "entanglement",
            EdgeKind::Measurement => "measurement",
            EdgeKind::QuantumToClassical => "quantum-to-classical",
        }
    }

    /// Parse a serialized kind name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "temporal" => Some(EdgeKind::Temporal),
            "entanglement" => Some(EdgeKind::Entanglement),
            "measurement" => Some(EdgeKind::Measurement),
            "quantum-to-classical" => Some(EdgeKind::QuantumToClassical),
            _ => None,
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_def_identity_ignores_position() {
        let first = DepNode::ClassicalDef(DefNode {
            store: "c".into(),
            time: 1,
            line: 4,
        });
        let second = DepNode::ClassicalDef(DefNode {
            store: "c".into(),
            time: 9,
            line: 20,
        });
        assert_eq!(first.key(), second.key());
    }

    #[test]
    fn test_op_identity_is_full_tuple() {
        let make = |time| {
            DepNode::Op(OpNode {
                wire: "a".into(),
                time,
                line: 3,
                action: ActionKind::GateCall,
                gate: "h".into(),
                local: "a".into(),
            })
        };
        assert_eq!(make(1).key(), make(1).key());
        assert_ne!(make(1).key(), make(2).key());
    }

    #[test]
    fn test_edge_kind_names() {
        assert_eq!(EdgeKind::QuantumToClassical.as_str(), "quantum-to-classical");
        for kind in [
            EdgeKind::Temporal,
            EdgeKind::Entanglement,
            EdgeKind::Measurement,
            EdgeKind::QuantumToClassical,
        ] {
            assert_eq!(EdgeKind::from_name(kind.as_str()), Some(kind));
        }
    }
}
