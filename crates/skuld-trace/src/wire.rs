//! Wires: qubit-valued locations and their action timelines.

use serde::{Deserialize, Serialize};

use crate::action::Action;

/// The flavor of a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireKind {
    /// Hardware wire, id prefixed `$`.
    Physical,
    /// Declared scalar wire.
    Named,
    /// One element of a declared array.
    Array,
}

/// A single qubit-valued location and its ordered, append-only timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    /// Wire flavor.
    #[serde(rename = "type")]
    pub kind: WireKind,
    /// Element index, present only for array wires.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// Recorded actions in append order.
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Wire {
    /// A physical wire.
    pub fn physical() -> Self {
        Self {
            kind: WireKind::Physical,
            index: None,
            actions: Vec::new(),
        }
    }

    /// A declared scalar wire.
    pub fn named() -> Self {
        Self {
            kind: WireKind::Named,
            index: None,
            actions: Vec::new(),
        }
    }

    /// One element of a declared array.
    pub fn array(index: u32) -> Self {
        Self {
            kind: WireKind::Array,
            index: Some(index),
            actions: Vec::new(),
        }
    }
}
