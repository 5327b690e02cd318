//! Wire actions recorded by the trace builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What happened on a wire at one logical time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Wire reset to |0>.
    Reset,
    /// Measurement into a classical store.
    Measure,
    /// Control participation in a multi-wire operation.
    Ctrl,
    /// Terminal gate application.
    GateCall,
    /// Terminal gate application under one or more controls.
    CtrlGateCall,
    /// Synchronization barrier.
    Barrier,
}

impl ActionKind {
    /// The serialized name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Reset => "reset",
            ActionKind::Measure => "measure",
            ActionKind::Ctrl => "ctrl",
            ActionKind::GateCall => "gate-call",
            ActionKind::CtrlGateCall => "ctrl-gate-call",
            ActionKind::Barrier => "barrier",
        }
    }

    /// Parse a serialized kind name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "reset" => Some(ActionKind::Reset),
            "measure" => Some(ActionKind::Measure),
            "ctrl" => Some(ActionKind::Ctrl),
            "gate-call" => Some(ActionKind::GateCall),
            "ctrl-gate-call" => Some(ActionKind::CtrlGateCall),
            "barrier" => Some(ActionKind::Barrier),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded event on a wire.
///
/// Serialized field names follow the trace interchange format: the gate
/// name travels as `type`, the control lineage as `ctrl`, the swap
/// partner as `with` and the guard text as `if`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Logical time of the construct that produced this action.
    pub time: u32,
    /// Source line of the construct.
    pub line: u32,
    /// Action kind.
    #[serde(rename = "action")]
    pub kind: ActionKind,
    /// Gate name for gate-call / ctrl-gate-call actions.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub gate: Option<String>,
    /// Comma-joined control lineage at record time.
    #[serde(rename = "ctrl", skip_serializing_if = "Option::is_none")]
    pub lineage: Option<String>,
    /// The paired wire of a swap-like operation.
    #[serde(rename = "with", skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
    /// Destination store of a measurement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
    /// Comma-joined guard texts active when the action was recorded.
    #[serde(rename = "if", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// The argument spelling at the call site, before scope resolution.
    #[serde(rename = "local_name", skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
}

impl Action {
    /// A bare action with no optional fields set.
    pub fn new(time: u32, line: u32, kind: ActionKind) -> Self {
        Self {
            time,
            line,
            kind,
            gate: None,
            lineage: None,
            partner: None,
            store: None,
            condition: None,
            local: None,
        }
    }
}
