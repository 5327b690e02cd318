//! Built-in gate wiring classes.

/// Simple unitary single-qubit gates.
pub const UNITARY_GATES: &[&str] = &[
    "U", "p", "phase", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "rx", "ry", "rz", "id",
    "u1", "u2", "u3",
];

/// Controlled two-qubit gates: one control, one target.
pub const CONTROLLED_GATES: &[&str] = &[
    "cx", "CX", "cy", "cz", "cp", "cphase", "crx", "cry", "crz", "ch", "cu",
];

/// Wiring class of a built-in gate. Each class maps a call onto a fixed
/// pattern of actions sharing one logical time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinGate {
    /// One wire, one `gate-call`.
    Unitary,
    /// `ctrl` on wire 0, `ctrl-gate-call` on wire 1.
    Controlled,
    /// `gate-call` on both wires, each recording the other as partner.
    Swap,
    /// `ctrl` on wires 0 and 1, `ctrl-gate-call` on wire 2.
    Ccx,
    /// `ctrl` on wire 0, `ctrl-gate-call` on wires 1 and 2 as partners.
    Cswap,
}

impl BuiltinGate {
    /// Classify a gate name against the wiring table.
    pub fn classify(name: &str) -> Option<Self> {
        if UNITARY_GATES.contains(&name) {
            Some(BuiltinGate::Unitary)
        } else if CONTROLLED_GATES.contains(&name) {
            Some(BuiltinGate::Controlled)
        } else {
            match name {
                "swap" => Some(BuiltinGate::Swap),
                "ccx" => Some(BuiltinGate::Ccx),
                "cswap" => Some(BuiltinGate::Cswap),
                _ => None,
            }
        }
    }

    /// Number of wires the wiring pattern consumes.
    pub fn arity(self) -> usize {
        match self {
            BuiltinGate::Unitary => 1,
            BuiltinGate::Controlled | BuiltinGate::Swap => 2,
            BuiltinGate::Ccx | BuiltinGate::Cswap => 3,
        }
    }
}
