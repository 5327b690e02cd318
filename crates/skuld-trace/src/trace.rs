//! The trace: every wire's timeline, in declaration order.

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::action::Action;
use crate::error::{TraceError, TraceResult};
use crate::wire::Wire;

/// Reserved metadata key carrying the source file path.
pub const FILENAME_KEY: &str = "_filename";

/// The complete result of symbolically executing one program: an ordered
/// collection of wires, each owning its append-only action timeline.
///
/// A trace is immutable once returned by the builder; graph construction
/// and slicing only ever borrow it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    /// Wire ids in declaration order.
    order: Vec<String>,
    /// Wire id to wire.
    wires: FxHashMap<String, Wire>,
    /// Source file path, exported under [`FILENAME_KEY`].
    source: Option<String>,
}

impl Trace {
    /// An empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a wire. Re-declaring an id replaces the previous wire but
    /// keeps its position in declaration order.
    pub fn declare(&mut self, id: impl Into<String>, wire: Wire) {
        let id = id.into();
        if !self.wires.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.wires.insert(id, wire);
    }

    /// Whether a wire id is declared.
    pub fn contains(&self, id: &str) -> bool {
        self.wires.contains_key(id)
    }

    /// Look up a wire.
    pub fn get(&self, id: &str) -> Option<&Wire> {
        self.wires.get(id)
    }

    /// Append an action to a wire's timeline.
    pub fn record(&mut self, id: &str, action: Action) -> TraceResult<()> {
        let wire = self
            .wires
            .get_mut(id)
            .ok_or_else(|| TraceError::UndeclaredWire(id.to_string()))?;
        wire.actions.push(action);
        Ok(())
    }

    /// Iterate wires in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Wire)> {
        self.order
            .iter()
            .map(|id| (id.as_str(), &self.wires[id]))
    }

    /// Number of wires.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the trace has no wires.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The recorded source path, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Record the source path exported under [`FILENAME_KEY`].
    pub fn set_source(&mut self, path: impl Into<String>) {
        self.source = Some(path.into());
    }

    /// Element ids `base[0]`, `base[1]`, … while declared, in index order.
    pub fn elements(&self, base: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut i = 0u32;
        loop {
            let id = format!("{base}[{i}]");
            if !self.wires.contains_key(&id) {
                break;
            }
            out.push(id);
            i += 1;
        }
        out
    }

    /// Declared size of the array `base`, if `base[0]` exists.
    #[allow(clippy::cast_possible_truncation)]
    pub fn array_size(&self, base: &str) -> Option<u32> {
        let n = self.elements(base).len();
        if n == 0 { None } else { Some(n as u32) }
    }

    /// Wire ids equal to `base` or elements of the array `base`, in
    /// declaration order.
    pub fn matching_ids(&self, base: &str) -> Vec<String> {
        let prefix = format!("{base}[");
        self.order
            .iter()
            .filter(|id| id.as_str() == base || id.starts_with(&prefix))
            .cloned()
            .collect()
    }

    /// Total number of recorded actions.
    pub fn num_actions(&self) -> usize {
        self.wires.values().map(|w| w.actions.len()).sum()
    }

    /// Number of logical time steps used (highest time + 1).
    pub fn num_time_steps(&self) -> u32 {
        self.wires
            .values()
            .flat_map(|w| w.actions.iter())
            .map(|a| a.time + 1)
            .max()
            .unwrap_or(0)
    }

    /// Serialize to the trace interchange object: wire id to wire entry,
    /// plus the reserved metadata key.
    pub fn to_json(&self) -> TraceResult<Value> {
        let mut map = serde_json::Map::new();
        for (id, wire) in self.iter() {
            map.insert(id.to_string(), serde_json::to_value(wire)?);
        }
        if let Some(source) = &self.source {
            map.insert(FILENAME_KEY.to_string(), Value::String(source.clone()));
        }
        Ok(Value::Object(map))
    }

    /// Rebuild a trace from the interchange object. Keys with the
    /// reserved `_` prefix are metadata, never wires.
    pub fn from_json(value: &Value) -> TraceResult<Self> {
        let Value::Object(map) = value else {
            return Err(TraceError::InvalidTrace(
                "expected a top-level object of wires".to_string(),
            ));
        };
        let mut trace = Trace::new();
        for (key, entry) in map {
            if key == FILENAME_KEY {
                if let Value::String(path) = entry {
                    trace.set_source(path.clone());
                }
                continue;
            }
            if key.starts_with('_') {
                continue;
            }
            let wire: Wire = serde_json::from_value(entry.clone())?;
            trace.declare(key.clone(), wire);
        }
        Ok(trace)
    }
}
