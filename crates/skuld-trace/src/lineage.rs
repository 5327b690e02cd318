//! Control-lineage resolution.

use crate::action::ActionKind;
use crate::trace::Trace;

/// Collect the transitive control set feeding a gate recorded at `time`.
///
/// Walks time backwards from `time`, accepting whole steps made purely of
/// `ctrl` actions (wires in declaration order within a step, most recent
/// step first); the first scanned step containing anything else ends the
/// scan, as does running out of time steps. Steps with no actions at all
/// are scanned past.
///
/// The common case terminates after one step, since a single
/// application's controls share one time. Consecutive all-`ctrl` steps
/// accumulate across steps: this is what lets the first gate of a
/// `ctrl @`-modified user-gate body inherit the modifier's controls.
pub fn control_lineage(trace: &Trace, time: u32) -> Vec<String> {
    let mut lineage = Vec::new();
    let mut t = Some(time);
    while let Some(cur) = t {
        let mut step = Vec::new();
        for (id, wire) in trace.iter() {
            for action in &wire.actions {
                if action.time == cur {
                    if action.kind != ActionKind::Ctrl {
                        return lineage;
                    }
                    step.push(id.to_string());
                }
            }
        }
        lineage.extend(step);
        t = cur.checked_sub(1);
    }
    lineage
}

/// Lineage joined with commas, the form embedded in recorded actions.
pub fn lineage_string(trace: &Trace, time: u32) -> String {
    control_lineage(trace, time).join(",")
}
