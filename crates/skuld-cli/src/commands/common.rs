//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use skuld_trace::Trace;

/// Load a trace from its JSON interchange file.
pub fn load_trace(path: &str) -> Result<Trace> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {}", path);
    }
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let value: serde_json::Value = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse trace JSON: {path}"))?;
    let trace = Trace::from_json(&value)?;
    debug!(
        wires = trace.len(),
        actions = trace.num_actions(),
        "loaded trace"
    );
    Ok(trace)
}

/// Write a pretty-printed JSON value.
pub fn write_json(path: &str, value: &serde_json::Value) -> Result<()> {
    fs::write(path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("Failed to write file: {path}"))?;
    Ok(())
}
