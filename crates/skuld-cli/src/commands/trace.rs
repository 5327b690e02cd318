//! Trace command implementation.

use anyhow::{Context, Result};
use console::style;
use std::fs;
use std::path::Path;

use skuld_ast::Program;
use skuld_trace::TraceBuilder;

use super::common::write_json;

/// Execute the trace command.
pub fn execute(input: &str, out: &str, physical: u32) -> Result<()> {
    println!(
        "{} Tracing {}",
        style("→").cyan().bold(),
        style(input).green()
    );

    if !Path::new(input).exists() {
        anyhow::bail!("File not found: {}", input);
    }
    let source =
        fs::read_to_string(input).with_context(|| format!("Failed to read file: {input}"))?;
    let program: Program = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse program tree: {input}"))?;

    let mut trace = TraceBuilder::with_physical_wires(physical).build(&program)?;
    trace.set_source(input);

    println!(
        "  Traced: {} wires, {} time steps, {} actions",
        trace.len(),
        trace.num_time_steps(),
        trace.num_actions()
    );

    write_json(out, &trace.to_json()?)?;
    println!("{} Output: {}", style("✓").green().bold(), style(out).green());

    Ok(())
}
