//! Slice command implementation.

use anyhow::{Context, Result};
use console::style;
use rustc_hash::FxHashSet;
use std::fs;

use skuld_graph::{DotOptions, NodeIndex, build_graph, export_graph, render_dot};
use skuld_slice::{Criterion, Direction, export_slice, slice};

use super::common::{load_trace, write_json};

/// Arguments of the slice command.
pub struct SliceArgs {
    pub input: String,
    pub out: String,
    pub direction: String,
    pub wire: Option<String>,
    pub line: Option<u32>,
    pub time: Option<u32>,
    pub action: Option<String>,
    pub gate: Option<String>,
    pub export_graph: bool,
    pub graph_out: String,
    pub export_dot: bool,
    pub dot_out: String,
    pub dot_max_nodes: Option<usize>,
    pub dot_highlight_slice: bool,
    pub explain_paths: bool,
}

/// Execute the slice command.
pub fn execute(args: &SliceArgs) -> Result<()> {
    let direction = Direction::from_name(&args.direction)
        .ok_or_else(|| anyhow::anyhow!("Unknown direction: '{}'", args.direction))?;

    println!(
        "{} Slicing {} ({})",
        style("→").cyan().bold(),
        style(&args.input).green(),
        style(direction).yellow()
    );

    let trace = load_trace(&args.input)?;
    let graph = build_graph(&trace);

    if args.export_graph {
        let export = export_graph(&graph);
        write_json(&args.graph_out, &serde_json::to_value(&export)?)?;
        println!(
            "{} Graph: {}",
            style("✓").green().bold(),
            style(&args.graph_out).green()
        );
    }

    let criterion = Criterion {
        wire: args.wire.clone(),
        line: args.line,
        time: args.time,
        action: args.action.clone(),
        gate: args.gate.clone(),
    };
    let result = slice(&graph, &criterion, direction)?;

    if args.export_dot {
        let highlight: FxHashSet<NodeIndex> = if args.dot_highlight_slice {
            result.nodes().iter().copied().collect()
        } else {
            FxHashSet::default()
        };
        let options = DotOptions {
            max_nodes: args.dot_max_nodes,
            highlight,
        };
        fs::write(&args.dot_out, render_dot(&graph, &options))
            .with_context(|| format!("Failed to write file: {}", args.dot_out))?;
        println!(
            "{} Projection: {}",
            style("✓").green().bold(),
            style(&args.dot_out).green()
        );
    }

    let export = export_slice(&graph, &result, &criterion, args.explain_paths);
    write_json(&args.out, &serde_json::to_value(&export)?)?;

    println!(
        "{} Criterion matched {} node(s)",
        style("✓").green().bold(),
        result.seeds().len()
    );
    println!("  Slice lines: {:?}", export.slice_lines);
    println!("  Slice actions: {}", export.slice_actions.len());
    println!("  Output: {}", style(&args.out).green());

    Ok(())
}
