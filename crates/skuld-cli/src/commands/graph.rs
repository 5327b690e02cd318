//! Graph command implementation.

use anyhow::{Context, Result};
use console::style;
use rustc_hash::FxHashMap;
use std::fs;

use skuld_graph::{DotOptions, build_graph, export_graph, render_dot};

use super::common::{load_trace, write_json};

/// Execute the graph command.
pub fn execute(
    input: &str,
    out: &str,
    dot: Option<&str>,
    dot_max_nodes: Option<usize>,
) -> Result<()> {
    println!(
        "{} Building dependency graph from {}",
        style("→").cyan().bold(),
        style(input).green()
    );

    let trace = load_trace(input)?;
    let graph = build_graph(&trace);

    let mut kind_counts: FxHashMap<&'static str, usize> = FxHashMap::default();
    for (_, _, kind) in graph.edges() {
        *kind_counts.entry(kind.as_str()).or_default() += 1;
    }
    let mut counts: Vec<_> = kind_counts.into_iter().collect();
    counts.sort_unstable();

    println!(
        "  Graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    for (kind, count) in counts {
        println!("    {kind}: {count}");
    }

    let export = export_graph(&graph);
    write_json(out, &serde_json::to_value(&export)?)?;
    println!("{} Output: {}", style("✓").green().bold(), style(out).green());

    if let Some(dot_path) = dot {
        let options = DotOptions {
            max_nodes: dot_max_nodes,
            ..DotOptions::default()
        };
        fs::write(dot_path, render_dot(&graph, &options))
            .with_context(|| format!("Failed to write file: {dot_path}"))?;
        println!(
            "{} Projection: {}",
            style("✓").green().bold(),
            style(dot_path).green()
        );
    }

    Ok(())
}
