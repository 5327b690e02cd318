//! Skuld Command-Line Interface
//!
//! The main entry point for the `skuld` static dependency analyzer:
//! trace a quantum program tree, export its dependency graph, and answer
//! slicing queries with reconstructable provenance.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{graph, slice, trace, version};

/// Skuld - static dependency analysis and slicing for quantum programs
#[derive(Parser)]
#[command(name = "skuld")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a trace from a serialized program tree
    Trace {
        /// Input file (program tree JSON)
        #[arg(short, long)]
        input: String,

        /// Output trace file
        #[arg(short, long, default_value = "trace.json")]
        out: String,

        /// Number of pre-registered physical wires
        #[arg(long, default_value = "6")]
        physical: u32,
    },

    /// Export the dependency graph of a trace
    Graph {
        /// Input trace file
        #[arg(short, long)]
        input: String,

        /// Output graph file
        #[arg(short, long, default_value = "graph.json")]
        out: String,

        /// Also write a Graphviz projection to this path
        #[arg(long)]
        dot: Option<String>,

        /// Limit nodes in the Graphviz projection
        #[arg(long)]
        dot_max_nodes: Option<usize>,
    },

    /// Slice a trace from a criterion
    Slice {
        /// Input trace file
        #[arg(short, long)]
        input: String,

        /// Output slice file
        #[arg(short, long, default_value = "slice.json")]
        out: String,

        /// Slice direction (backward, forward)
        #[arg(short, long, default_value = "backward")]
        direction: String,

        /// Criterion wire, e.g. "q[1]"
        #[arg(long)]
        wire: Option<String>,

        /// Criterion line number
        #[arg(long)]
        line: Option<u32>,

        /// Criterion time step
        #[arg(long)]
        time: Option<u32>,

        /// Criterion action, e.g. "ctrl"
        #[arg(long)]
        action: Option<String>,

        /// Criterion gate, e.g. "cx" or "h"
        #[arg(long)]
        gate: Option<String>,

        /// Also export the dependency graph
        #[arg(long)]
        export_graph: bool,

        /// Path for the graph export
        #[arg(long, default_value = "graph.json")]
        graph_out: String,

        /// Also export the Graphviz projection
        #[arg(long)]
        export_dot: bool,

        /// Path for the Graphviz export
        #[arg(long, default_value = "graph.dot")]
        dot_out: String,

        /// Limit nodes in the Graphviz projection
        #[arg(long)]
        dot_max_nodes: Option<usize>,

        /// Highlight the slice nodes in the projection
        #[arg(long)]
        dot_highlight_slice: bool,

        /// Include a full parent-chain path per slice node
        #[arg(long)]
        explain_paths: bool,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Trace {
            input,
            out,
            physical,
        } => trace::execute(&input, &out, physical),

        Commands::Graph {
            input,
            out,
            dot,
            dot_max_nodes,
        } => graph::execute(&input, &out, dot.as_deref(), dot_max_nodes),

        Commands::Slice {
            input,
            out,
            direction,
            wire,
            line,
            time,
            action,
            gate,
            export_graph,
            graph_out,
            export_dot,
            dot_out,
            dot_max_nodes,
            dot_highlight_slice,
            explain_paths,
        } => slice::execute(&slice::SliceArgs {
            input,
            out,
            direction,
            wire,
            line,
            time,
            action,
            gate,
            export_graph,
            graph_out,
            export_dot,
            dot_out,
            dot_max_nodes,
            dot_highlight_slice,
            explain_paths,
        }),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
