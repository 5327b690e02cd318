//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - static dependency analysis for quantum programs",
        style("Skuld").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  skuld-ast    Program tree and constant folding");
    println!("  skuld-trace  Worklist symbolic execution");
    println!("  skuld-graph  Dependency multigraph");
    println!("  skuld-slice  Criterion-driven slicing");
    println!("  skuld-cli    Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/hiq-lab/skuld").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
