//! Tree command implementation.
//!
//! The tree command:
//! 1. Reads log events from the input file
//! 2. Builds the aggregated namespace tree
//! 3. Renders the tree to stdout
//! 4. Writes the optional JSON snapshot and SVG flamegraph

use super::models::TreeArgs;
use crate::aggregator::{build_tree, LogTree, RowState};
use crate::flamegraph::generate_flamegraph;
use crate::output::{render_rows, write_snapshot, write_svg};
use crate::parser::{read_events, to_snapshot};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Maximum depth accepted by `--depth`
const MAX_DEPTH: usize = 256;

/// Execute the tree command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Input file missing or unparseable
/// * File write errors
/// * Flamegraph requested for an empty tree
pub fn execute_tree(args: TreeArgs) -> Result<LogTree> {
    let start_time = Instant::now();

    info!("Building logger tree from: {}", args.input.display());

    // Step 1: Read and aggregate
    info!("Step 1/3: Reading events...");
    let tree = load_tree(&args.input)?;

    info!(
        "Aggregated {} events into {} nodes ({} distinct loggers)",
        tree.total_events(),
        tree.len(),
        tree.distinct_loggers()
    );

    // Step 2: Render
    info!("Step 2/3: Rendering tree...");
    if args.print_tree {
        let mut rows = RowState::new(&tree);
        match args.depth {
            Some(depth) => rows.expand_to_depth(depth),
            None => rows.expand_all(),
        }
        debug!("{} visible rows", rows.row_count());
        println!("{}", render_rows(&rows, &tree));
    }

    // Step 3: Write outputs
    info!("Step 3/3: Writing output files...");

    if let Some(json_path) = &args.output_json {
        let snapshot = to_snapshot(&tree, args.input.display().to_string());
        write_snapshot(&snapshot, json_path).context("Failed to write tree snapshot")?;
        info!("✓ Snapshot written to: {}", json_path.display());
    }

    if let Some(svg_path) = &args.output_svg {
        let svg = generate_flamegraph(&tree, args.flamegraph_config.as_ref())
            .context("Failed to generate flamegraph")?;
        write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
        info!("✓ Flamegraph written to: {}", svg_path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Tree completed in {:.2}s", elapsed.as_secs_f64());

    Ok(tree)
}

/// Read events from `input` and aggregate them
///
/// **Public** - shared by every command that needs a tree
pub fn load_tree(input: &Path) -> Result<LogTree> {
    let events = read_events(input)
        .with_context(|| format!("Failed to read events from {}", input.display()))?;
    Ok(build_tree(&events))
}

/// Validate tree arguments
///
/// **Public** - can be called before execute_tree for early validation
pub fn validate_args(args: &TreeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    if args.depth.is_some_and(|depth| depth > MAX_DEPTH) {
        anyhow::bail!("depth is too large (max {})", MAX_DEPTH);
    }

    if let Some(config) = &args.flamegraph_config {
        if config.width == 0 {
            anyhow::bail!("Flamegraph width must be greater than 0");
        }
    }

    Ok(())
}
