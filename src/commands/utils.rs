use crate::output::read_snapshot;
use crate::parser::check_snapshot;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a snapshot JSON file
pub fn validate_snapshot_file(file_path: &Path) -> Result<()> {
    println!("Validating snapshot: {}", file_path.display());

    let snapshot = read_snapshot(file_path)?;

    println!("✓ Valid snapshot JSON");
    println!("  Version: {}", snapshot.version);
    println!("  Source: {}", snapshot.source);
    println!("  Total Events: {}", snapshot.total_events);
    println!("  Distinct Loggers: {}", snapshot.distinct_loggers);
    println!("  Nodes: {}", snapshot.node_count);

    let problems = check_snapshot(&snapshot);
    if !problems.is_empty() {
        for problem in &problems {
            println!("  ✗ {}", problem);
        }
        anyhow::bail!("Snapshot is inconsistent ({} problems)", problems.len());
    }

    println!("✓ Frequencies and ordering are consistent");
    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Logger Tree Snapshot Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string           - Schema version (e.g., '1.0.0')");
        println!("  source: string            - Where the events came from");
        println!("  total_events: number      - Events aggregated");
        println!("  distinct_loggers: number  - Distinct logger names");
        println!("  node_count: number        - Namespace nodes (root excluded)");
        println!("  nodes: array              - Top-level namespaces, sorted");
        println!("    segment: string         - Last segment of the name");
        println!("    full_name: string       - Full dotted logger name");
        println!("    direct_count: number    - Events with exactly this name");
        println!("    frequency: number       - Events in this namespace and below");
        println!("    children: array?        - Child namespaces, sorted");
        println!("  generated_at: string      - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Logger Tree v{}", env!("CARGO_PKG_VERSION"));
    println!("Snapshot Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Groups log events into a navigable logger-namespace tree.");
}
