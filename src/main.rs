//! Logger Tree CLI
//!
//! Aggregates log events by logger namespace and prints, searches, selects
//! or exports the resulting tree.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use logger_tree::commands::{
    display_schema, display_version, execute_search, execute_select, execute_tree, validate_args,
    validate_snapshot_file, SearchArgs, SelectArgs, TreeArgs,
};
use logger_tree::flamegraph::FlamegraphConfig;
use logger_tree::utils::config::DEFAULT_SVG_WIDTH;

/// Logger Tree - aggregate log events by logger namespace
#[derive(Parser, Debug)]
#[command(name = "logger-tree")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build and print the logger tree
    Tree {
        /// Event file (JSON, NDJSON or one logger name per line)
        #[arg(short, long, env = "LOGGER_TREE_INPUT")]
        input: PathBuf,

        /// Expand rows down to this depth (default: expand everything)
        #[arg(short, long)]
        depth: Option<usize>,

        /// Output path for JSON snapshot (optional)
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Output path for SVG flamegraph (optional)
        #[arg(short, long)]
        flamegraph: Option<PathBuf>,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value_t = DEFAULT_SVG_WIDTH)]
        width: usize,

        /// Do not print the tree to stdout
        #[arg(long)]
        quiet: bool,
    },

    /// Find loggers whose full name contains a substring
    Search {
        /// Event file (JSON, NDJSON or one logger name per line)
        #[arg(short, long, env = "LOGGER_TREE_INPUT")]
        input: PathBuf,

        /// Substring to look for
        query: String,

        /// Match case exactly
        #[arg(long)]
        case_sensitive: bool,
    },

    /// Resolve a selection of loggers to the leaves it covers
    Select {
        /// Event file (JSON, NDJSON or one logger name per line)
        #[arg(short, long, env = "LOGGER_TREE_INPUT")]
        input: PathBuf,

        /// Logger names to select (default: select all)
        names: Vec<String>,

        /// Logger names to deselect afterwards
        #[arg(short, long)]
        exclude: Vec<String>,
    },

    /// Validate a snapshot JSON file
    Validate {
        /// Path to snapshot JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Tree {
            input,
            depth,
            json,
            flamegraph,
            title,
            width,
            quiet,
        } => {
            let fg_config = flamegraph.as_ref().map(|_| {
                let config = FlamegraphConfig::new().with_width(width);
                match title {
                    Some(title_str) => config.with_title(title_str),
                    None => config,
                }
            });

            let args = TreeArgs {
                input,
                depth,
                output_json: json,
                output_svg: flamegraph,
                flamegraph_config: fg_config,
                print_tree: !quiet,
            };

            // Validate args first
            validate_args(&args)?;

            execute_tree(args)?;
        }

        Commands::Search {
            input,
            query,
            case_sensitive,
        } => {
            execute_search(SearchArgs {
                input,
                query,
                case_sensitive,
            })?;
        }

        Commands::Select {
            input,
            names,
            exclude,
        } => {
            execute_select(SelectArgs {
                input,
                names,
                exclude,
            })?;
        }

        Commands::Validate { file } => {
            validate_snapshot_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
