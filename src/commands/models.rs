use crate::flamegraph::FlamegraphConfig;
use std::path::PathBuf;

/// Arguments for the tree command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct TreeArgs {
    /// Event file to aggregate
    pub input: PathBuf,

    /// Expand rows down to this depth (None = expand everything)
    pub depth: Option<usize>,

    /// Output path for JSON snapshot (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Flamegraph configuration
    pub flamegraph_config: Option<FlamegraphConfig>,

    /// Print the rendered tree to stdout
    pub print_tree: bool,
}

impl Default for TreeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("events.json"),
            depth: None,
            output_json: None,
            output_svg: None,
            flamegraph_config: None,
            print_tree: true,
        }
    }
}

/// Arguments for the search command
#[derive(Debug, Clone)]
pub struct SearchArgs {
    /// Event file to aggregate
    pub input: PathBuf,

    /// Substring to look for in full logger names
    pub query: String,

    /// Match case exactly
    pub case_sensitive: bool,
}

/// Arguments for the select command
#[derive(Debug, Clone, Default)]
pub struct SelectArgs {
    /// Event file to aggregate
    pub input: PathBuf,

    /// Logger names to select (empty = select all)
    pub names: Vec<String>,

    /// Logger names to deselect afterwards
    pub exclude: Vec<String>,
}
