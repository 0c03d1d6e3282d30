//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod models;
pub mod query;
pub mod tree;
pub mod utils;

// Re-export main command functions
pub use models::{SearchArgs, SelectArgs, TreeArgs};
pub use query::{execute_search, execute_select};
pub use tree::{execute_tree, load_tree, validate_args};
pub use utils::{display_schema, display_version, validate_snapshot_file};
