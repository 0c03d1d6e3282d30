//! Aggregation of logger names into a namespace tree.
//!
//! This module transforms a batch of log events into:
//! - A deduplicated tree with one node per namespace prefix
//! - Memoised cumulative frequencies per node
//! - Selection, search and row-expansion views consumed by front ends

pub mod path_aggregator;
pub mod rows;
pub mod search;
pub mod selection;
pub mod tree;

// Re-export main types and functions
pub use path_aggregator::{build_tree, count_exact, LoggerName};
pub use rows::RowState;
pub use search::TreeSearch;
pub use selection::Selection;
pub use tree::{compare_segments, LogTree, NodeId, NodeKind, PathNode};
