//! Event ingestion and snapshot schema definitions.
//!
//! This module handles:
//! - Parsing raw log exports into `LogEvent`s
//! - Detecting JSON, NDJSON and plain-text inputs
//! - Defining and checking the snapshot schema

pub mod event;
pub mod schema;

// Re-export main types
pub use event::{parse_events, read_events, LogEvent};
pub use schema::{check_snapshot, to_snapshot, NodeSummary, TreeSnapshot};
