//! Output writers for tree data.
//!
//! This module handles writing data to disk and terminals:
//! - JSON snapshots (pretty)
//! - SVG flamegraphs
//! - Indented text trees

pub mod json;
pub mod svg;
pub mod text;

// Re-export main functions
pub use json::{read_snapshot, snapshot_to_string, validate_path, write_snapshot};
pub use svg::write_svg;
pub use text::{format_label, render_listing, render_rows};
