//! SVG flamegraph of the logger namespace.
//!
//! Each node with direct events becomes one collapsed stack line
//! (`com;acme;api 12`), so frame widths equal cumulative frequencies and the
//! picture mirrors the tree: wide frames are busy namespaces.

use crate::aggregator::LogTree;
use crate::utils::config::DEFAULT_SVG_WIDTH;
use crate::utils::error::FlamegraphError;
use inferno::flamegraph::{self, Options};
use log::{debug, info};

/// Frame label used for empty segments, which inferno cannot display
///
/// Segments are split on the separator and never contain it, so this label
/// cannot be produced by a real segment.
const BLANK_FRAME: &str = "(.)";

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Logger Namespace".to_string(),
            width: DEFAULT_SVG_WIDTH,
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }
}

/// Collapsed stack lines for every node with direct events, in tree order
///
/// **Public** - also handy for piping into other flamegraph tooling
pub fn collapsed_stacks(tree: &LogTree) -> Vec<String> {
    tree.all_rows()
        .filter(|&id| tree.direct_count(id) > 0)
        .map(|id| {
            let frames: Vec<String> = tree
                .segments(id)
                .into_iter()
                .map(frame_name)
                .collect();
            format!("{} {}", frames.join(";"), tree.direct_count(id))
        })
        .collect()
}

/// Only the empty segment is relabelled; whitespace-only segments keep their
/// own frames.
fn frame_name(segment: &str) -> String {
    if segment.is_empty() {
        BLANK_FRAME.to_string()
    } else {
        segment.replace(';', ":")
    }
}

/// Generate SVG flamegraph from the tree
///
/// **Public** - main entry point for flamegraph rendering
///
/// # Errors
/// * `FlamegraphError::EmptyTree` - The tree holds no events
/// * `FlamegraphError::RenderFailed` - inferno rejected the input
pub fn generate_flamegraph(
    tree: &LogTree,
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    if tree.total_events() == 0 {
        return Err(FlamegraphError::EmptyTree);
    }

    let config = config.cloned().unwrap_or_default();
    let lines = collapsed_stacks(tree);
    info!("Generating flamegraph from {} stacks", lines.len());

    let mut options = Options::default();
    options.title = config.title.clone();
    options.count_name = "events".to_string();
    options.image_width = Some(config.width);

    let mut svg = Vec::new();
    flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut svg)
        .map_err(|e| FlamegraphError::RenderFailed(e.to_string()))?;

    let svg = String::from_utf8(svg).map_err(|e| FlamegraphError::RenderFailed(e.to_string()))?;
    debug!("Flamegraph generated ({} bytes)", svg.len());

    Ok(svg)
}
