//! Flamegraph generation using the inferno library.
//!
//! This module converts the namespace tree into collapsed stacks and renders
//! them as an interactive SVG flamegraph, one frame per logger segment.

pub mod generator;

// Re-export main types
pub use generator::{collapsed_stacks, generate_flamegraph, FlamegraphConfig};
