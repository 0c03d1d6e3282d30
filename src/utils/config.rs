//! Configuration and constants for the CLI.

/// Current snapshot schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Separator between logger name segments
pub const SEGMENT_SEPARATOR: char = '.';

/// Label shown for the root of the tree (the "select everything" row)
pub const ROOT_LABEL: &str = "Select All";

/// Default flamegraph width in pixels
pub const DEFAULT_SVG_WIDTH: usize = 1200;

// Field names holding the event array (different log exporters use different names)
pub const EVENT_FIELD_NAMES: &[&str] = &["events", "logs", "entries", "records", "data"];

// Field names holding the logger name, in priority order
pub const LOGGER_FIELD_NAMES: &[&str] = &["logger", "loggerName", "logger_name", "name"];

// Field names holding the rendered message
pub const MESSAGE_FIELD_NAMES: &[&str] = &["message", "msg"];
