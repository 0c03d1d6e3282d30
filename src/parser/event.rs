//! Log event ingestion.
//!
//! Accepts the shapes log exporters commonly produce:
//! - a JSON array of event objects (or bare logger strings)
//! - a JSON object wrapping such an array under a well-known field
//! - newline-delimited JSON, one event object per line
//! - plain text, one logger name per line

use crate::aggregator::LoggerName;
use crate::utils::config::{EVENT_FIELD_NAMES, LOGGER_FIELD_NAMES, MESSAGE_FIELD_NAMES};
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// A single log event; only the logger name matters for aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Dotted logger name, e.g. `com.acme.service.worker`
    #[serde(alias = "loggerName", alias = "logger_name", alias = "name")]
    pub logger: String,

    /// Rendered message, if the exporter included one
    #[serde(default, alias = "msg", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LogEvent {
    pub fn new(logger: impl Into<String>) -> Self {
        Self {
            logger: logger.into(),
            message: None,
        }
    }
}

impl LoggerName for LogEvent {
    fn logger_name(&self) -> &str {
        &self.logger
    }
}

/// Parse log events from raw text
///
/// **Public** - main entry point for ingestion
///
/// # Errors
/// * `ParseError::JsonError` - Input looks like a JSON document but is not valid JSON
/// * `ParseError::InvalidFormat` - No usable event array, or every record was malformed
pub fn parse_events(raw: &str) -> Result<Vec<LogEvent>, ParseError> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() {
        debug!("Empty input, no events");
        return Ok(Vec::new());
    }

    let events = match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Array(_) | Value::Object(_))) => parse_event_value(&value)?,
        // Scalars such as `42` or `true` are logger names, not documents
        Ok(_) => parse_plain_lines(raw),
        Err(_) if trimmed.starts_with('{') => parse_json_lines(raw)?,
        Err(e) if trimmed.starts_with('[') => return Err(ParseError::JsonError(e)),
        Err(_) => parse_plain_lines(raw),
    };

    debug!("Parsed {} events", events.len());
    Ok(events)
}

/// Read and parse log events from a file
///
/// **Public** - used by the CLI commands
pub fn read_events(path: impl AsRef<Path>) -> Result<Vec<LogEvent>, ParseError> {
    let path = path.as_ref();
    debug!("Reading events from: {}", path.display());
    let raw = std::fs::read_to_string(path)?;
    parse_events(&raw)
}

/// Extract events from a parsed JSON document
///
/// **Private** - internal helper for parse_events
fn parse_event_value(value: &Value) -> Result<Vec<LogEvent>, ParseError> {
    match value {
        Value::Array(items) => parse_events_array(items),
        Value::Object(obj) => {
            for field in EVENT_FIELD_NAMES {
                if let Some(items) = obj.get(*field).and_then(Value::as_array) {
                    debug!("Found events under '{}'", field);
                    return parse_events_array(items);
                }
            }

            // A lone event object
            parse_event_item(value)
                .map(|event| vec![event])
                .map_err(|_| {
                    ParseError::InvalidFormat(format!(
                        "Expected an event array under one of: {}",
                        EVENT_FIELD_NAMES.join(", ")
                    ))
                })
        }
        _ => Err(ParseError::InvalidFormat(
            "Events must be a JSON object or array".to_string(),
        )),
    }
}

/// Parse array of events
///
/// **Private** - internal parsing logic
fn parse_events_array(items: &[Value]) -> Result<Vec<LogEvent>, ParseError> {
    let mut events = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match parse_event_item(item) {
            Ok(event) => events.push(event),
            Err(e) => {
                // Log but don't fail - some records may be malformed
                warn!("Failed to parse event {}: {}", index, e);
            }
        }
    }

    if events.is_empty() && !items.is_empty() {
        return Err(ParseError::InvalidFormat(
            "All events failed to parse".to_string(),
        ));
    }

    Ok(events)
}

/// Parse one array element: an event object or a bare logger string
///
/// **Private** - internal parsing logic
fn parse_event_item(item: &Value) -> Result<LogEvent, ParseError> {
    match item {
        Value::String(logger) => Ok(LogEvent::new(logger.clone())),
        Value::Object(obj) => {
            // First known field wins, so records carrying both `logger` and
            // `name` are not rejected as duplicates
            let logger = LOGGER_FIELD_NAMES
                .iter()
                .find_map(|field| obj.get(*field).and_then(Value::as_str))
                .ok_or_else(|| {
                    ParseError::InvalidFormat(format!(
                        "Event has no logger field (expected one of: {})",
                        LOGGER_FIELD_NAMES.join(", ")
                    ))
                })?;

            let message = MESSAGE_FIELD_NAMES
                .iter()
                .find_map(|field| obj.get(*field).and_then(Value::as_str))
                .map(str::to_string);

            Ok(LogEvent {
                logger: logger.to_string(),
                message,
            })
        }
        other => Err(ParseError::InvalidFormat(format!(
            "Expected event object or logger string, found {}",
            other
        ))),
    }
}

/// Parse newline-delimited JSON
///
/// **Private** - internal parsing logic
fn parse_json_lines(raw: &str) -> Result<Vec<LogEvent>, ParseError> {
    let mut events = Vec::new();
    let mut records = 0usize;

    for (line_no, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        records += 1;

        let parsed = serde_json::from_str::<Value>(line)
            .map_err(ParseError::from)
            .and_then(|value| parse_event_item(&value));
        match parsed {
            Ok(event) => events.push(event),
            Err(e) => warn!("Failed to parse line {}: {}", line_no + 1, e),
        }
    }

    if events.is_empty() && records > 0 {
        return Err(ParseError::InvalidFormat(
            "All lines failed to parse".to_string(),
        ));
    }

    Ok(events)
}

/// One logger name per line; blank lines are skipped
///
/// **Private** - internal parsing logic
fn parse_plain_lines(raw: &str) -> Vec<LogEvent> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(LogEvent::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let raw = r#"[{"logger": "a.b", "message": "hi"}, {"logger": "a"}]"#;
        let events = parse_events(raw).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].logger, "a.b");
        assert_eq!(events[0].message.as_deref(), Some("hi"));
    }

    #[test]
    fn test_parse_wrapped_array_with_alias() {
        let raw = r#"{"events": [{"loggerName": "x.y"}, "x"]}"#;
        let events = parse_events(raw).unwrap();
        assert_eq!(events, vec![LogEvent::new("x.y"), LogEvent::new("x")]);
    }

    #[test]
    fn test_every_logger_field_name_is_accepted() {
        for field in LOGGER_FIELD_NAMES {
            let raw = format!(r#"[{{"{}": "a.b"}}]"#, field);
            let events = parse_events(&raw).unwrap();
            assert_eq!(events, vec![LogEvent::new("a.b")], "field {}", field);
        }
    }

    #[test]
    fn test_logger_field_priority() {
        let raw = r#"[{"name": "app", "logger": "com.acme", "msg": "started"}]"#;
        let events = parse_events(raw).unwrap();
        assert_eq!(events[0].logger, "com.acme");
        assert_eq!(events[0].message.as_deref(), Some("started"));
    }

    #[test]
    fn test_name_field_in_json_lines() {
        let raw = "{\"name\": \"a\"}\n{\"name\": \"a.b\"}\n";
        let events = parse_events(raw).unwrap();
        assert_eq!(events, vec![LogEvent::new("a"), LogEvent::new("a.b")]);
    }

    #[test]
    fn test_parse_json_lines_skips_bad_lines() {
        let raw = "{\"logger\": \"a\"}\n{not json}\n\n{\"logger\": \"b\"}\n";
        let events = parse_events(raw).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].logger, "b");
    }

    #[test]
    fn test_parse_plain_text() {
        let raw = "com.acme.api\n\n  .leading\ncom.acme\n";
        let events = parse_events(raw).unwrap();
        let loggers: Vec<&str> = events.iter().map(|e| e.logger.as_str()).collect();
        assert_eq!(loggers, vec!["com.acme.api", ".leading", "com.acme"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_events("  \n").unwrap().is_empty());
    }

    #[test]
    fn test_all_events_invalid() {
        let result = parse_events(r#"[{"level": "INFO"}, 3]"#);
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_broken_json_array() {
        let result = parse_events(r#"[{"logger": "a"},"#);
        assert!(matches!(result, Err(ParseError::JsonError(_))));
    }

    #[test]
    fn test_object_without_events() {
        let result = parse_events(r#"{"count": 3}"#);
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_logger_is_kept() {
        let events = parse_events(r#"[{"logger": ""}]"#).unwrap();
        assert_eq!(events[0].logger, "");
    }
}
