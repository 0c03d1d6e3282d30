//! Build the namespace tree from a batch of logger names.
//!
//! Every prefix of every dotted logger name becomes a node. Nodes are
//! deduplicated by parent and segment, and each one records how many
//! events matched that exact path (zero for pure ancestor namespaces).
//!
//! Example: `["a.b", "a.b", "a.c", "a"]` produces
//! `a (direct 1) -> { b (direct 2), c (direct 1) }` with `a` totalling 4.

use super::tree::{LogTree, NodeId};
use crate::utils::config::SEGMENT_SEPARATOR;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Anything that carries a dotted logger name
///
/// **Public** - lets callers feed their own event records to [`build_tree`]
pub trait LoggerName {
    fn logger_name(&self) -> &str;
}

impl LoggerName for str {
    fn logger_name(&self) -> &str {
        self
    }
}

impl LoggerName for String {
    fn logger_name(&self) -> &str {
        self.as_str()
    }
}

impl<T: LoggerName + ?Sized> LoggerName for &T {
    fn logger_name(&self) -> &str {
        (**self).logger_name()
    }
}

/// Count events per literal logger string
///
/// **Public** - first step of [`build_tree`], also useful on its own
pub fn count_exact<'a, I, E>(events: I) -> BTreeMap<&'a str, u64>
where
    I: IntoIterator<Item = &'a E>,
    E: LoggerName + ?Sized + 'a,
{
    let mut counts: BTreeMap<&'a str, u64> = BTreeMap::new();
    for event in events {
        *counts.entry(event.logger_name()).or_insert(0) += 1;
    }
    counts
}

/// Build the aggregated tree from a complete batch of events
///
/// **Public** - main entry point for aggregation
///
/// # Algorithm
/// 1. Count exact occurrences per logger string
/// 2. For each distinct logger, walk its segments left to right
/// 3. Reuse the node for a prefix if one exists, otherwise create it with
///    the exact count for that prefix (or 0) under the previous node
/// 4. Siblings are kept ordered on every insertion
///
/// Blank segments (leading, trailing or doubled dots) are kept as nodes with
/// an empty display segment. An empty logger string is a single blank node.
pub fn build_tree<'a, I, E>(events: I) -> LogTree
where
    I: IntoIterator<Item = &'a E>,
    E: LoggerName + ?Sized + 'a,
{
    let exact = count_exact(events);
    let total_events: u64 = exact.values().sum();

    debug!(
        "Building logger tree from {} events ({} distinct loggers)",
        total_events,
        exact.len()
    );

    let mut tree = LogTree::new();

    // Nodes are keyed by (parent, segment). The root is never a key, so it
    // cannot collide with the blank segment of a name starting with a dot.
    let mut seen: HashMap<(NodeId, &str), NodeId> = HashMap::new();

    for &logger in exact.keys() {
        // Every node created for this logger names a prefix of this one string
        let source: Arc<str> = Arc::from(logger);
        let mut last_seen = tree.root();
        let mut prefix_end = 0;

        for (index, part) in logger.split(SEGMENT_SEPARATOR).enumerate() {
            if index > 0 {
                prefix_end += SEGMENT_SEPARATOR.len_utf8();
            }
            prefix_end += part.len();

            last_seen = match seen.get(&(last_seen, part)) {
                Some(&existing) => existing,
                None => {
                    let direct_count = exact.get(&logger[..prefix_end]).copied().unwrap_or(0);
                    let created = tree.insert_child(last_seen, &source, prefix_end, direct_count);
                    seen.insert((last_seen, part), created);
                    created
                }
            };
        }
    }

    tree.set_totals(total_events, exact.len());

    debug!("Built logger tree with {} nodes", tree.len());

    tree
}
