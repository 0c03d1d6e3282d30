//! Output JSON schema definitions for tree snapshots.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{compare_segments, LogTree, NodeId};
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Top-level snapshot structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// Schema version for compatibility checking
    pub version: String,

    /// Where the events came from (usually the input file name)
    pub source: String,

    /// Number of events the tree was built from
    pub total_events: u64,

    /// Number of distinct logger names
    pub distinct_loggers: usize,

    /// Number of namespace nodes (root excluded)
    pub node_count: usize,

    /// Top-level namespaces, in display order
    pub nodes: Vec<NodeSummary>,

    /// Timestamp when snapshot was generated
    pub generated_at: String,
}

/// One namespace node with its subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSummary {
    /// Last segment of the logger name
    pub segment: String,

    /// Full dotted logger name
    pub full_name: String,

    /// Events logged under exactly this name
    pub direct_count: u64,

    /// Events logged under this name or anything beneath it
    pub frequency: u64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSummary>,
}

/// Convert a tree to its snapshot form
///
/// **Public** - used by commands to create final output
pub fn to_snapshot(tree: &LogTree, source: impl Into<String>) -> TreeSnapshot {
    TreeSnapshot {
        version: SCHEMA_VERSION.to_string(),
        source: source.into(),
        total_events: tree.total_events(),
        distinct_loggers: tree.distinct_loggers(),
        node_count: tree.len(),
        nodes: summarize(tree),
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Build the nested summaries bottom-up without recursion
///
/// **Private** - reversed pre-order reaches every child before its parent
fn summarize(tree: &LogTree) -> Vec<NodeSummary> {
    let rows: Vec<NodeId> = tree.all_rows().collect();
    let mut built: Vec<Option<NodeSummary>> = (0..=tree.len()).map(|_| None).collect();

    for &id in rows.iter().rev() {
        let children = tree
            .children(id)
            .iter()
            .filter_map(|child| built[child.index()].take())
            .collect();

        built[id.index()] = Some(NodeSummary {
            segment: tree.display_segment(id).to_string(),
            full_name: tree.full_name(id).to_string(),
            direct_count: tree.direct_count(id),
            frequency: tree.frequency(id),
            children,
        });
    }

    built[tree.root().index()]
        .take()
        .map(|root| root.children)
        .unwrap_or_default()
}

/// Check a snapshot for internal consistency
///
/// **Public** - returns one message per problem; empty means consistent
///
/// Checks that every frequency equals its direct count plus its children's
/// frequencies, that siblings are ordered, that the node count matches and
/// that the top-level frequencies add up to the event total.
pub fn check_snapshot(snapshot: &TreeSnapshot) -> Vec<String> {
    let mut problems = Vec::new();
    let mut node_count = 0usize;

    check_siblings("<root>", &snapshot.nodes, &mut problems);

    // Explicit stack keeps deep namespaces off the call stack
    let mut stack: Vec<&NodeSummary> = snapshot.nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        node_count += 1;
        check_node(node, &mut problems);
        stack.extend(node.children.iter().rev());
    }

    let top_level: u64 = snapshot.nodes.iter().map(|n| n.frequency).sum();
    if top_level != snapshot.total_events {
        problems.push(format!(
            "top-level frequencies sum to {} but total_events is {}",
            top_level, snapshot.total_events
        ));
    }

    if node_count != snapshot.node_count {
        problems.push(format!(
            "found {} nodes but node_count is {}",
            node_count, snapshot.node_count
        ));
    }

    problems
}

fn check_node(node: &NodeSummary, problems: &mut Vec<String>) {
    let expected = node.direct_count + node.children.iter().map(|c| c.frequency).sum::<u64>();
    if node.frequency != expected {
        problems.push(format!(
            "'{}' has frequency {} but direct count and children give {}",
            node.full_name, node.frequency, expected
        ));
    }

    check_siblings(&node.full_name, &node.children, problems);
}

fn check_siblings(parent: &str, siblings: &[NodeSummary], problems: &mut Vec<String>) {
    for pair in siblings.windows(2) {
        if compare_segments(&pair[0].segment, &pair[1].segment).is_ge() {
            problems.push(format!(
                "children of '{}' out of order: '{}' before '{}'",
                parent, pair[0].segment, pair[1].segment
            ));
        }
    }
}
