//! Plain-text rendering of the tree for terminals.

use crate::aggregator::{LogTree, NodeId, RowState};

/// Row label: `"<segment> [<frequency>]"`, or the root label alone
pub fn format_label(tree: &LogTree, id: NodeId) -> String {
    let node = tree.node(id);
    if node.is_root() {
        node.display_segment().to_string()
    } else {
        format!("{} [{}]", node.display_segment(), tree.frequency(id))
    }
}

/// Render the visible rows as an indented tree
///
/// Interior nodes are marked `-` when expanded and `+` when collapsed.
pub fn render_rows(rows: &RowState<'_>, tree: &LogTree) -> String {
    let mut lines = Vec::new();

    for id in rows.visible_rows() {
        let depth = tree.node(id).depth();
        let marker = if tree.is_leaf(id) {
            ' '
        } else if rows.is_expanded(id) {
            '-'
        } else {
            '+'
        };
        lines.push(format!(
            "{}{} {}",
            "  ".repeat(depth),
            marker,
            format_label(tree, id)
        ));
    }

    lines.join("\n")
}

/// Render a list of nodes as `full_name<TAB>frequency` lines
pub fn render_listing(tree: &LogTree, ids: &[NodeId]) -> String {
    ids.iter()
        .map(|&id| format!("{}\t{}", tree.full_name(id), tree.frequency(id)))
        .collect::<Vec<_>>()
        .join("\n")
}
