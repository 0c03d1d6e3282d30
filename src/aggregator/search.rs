//! Substring search over full logger names.
//!
//! Search is recursive (every node is considered, expanded or not) and
//! repeatable: `find_next` wraps around past the last match.

use super::tree::{LogTree, NodeId};

/// Search helper bound to one tree
#[derive(Debug, Clone, Copy)]
pub struct TreeSearch<'t> {
    tree: &'t LogTree,
    case_sensitive: bool,
}

impl<'t> TreeSearch<'t> {
    /// Case-insensitive search
    pub fn new(tree: &'t LogTree) -> Self {
        Self {
            tree,
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// True if the full name of `id` contains `query`
    ///
    /// The root has no name and never matches; neither does an empty query.
    pub fn matches(&self, id: NodeId, query: &str) -> bool {
        let node = self.tree.node(id);
        if query.is_empty() || node.is_root() {
            return false;
        }
        if self.case_sensitive {
            node.full_name().contains(query)
        } else {
            node.full_name()
                .to_lowercase()
                .contains(&query.to_lowercase())
        }
    }

    /// Every matching node in pre-order
    pub fn find_all(&self, query: &str) -> Vec<NodeId> {
        self.tree
            .all_rows()
            .filter(|&id| self.matches(id, query))
            .collect()
    }

    /// First match after `from` in pre-order, wrapping around
    ///
    /// With `from = None` this returns the first match in the tree. A lone
    /// match is returned again when searching from itself.
    pub fn find_next(&self, query: &str, from: Option<NodeId>) -> Option<NodeId> {
        let rows: Vec<NodeId> = self.tree.all_rows().collect();
        let start = from
            .and_then(|id| rows.iter().position(|&row| row == id))
            .map_or(0, |pos| pos + 1);

        rows[start..]
            .iter()
            .chain(rows[..start].iter())
            .copied()
            .find(|&id| self.matches(id, query))
    }

    /// Last match before `from` in pre-order, wrapping around
    pub fn find_previous(&self, query: &str, from: Option<NodeId>) -> Option<NodeId> {
        let rows: Vec<NodeId> = self.tree.all_rows().collect();
        let end = from
            .and_then(|id| rows.iter().position(|&row| row == id))
            .unwrap_or(rows.len());

        rows[..end]
            .iter()
            .rev()
            .chain(rows[end..].iter().rev())
            .copied()
            .find(|&id| self.matches(id, query))
    }
}
