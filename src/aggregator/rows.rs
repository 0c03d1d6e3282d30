//! Expand/collapse state over the flattened row index.
//!
//! Rows are the pre-order sequence of nodes whose ancestors are all
//! expanded. The root is always row 0 and starts expanded.

use super::tree::{LogTree, NodeId};
use std::collections::HashSet;

/// Expansion state bound to one tree
#[derive(Debug, Clone)]
pub struct RowState<'t> {
    tree: &'t LogTree,
    expanded: HashSet<NodeId>,
}

impl<'t> RowState<'t> {
    /// Only the root is expanded
    pub fn new(tree: &'t LogTree) -> Self {
        let mut expanded = HashSet::new();
        expanded.insert(tree.root());
        Self { tree, expanded }
    }

    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    /// Expand `id`; leaves have nothing to expand and are ignored
    pub fn expand(&mut self, id: NodeId) {
        if !self.tree.is_leaf(id) {
            self.expanded.insert(id);
        }
    }

    pub fn collapse(&mut self, id: NodeId) {
        self.expanded.remove(&id);
    }

    /// Expand `id` and every ancestor so that it becomes a visible row
    pub fn reveal(&mut self, id: NodeId) {
        let ancestors: Vec<NodeId> = self.tree.ancestors(id).collect();
        self.expanded.extend(ancestors);
    }

    /// Currently visible rows in display order
    pub fn visible_rows(&self) -> Vec<NodeId> {
        let mut rows = Vec::new();
        let mut stack = vec![self.tree.root()];
        while let Some(id) = stack.pop() {
            rows.push(id);
            if self.is_expanded(id) {
                stack.extend(self.tree.children(id).iter().rev());
            }
        }
        rows
    }

    pub fn row_count(&self) -> usize {
        self.visible_rows().len()
    }

    /// Expand the node shown at visible row `row`
    ///
    /// Returns false if the row does not exist.
    pub fn expand_row(&mut self, row: usize) -> bool {
        match self.visible_rows().get(row) {
            Some(&id) => {
                self.expand(id);
                true
            }
            None => false,
        }
    }

    /// Collapse the node shown at visible row `row`
    pub fn collapse_row(&mut self, row: usize) -> bool {
        match self.visible_rows().get(row) {
            Some(&id) => {
                self.collapse(id);
                true
            }
            None => false,
        }
    }

    /// Expand every interior node, making every node a row
    pub fn expand_all(&mut self) {
        let tree = self.tree;
        self.expanded
            .extend(tree.all_rows().filter(|&id| !tree.is_leaf(id)));
    }

    /// Collapse everything below the root; the root stays expanded
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.expanded.insert(self.tree.root());
    }

    /// Expand every interior node shallower than `depth` (root is depth 0)
    pub fn expand_to_depth(&mut self, depth: usize) {
        let tree = self.tree;
        self.collapse_all();
        self.expanded.extend(
            tree.all_rows()
                .filter(|&id| !tree.is_leaf(id) && tree.node(id).depth() < depth),
        );
    }
}
