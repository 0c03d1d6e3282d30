//! Check-box style selection over a [`LogTree`].
//!
//! Selecting a node implicitly selects everything beneath it. The set of
//! explicitly selected nodes is kept normalised: no selected node has a
//! selected ancestor, and a parent whose children are all selected is
//! selected in their place. Consumers read [`Selection::selected_leaves`],
//! not the raw selection.

use super::tree::{LogTree, NodeId};
use log::debug;
use std::collections::BTreeSet;

/// Selection state bound to one tree
#[derive(Debug, Clone)]
pub struct Selection<'t> {
    tree: &'t LogTree,
    selected: BTreeSet<NodeId>,
}

impl<'t> Selection<'t> {
    /// Start with nothing selected
    pub fn new(tree: &'t LogTree) -> Self {
        Self {
            tree,
            selected: BTreeSet::new(),
        }
    }

    /// Start with the root selected, which selects everything
    pub fn all(tree: &'t LogTree) -> Self {
        let mut selection = Self::new(tree);
        selection.select_all();
        selection
    }

    pub fn tree(&self) -> &'t LogTree {
        self.tree
    }

    pub fn select_all(&mut self) {
        self.selected.clear();
        self.selected.insert(self.tree.root());
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Select `id` and, implicitly, its whole subtree
    pub fn select(&mut self, id: NodeId) {
        if self.is_selected(id) {
            return;
        }

        let tree = self.tree;
        self.selected
            .retain(|&existing| !tree.is_ancestor(id, existing));
        self.selected.insert(id);
        self.merge_upwards(id);
    }

    /// Deselect `id` and its subtree, splitting any selected ancestor
    pub fn deselect(&mut self, id: NodeId) {
        let tree = self.tree;
        self.selected
            .retain(|&existing| existing != id && !tree.is_ancestor(id, existing));

        let Some(anchor) = tree
            .ancestors(id)
            .find(|ancestor| self.selected.contains(ancestor))
        else {
            return;
        };

        // Replace the anchor with every sibling branch along the path to `id`
        self.selected.remove(&anchor);
        let path = tree.path_to(id);
        let start = path.iter().position(|&n| n == anchor).unwrap_or(0);
        for window in path[start..].windows(2) {
            let (parent, on_path) = (window[0], window[1]);
            for &child in tree.children(parent) {
                if child != on_path {
                    self.selected.insert(child);
                }
            }
        }
    }

    /// Toggle the effective selection state of `id`
    pub fn toggle(&mut self, id: NodeId) {
        if self.is_selected(id) {
            self.deselect(id);
        } else {
            self.select(id);
        }
    }

    /// True if `id` or one of its ancestors is selected
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.selected.contains(&id)
            || self
                .tree
                .ancestors(id)
                .any(|ancestor| self.selected.contains(&ancestor))
    }

    /// True if `id` is not selected but something beneath it is
    pub fn is_partially_selected(&self, id: NodeId) -> bool {
        !self.is_selected(id)
            && self
                .selected
                .iter()
                .any(|&selected| self.tree.is_ancestor(id, selected))
    }

    /// Explicitly selected nodes, in tree order
    pub fn selected_paths(&self) -> Vec<NodeId> {
        self.tree
            .all_rows()
            .filter(|id| self.selected.contains(id))
            .collect()
    }

    /// The leaves covered by the selection, in tree order
    ///
    /// **Public** - this is what the rest of the application consumes.
    /// A selected node with no children stands for itself; the root never
    /// appears in the result.
    pub fn selected_leaves(&self) -> Vec<NodeId> {
        let leaves: Vec<NodeId> = self
            .selected_paths()
            .into_iter()
            .flat_map(|id| self.tree.depth_first_leaves(id))
            .filter(|&id| !self.tree.node(id).is_root())
            .collect();

        debug!(
            "Selection of {} paths covers {} leaves",
            self.selected.len(),
            leaves.len()
        );

        leaves
    }

    /// Events logged under the selected leaves
    ///
    /// Direct events of interior nodes are not included; see
    /// [`Selection::selected_events`] for those.
    pub fn selected_leaf_frequency(&self) -> u64 {
        self.selected_leaves()
            .into_iter()
            .map(|id| self.tree.frequency(id))
            .sum()
    }

    /// Events logged anywhere under the selected paths
    ///
    /// The selected paths never nest, so each event is counted once.
    pub fn selected_events(&self) -> u64 {
        self.selected
            .iter()
            .map(|&id| self.tree.frequency(id))
            .sum()
    }

    fn merge_upwards(&mut self, mut id: NodeId) {
        while let Some(parent) = self.tree.parent(id) {
            let all_selected = self
                .tree
                .children(parent)
                .iter()
                .all(|child| self.selected.contains(child));
            if !all_selected {
                break;
            }
            for child in self.tree.children(parent) {
                self.selected.remove(child);
            }
            self.selected.insert(parent);
            id = parent;
        }
    }
}
