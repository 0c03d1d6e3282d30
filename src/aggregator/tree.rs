//! Aggregated logger-namespace tree.
//!
//! Nodes live in an arena owned by [`LogTree`]. Children are kept as ordered
//! [`NodeId`] lists and the parent link is a plain index, so ownership only
//! flows from the tree down and no reference cycles can form.
//!
//! Cumulative frequencies are computed on first read and cached for the
//! lifetime of the tree. The tree cannot be mutated once built, so the cached
//! value never goes stale.

use crate::utils::config::{ROOT_LABEL, SEGMENT_SEPARATOR};
use std::cmp::Ordering;
use std::sync::{Arc, OnceLock};

/// Handle to a node inside a [`LogTree`]
///
/// **Public** - only meaningful for the tree that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index of this node
    pub fn index(self) -> usize {
        self.0
    }
}

/// Distinguishes the synthetic root from namespace nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Insertion point and traversal anchor; never counted
    Root,
    /// One segment position in the logger namespace
    Path,
}

/// A single node of the namespace tree
#[derive(Debug, Clone)]
pub struct PathNode {
    kind: NodeKind,

    /// Logger name this node was first created for; shared with every
    /// prefix node created from the same name
    source: Arc<str>,

    /// `source[..name_end]` is the dotted path from the root
    name_end: usize,

    /// `source[segment_start..name_end]` is the last segment
    segment_start: usize,

    /// Number of segments from the root down to this node
    depth: usize,

    /// Events whose logger is exactly `full_name`
    direct_count: u64,

    /// Non-owning link used for upward traversal only
    parent: Option<NodeId>,

    /// Always sorted by [`compare_segments`] on the last segment
    children: Vec<NodeId>,

    frequency: OnceLock<u64>,
}

impl PathNode {
    fn root() -> Self {
        Self {
            kind: NodeKind::Root,
            source: Arc::from(""),
            name_end: 0,
            segment_start: 0,
            depth: 0,
            direct_count: 0,
            parent: None,
            children: Vec::new(),
            frequency: OnceLock::new(),
        }
    }

    /// `source[..name_end]` must extend the parent's full name by one segment
    fn new(
        parent_node: &PathNode,
        parent: NodeId,
        source: Arc<str>,
        name_end: usize,
        direct_count: u64,
    ) -> Self {
        let segment_start = if parent_node.is_root() {
            0
        } else {
            parent_node.name_end + SEGMENT_SEPARATOR.len_utf8()
        };
        Self {
            kind: NodeKind::Path,
            source,
            name_end,
            segment_start,
            depth: parent_node.depth + 1,
            direct_count,
            parent: Some(parent),
            children: Vec::new(),
            frequency: OnceLock::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }

    /// Dot-joined path from the root, used as tooltip and search key
    pub fn full_name(&self) -> &str {
        &self.source[..self.name_end]
    }

    pub fn direct_count(&self) -> u64 {
        self.direct_count
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of segments; the root sits at depth 0
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Final path component, or the root label for the root
    pub fn display_segment(&self) -> &str {
        match self.kind {
            NodeKind::Root => ROOT_LABEL,
            NodeKind::Path => self.last_segment(),
        }
    }

    fn last_segment(&self) -> &str {
        &self.source[self.segment_start..self.name_end]
    }
}

/// Sibling ordering: case-insensitive, ties broken by the raw segment so the
/// order is total.
pub fn compare_segments(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Namespace tree built from a batch of log events
///
/// **Public** - produced by [`build_tree`](super::build_tree), read-only afterwards
#[derive(Debug, Clone)]
pub struct LogTree {
    nodes: Vec<PathNode>,
    total_events: u64,
    distinct_loggers: usize,
}

impl Default for LogTree {
    fn default() -> Self {
        Self::new()
    }
}

impl LogTree {
    /// Create a tree holding only the root
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![PathNode::root()],
            total_events: 0,
            distinct_loggers: 0,
        }
    }

    /// Attach a new node named `source[..name_end]` under `parent`, keeping
    /// siblings ordered
    ///
    /// **Crate** - only the aggregator grows the tree
    pub(crate) fn insert_child(
        &mut self,
        parent: NodeId,
        source: &Arc<str>,
        name_end: usize,
        direct_count: u64,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let node = PathNode::new(
            &self.nodes[parent.0],
            parent,
            Arc::clone(source),
            name_end,
            direct_count,
        );

        let position = {
            let nodes = &self.nodes;
            let segment = node.last_segment();
            match nodes[parent.0]
                .children
                .binary_search_by(|c| compare_segments(nodes[c.0].last_segment(), segment))
            {
                Ok(pos) | Err(pos) => pos,
            }
        };

        self.nodes.push(node);
        self.nodes[parent.0].children.insert(position, id);
        id
    }

    pub(crate) fn set_totals(&mut self, total_events: u64, distinct_loggers: usize) {
        self.total_events = total_events;
        self.distinct_loggers = distinct_loggers;
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Borrow a node
    ///
    /// # Panics
    /// If `id` was not produced by this tree
    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&PathNode> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).children()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent()
    }

    pub fn display_segment(&self, id: NodeId) -> &str {
        self.node(id).display_segment()
    }

    pub fn full_name(&self, id: NodeId) -> &str {
        self.node(id).full_name()
    }

    pub fn direct_count(&self, id: NodeId) -> u64 {
        self.node(id).direct_count()
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).is_leaf()
    }

    /// Direct count plus the cumulative frequency of every child
    ///
    /// **Public** - computed once per node, then served from cache
    ///
    /// Uncached descendants are filled bottom-up without recursion, so the
    /// stack use does not grow with the depth of the namespace.
    pub fn frequency(&self, id: NodeId) -> u64 {
        if let Some(&cached) = self.node(id).frequency.get() {
            return cached;
        }

        // Pre-order puts every child after its parent; walking it backwards
        // fills children before the parents that sum them.
        let pending = self.uncached_rows(id);
        let mut value = 0;
        for &pending_id in pending.iter().rev() {
            let node = self.node(pending_id);
            value = *node.frequency.get_or_init(|| {
                node.direct_count
                    + node
                        .children
                        .iter()
                        .map(|&child| self.cached_frequency(child))
                        .sum::<u64>()
            });
        }
        value
    }

    /// `id` plus its descendants in pre-order, skipping subtrees already cached
    fn uncached_rows(&self, id: NodeId) -> Vec<NodeId> {
        let mut rows = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            rows.push(current);
            stack.extend(
                self.children(current)
                    .iter()
                    .filter(|&&child| self.node(child).frequency.get().is_none()),
            );
        }
        rows
    }

    /// Cached frequency of a node whose subtree has been filled
    fn cached_frequency(&self, id: NodeId) -> u64 {
        self.node(id).frequency.get().copied().unwrap_or_default()
    }

    /// Number of events the tree was built from
    pub fn total_events(&self) -> u64 {
        self.total_events
    }

    /// Number of distinct logger strings seen in the input
    pub fn distinct_loggers(&self) -> usize {
        self.distinct_loggers
    }

    /// Number of namespace nodes, excluding the root
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// Find the node for an exact segment path
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Option<NodeId> {
        let mut current = self.root();
        for segment in segments {
            let segment = segment.as_ref();
            let children = self.children(current);
            let pos = children
                .binary_search_by(|c| compare_segments(self.node(*c).last_segment(), segment))
                .ok()?;
            current = children[pos];
        }
        Some(current)
    }

    /// Find the node whose full dotted name is `name`
    pub fn find(&self, name: &str) -> Option<NodeId> {
        let segments: Vec<&str> = name.split(SEGMENT_SEPARATOR).collect();
        self.lookup(&segments)
    }

    /// Namespace parts from the root down to `id`; empty for the root
    pub fn segments(&self, id: NodeId) -> Vec<&str> {
        self.path_to(id)
            .into_iter()
            .filter(|&n| !self.node(n).is_root())
            .map(|n| self.node(n).last_segment())
            .collect()
    }

    /// Walk the parent links from `id` (exclusive) up to the root (inclusive)
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Path of node ids from the root down to `id`, both inclusive
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestors(id).collect();
        path.reverse();
        path.push(id);
        path
    }

    /// True if `ancestor` lies on the path from the root to `id` (exclusive)
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|a| a == ancestor)
    }

    /// Leaf descendants of `id` in sorted pre-order; yields `id` itself if it is a leaf
    pub fn depth_first_leaves(&self, id: NodeId) -> DepthFirstLeaves<'_> {
        DepthFirstLeaves {
            tree: self,
            stack: vec![id],
        }
    }

    /// Every node in pre-order, starting with the root at row 0
    pub fn all_rows(&self) -> AllRows<'_> {
        self.subtree_rows(self.root())
    }

    /// `id` and all of its descendants in pre-order
    pub fn subtree_rows(&self, id: NodeId) -> AllRows<'_> {
        AllRows {
            tree: self,
            stack: vec![id],
        }
    }
}

/// Iterator returned by [`LogTree::ancestors`]
pub struct Ancestors<'a> {
    tree: &'a LogTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

/// Iterator returned by [`LogTree::depth_first_leaves`]
pub struct DepthFirstLeaves<'a> {
    tree: &'a LogTree,
    stack: Vec<NodeId>,
}

impl Iterator for DepthFirstLeaves<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(id) = self.stack.pop() {
            let children = self.tree.children(id);
            if children.is_empty() {
                return Some(id);
            }
            self.stack.extend(children.iter().rev());
        }
        None
    }
}

/// Iterator returned by [`LogTree::all_rows`]
pub struct AllRows<'a> {
    tree: &'a LogTree,
    stack: Vec<NodeId>,
}

impl Iterator for AllRows<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(tree: &mut LogTree, parent: NodeId, name: &str, direct: u64) -> NodeId {
        let source: Arc<str> = Arc::from(name);
        tree.insert_child(parent, &source, name.len(), direct)
    }

    fn sample() -> LogTree {
        let mut tree = LogTree::new();
        let root = tree.root();
        let b = add(&mut tree, root, "b", 1);
        let a = add(&mut tree, root, "A", 0);
        add(&mut tree, a, "A.z", 3);
        add(&mut tree, a, "A.m", 2);
        add(&mut tree, b, "b.c", 4);
        tree
    }

    #[test]
    fn test_insert_keeps_children_sorted() {
        let tree = sample();
        let names: Vec<&str> = tree
            .children(tree.root())
            .iter()
            .map(|&c| tree.display_segment(c))
            .collect();
        assert_eq!(names, vec!["A", "b"]);

        let a = tree.find("A").unwrap();
        let names: Vec<&str> = tree.children(a).iter().map(|&c| tree.display_segment(c)).collect();
        assert_eq!(names, vec!["m", "z"]);
    }

    #[test]
    fn test_compare_segments_case_insensitive() {
        assert_eq!(compare_segments("Apple", "banana"), Ordering::Less);
        assert_eq!(compare_segments("apple", "Apple"), Ordering::Greater);
        assert_eq!(compare_segments("", "a"), Ordering::Less);
    }

    #[test]
    fn test_frequency_sums_descendants() {
        let tree = sample();
        assert_eq!(tree.frequency(tree.find("A").unwrap()), 5);
        assert_eq!(tree.frequency(tree.find("b").unwrap()), 5);
        assert_eq!(tree.frequency(tree.root()), 10);
        assert_eq!(tree.frequency(tree.find("A.z").unwrap()), 3);
    }

    #[test]
    fn test_root_display_and_parent() {
        let tree = sample();
        let root = tree.root();
        assert_eq!(tree.display_segment(root), ROOT_LABEL);
        assert!(tree.node(root).is_root());
        assert_eq!(tree.parent(root), None);

        let m = tree.find("A.m").unwrap();
        assert_eq!(tree.path_to(m), vec![root, tree.find("A").unwrap(), m]);
        assert!(tree.is_ancestor(root, m));
        assert!(!tree.is_ancestor(m, m));
    }

    #[test]
    fn test_depth_first_leaves_of_leaf_is_itself() {
        let tree = sample();
        let z = tree.find("A.z").unwrap();
        assert_eq!(tree.depth_first_leaves(z).collect::<Vec<_>>(), vec![z]);
    }

    #[test]
    fn test_all_rows_preorder() {
        let tree = sample();
        let names: Vec<&str> = tree.all_rows().map(|id| tree.full_name(id)).collect();
        assert_eq!(names, vec!["", "A", "A.m", "A.z", "b", "b.c"]);
        assert_eq!(tree.len(), 5);
    }

    #[test]
    fn test_child_names_and_depth_follow_parent() {
        let tree = sample();
        let m = tree.find("A.m").unwrap();
        assert_eq!(tree.full_name(m), "A.m");
        assert_eq!(tree.node(m).depth(), 2);
        assert_eq!(tree.segments(m), vec!["A", "m"]);
        assert!(tree.segments(tree.root()).is_empty());
    }

    #[test]
    fn test_frequency_after_cached_child() {
        let tree = sample();
        // Reading a child first leaves part of the subtree cached
        assert_eq!(tree.frequency(tree.find("A.m").unwrap()), 2);
        assert_eq!(tree.frequency(tree.root()), 10);
        assert_eq!(tree.frequency(tree.find("A").unwrap()), 5);
    }

    #[test]
    fn test_frequency_of_deep_chain_on_small_stack() {
        let name: Arc<str> = Arc::from("a.".repeat(10_000).trim_end_matches('.'));
        let mut tree = LogTree::new();
        let mut parent = tree.root();
        for end in (1..=name.len()).step_by(2) {
            parent = tree.insert_child(parent, &name, end, 1);
        }

        let frequency = std::thread::Builder::new()
            .stack_size(2 << 20)
            .spawn(move || tree.frequency(tree.root()))
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(frequency, 10_000);
    }

    #[test]
    fn test_lookup_missing() {
        let tree = sample();
        assert!(tree.find("A.q").is_none());
        assert!(tree.find("a").is_none());
        assert_eq!(tree.lookup::<&str>(&[]), Some(tree.root()));
    }
}
