//! Tree nodes, node ids and the arena that owns them.
//!
//! A [`Tree`] is a flat arena of [`Node`]s indexed by [`NodeId`]. Parents hold
//! their children by id, so sorting and flattening only ever produce order
//! arrays and never touch the arena itself.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

// ============================================================================
// Node identity
// ============================================================================

/// Identity of a node within one tree build.
///
/// Ids are dense: a node's id is also its index in the arena. Id `0` is
/// always the synthetic root.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The synthetic root of every tree.
    pub const ROOT: Self = Self(0);

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Arena index of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// ============================================================================
// Per-kind behaviour
// ============================================================================

/// Behaviour a node payload contributes to sorting, searching and rendering.
///
/// Each view implements this on a closed enum of its node kinds. Every method
/// except [`NodePayload::compare`] has a default, so kinds only override what
/// they actually need.
pub trait NodePayload {
    /// Stable identity of the domain object a node wraps.
    type Key: Clone + Eq + Hash + fmt::Debug;

    /// Ordering of two payloads of the same kind on `column`.
    ///
    /// Only called when both payloads report the same [`kind_rank`](Self::kind_rank).
    fn compare(&self, other: &Self, column: usize) -> Ordering;

    /// Rank used to order payloads of different kinds relative to each other.
    fn kind_rank(&self) -> u8 {
        0
    }

    /// Whether the active sort direction may reorder this node.
    ///
    /// Grouping nodes return `false` so flipping the direction leaves them in
    /// their natural order.
    fn supports_sorting_order(&self) -> bool {
        true
    }

    /// Whether this node takes part in search matching.
    fn supports_search(&self) -> bool {
        false
    }

    /// Test against an already lower-cased query.
    fn matches_search(&self, display_name: &str, query_lower: &str) -> bool {
        display_name.to_lowercase().contains(query_lower)
    }

    /// Text shown in `column`. Column 0 is the name column.
    fn render_column(&self, display_name: &str, column: usize) -> String {
        if column == 0 {
            display_name.to_string()
        } else {
            String::new()
        }
    }

    /// Identity of the wrapped object, used to find its node again.
    fn object_key(&self) -> Option<Self::Key> {
        None
    }

    /// Object this node points at when activated.
    ///
    /// Usually the wrapped object itself; reference nodes point elsewhere.
    fn target_key(&self) -> Option<Self::Key> {
        self.object_key()
    }
}

// ============================================================================
// Node
// ============================================================================

/// One element of the display tree.
#[derive(Debug, Clone)]
pub struct Node<P> {
    pub(crate) id: NodeId,
    pub(crate) depth: i32,
    pub(crate) display_name: String,
    pub(crate) payload: Option<P>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) supports_sorting_order: bool,
    pub(crate) supports_search: bool,
}

impl<P> Node<P> {
    pub(crate) fn root() -> Self {
        Self {
            id: NodeId::ROOT,
            depth: -1,
            display_name: String::new(),
            payload: None,
            parent: None,
            children: Vec::new(),
            supports_sorting_order: true,
            supports_search: false,
        }
    }

    pub(crate) fn placeholder(id: NodeId) -> Self {
        Self {
            id,
            parent: Some(NodeId::ROOT),
            ..Self::root()
        }
    }

    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Tree depth; `-1` for the root and the empty-tree placeholder.
    #[must_use]
    pub const fn depth(&self) -> i32 {
        self.depth
    }

    /// Depth used for indentation when the node is shown as a row.
    #[must_use]
    pub fn render_depth(&self) -> usize {
        usize::try_from(self.depth).unwrap_or(0)
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub const fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[must_use]
    pub const fn supports_sorting_order(&self) -> bool {
        self.supports_sorting_order
    }

    #[must_use]
    pub const fn supports_search(&self) -> bool {
        self.supports_search
    }

    /// True for the empty-label row synthesized when a tree has no content.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        !self.id.is_root() && self.payload.is_none()
    }
}

impl<P: NodePayload> Node<P> {
    /// Case-insensitive match of an already lower-cased query.
    #[must_use]
    pub fn matches_search(&self, query_lower: &str) -> bool {
        self.payload
            .as_ref()
            .is_some_and(|p| p.matches_search(&self.display_name, query_lower))
    }

    /// Text for one column; empty for the placeholder.
    #[must_use]
    pub fn render_column(&self, column: usize) -> String {
        self.payload
            .as_ref()
            .map(|p| p.render_column(&self.display_name, column))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn object_key(&self) -> Option<P::Key> {
        self.payload.as_ref().and_then(NodePayload::object_key)
    }

    #[must_use]
    pub fn target_key(&self) -> Option<P::Key> {
        self.payload.as_ref().and_then(NodePayload::target_key)
    }
}

// ============================================================================
// Tree arena
// ============================================================================

/// An immutable node tree produced by [`TreeBuilder`](super::TreeBuilder).
#[derive(Debug, Clone)]
pub struct Tree<P: NodePayload> {
    pub(crate) nodes: Vec<Node<P>>,
    pub(crate) keys: HashMap<P::Key, NodeId>,
}

impl<P: NodePayload> Tree<P> {
    /// A tree holding only the root and its placeholder child.
    #[must_use]
    pub fn empty() -> Self {
        super::TreeBuilder::new().finish()
    }

    #[must_use]
    pub fn root(&self) -> &Node<P> {
        &self.nodes[NodeId::ROOT.index()]
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<P>> {
        self.nodes.get(id.index())
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Number of nodes including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the tree carries no domain nodes (only root and placeholder).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.payload.is_none())
    }

    /// Whether `id` names a real node that can be selected.
    #[must_use]
    pub fn is_selectable(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|n| n.payload.is_some())
    }

    /// All nodes in id order, root first.
    pub fn iter(&self) -> impl Iterator<Item = &Node<P>> {
        self.nodes.iter()
    }

    /// Node wrapping the object identified by `key`.
    #[must_use]
    pub fn find(&self, key: &P::Key) -> Option<NodeId> {
        self.keys.get(key).copied()
    }

    /// Ancestors of `id`, nearest first, excluding the root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.node(id).and_then(Node::parent);
        while let Some(parent) = current
            && !parent.is_root()
        {
            chain.push(parent);
            current = self.node(parent).and_then(Node::parent);
        }
        chain
    }

    /// Describe the first structural defect found, if any.
    ///
    /// Checks id/index agreement, parent links, depth contiguity and key
    /// uniqueness. A tree fresh out of the builder always passes.
    #[must_use]
    pub fn invariant_violation(&self) -> Option<String> {
        let root = self.nodes.first()?;
        if root.depth != -1 || root.parent.is_some() {
            return Some("root must have depth -1 and no parent".to_string());
        }
        if root.children.is_empty() {
            return Some("root has no children".to_string());
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if node.id.index() != index {
                return Some(format!("node at index {index} carries id {}", node.id));
            }
            for &child_id in &node.children {
                let Some(child) = self.node(child_id) else {
                    return Some(format!("{} lists missing child {child_id}", node.id));
                };
                if child.parent != Some(node.id) {
                    return Some(format!("{child_id} does not point back to {}", node.id));
                }
                let expected = if child.is_placeholder() {
                    -1
                } else {
                    node.depth + 1
                };
                if child.depth != expected {
                    return Some(format!(
                        "{child_id} has depth {} but parent {} has depth {}",
                        child.depth, node.id, node.depth
                    ));
                }
            }
        }

        let keyed = self.nodes.iter().filter_map(Node::object_key).count();
        if keyed != self.keys.len() {
            return Some(format!(
                "{keyed} keyed nodes but {} index entries",
                self.keys.len()
            ));
        }
        None
    }
}

impl<P: NodePayload> Default for Tree<P> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;

    #[derive(Debug, Clone)]
    struct Label(&'static str);

    impl NodePayload for Label {
        type Key = &'static str;

        fn compare(&self, other: &Self, _column: usize) -> Ordering {
            self.0.cmp(other.0)
        }

        fn object_key(&self) -> Option<Self::Key> {
            Some(self.0)
        }
    }

    #[test]
    fn test_node_id_display_and_root() {
        assert_eq!(NodeId(7).to_string(), "#7");
        assert!(NodeId::ROOT.is_root());
        assert!(!NodeId(1).is_root());
        assert_eq!(NodeId(3).index(), 3);
    }

    #[test]
    fn test_empty_tree_has_placeholder() {
        let tree: Tree<Label> = Tree::empty();
        assert_eq!(tree.len(), 2);
        assert!(tree.is_empty());

        let placeholder = tree.node(NodeId(1)).expect("placeholder");
        assert!(placeholder.is_placeholder());
        assert_eq!(placeholder.depth(), -1);
        assert_eq!(placeholder.render_depth(), 0);
        assert_eq!(placeholder.display_name(), "");
        assert_eq!(placeholder.render_column(0), "");
        assert!(tree.invariant_violation().is_none());
    }

    #[test]
    fn test_default_search_is_case_insensitive_substring() {
        let mut builder = TreeBuilder::new();
        let id = builder
            .add(NodeId::ROOT, "Characters.bundle", Label("c"))
            .expect("added");
        let tree = builder.finish();
        let node = tree.node(id).expect("node");

        assert!(node.matches_search("char"));
        assert!(node.matches_search(".bundle"));
        assert!(!node.matches_search("props"));
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let mut builder = TreeBuilder::new();
        let a = builder.add(NodeId::ROOT, "a", Label("a")).expect("a");
        let b = builder.add(a, "b", Label("b")).expect("b");
        let c = builder.add(b, "c", Label("c")).expect("c");
        let tree = builder.finish();

        assert_eq!(tree.ancestors(c), vec![b, a]);
        assert!(tree.ancestors(a).is_empty());
        assert_eq!(tree.find(&"c"), Some(c));
        assert_eq!(tree.node(c).map(Node::depth), Some(2));
    }
}
