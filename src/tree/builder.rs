//! Tree construction.
//!
//! A [`TreeSource`] pushes domain objects into a [`TreeBuilder`] in its own
//! natural order; the builder allocates ids from a counter, so identical input
//! always yields identical ids. Malformed input is dropped with a warning and
//! never fails the build.

use super::node::{Node, NodeId, NodePayload, Tree};
use std::collections::HashMap;

/// Anything that can describe a tree to the builder.
pub trait TreeSource<P: NodePayload> {
    /// Push every node into `builder`, parents before children.
    fn populate(&self, builder: &mut TreeBuilder<P>);
}

impl<P, F> TreeSource<P> for F
where
    P: NodePayload,
    F: Fn(&mut TreeBuilder<P>),
{
    fn populate(&self, builder: &mut TreeBuilder<P>) {
        self(builder);
    }
}

/// Incremental builder for a [`Tree`].
#[derive(Debug)]
pub struct TreeBuilder<P: NodePayload> {
    nodes: Vec<Node<P>>,
    keys: HashMap<P::Key, NodeId>,
    dropped: usize,
}

impl<P: NodePayload> TreeBuilder<P> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
            keys: HashMap::new(),
            dropped: 0,
        }
    }

    /// Build a complete tree from `source`.
    pub fn build(source: &impl TreeSource<P>) -> Tree<P> {
        let mut builder = Self::new();
        source.populate(&mut builder);
        let dropped = builder.dropped;
        let tree = builder.finish();
        tracing::debug!(nodes = tree.len(), dropped, "built tree");
        tree
    }

    /// Append a node under `parent`.
    ///
    /// Returns `None` and drops the node when `parent` does not exist, when
    /// the payload's key was already used by an earlier node, or when the id
    /// space is exhausted.
    pub fn add(
        &mut self,
        parent: NodeId,
        display_name: impl Into<String>,
        payload: P,
    ) -> Option<NodeId> {
        let display_name = display_name.into();

        let Some(parent_depth) = self.nodes.get(parent.index()).map(Node::depth) else {
            tracing::warn!(%parent, name = %display_name, "dropping node with unknown parent");
            self.dropped += 1;
            return None;
        };

        let key = payload.object_key();
        if let Some(key) = &key
            && let Some(existing) = self.keys.get(key)
        {
            tracing::warn!(
                ?key,
                %existing,
                name = %display_name,
                "dropping node with duplicate identity"
            );
            self.dropped += 1;
            return None;
        }

        let Ok(raw_id) = u32::try_from(self.nodes.len()) else {
            tracing::warn!(name = %display_name, "node id space exhausted");
            self.dropped += 1;
            return None;
        };
        let id = NodeId(raw_id);

        self.nodes.push(Node {
            id,
            depth: parent_depth + 1,
            display_name,
            supports_sorting_order: payload.supports_sorting_order(),
            supports_search: payload.supports_search(),
            payload: Some(payload),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        if let Some(key) = key {
            self.keys.insert(key, id);
        }
        Some(id)
    }

    /// The synthetic root, parent of all top-level nodes.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes accepted so far, excluding the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes rejected so far.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// Seal the tree, adding the placeholder row when nothing was added.
    #[must_use]
    pub fn finish(mut self) -> Tree<P> {
        if self.nodes[NodeId::ROOT.index()].children.is_empty() {
            let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
            self.nodes.push(Node::placeholder(id));
            self.nodes[NodeId::ROOT.index()].children.push(id);
        }

        let tree = Tree {
            nodes: self.nodes,
            keys: self.keys,
        };
        debug_assert!(
            tree.invariant_violation().is_none(),
            "tree builder produced a malformed tree: {:?}",
            tree.invariant_violation()
        );
        tree
    }
}

impl<P: NodePayload> Default for TreeBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        key: Option<u32>,
        size: u64,
    }

    impl NodePayload for Item {
        type Key = u32;

        fn compare(&self, other: &Self, _column: usize) -> Ordering {
            self.size.cmp(&other.size)
        }

        fn object_key(&self) -> Option<u32> {
            self.key
        }
    }

    fn item(key: u32) -> Item {
        Item {
            key: Some(key),
            size: u64::from(key),
        }
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut builder = TreeBuilder::new();
        let a = builder.add(NodeId::ROOT, "a", item(1));
        let b = builder.add(NodeId::ROOT, "b", item(2));
        let c = builder.add(NodeId(1), "c", item(3));

        assert_eq!(a, Some(NodeId(1)));
        assert_eq!(b, Some(NodeId(2)));
        assert_eq!(c, Some(NodeId(3)));

        let tree = builder.finish();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.root().children(), &[NodeId(1), NodeId(2)]);
        assert_eq!(tree.node(NodeId(3)).map(Node::depth), Some(1));
    }

    #[test]
    fn test_orphan_is_dropped() {
        let mut builder = TreeBuilder::new();
        builder.add(NodeId::ROOT, "a", item(1));
        assert_eq!(builder.add(NodeId(42), "orphan", item(2)), None);
        assert_eq!(builder.dropped(), 1);

        let tree = builder.finish();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.find(&2), None);
    }

    #[test]
    fn test_duplicate_key_is_dropped() {
        let mut builder = TreeBuilder::new();
        let first = builder.add(NodeId::ROOT, "first", item(5));
        assert_eq!(builder.add(NodeId::ROOT, "second", item(5)), None);

        let tree = builder.finish();
        assert_eq!(tree.find(&5), first);
        assert_eq!(tree.root().children().len(), 1);
    }

    #[test]
    fn test_keyless_nodes_never_collide() {
        let mut builder = TreeBuilder::new();
        let unkeyed = Item { key: None, size: 0 };
        assert!(builder.add(NodeId::ROOT, "x", unkeyed.clone()).is_some());
        assert!(builder.add(NodeId::ROOT, "x", unkeyed).is_some());
        assert_eq!(builder.len(), 2);
    }

    #[test]
    fn test_empty_source_yields_placeholder() {
        let tree = TreeBuilder::<Item>::build(&|_: &mut TreeBuilder<Item>| {});
        assert_eq!(tree.root().children(), &[NodeId(1)]);
        assert!(tree.node(NodeId(1)).is_some_and(Node::is_placeholder));
    }

    #[test]
    fn test_build_is_deterministic() {
        let source = |b: &mut TreeBuilder<Item>| {
            for key in 1..=4 {
                if let Some(parent) = b.add(NodeId::ROOT, format!("p{key}"), item(key)) {
                    b.add(parent, format!("c{key}"), item(key + 100));
                }
            }
        };
        let first = TreeBuilder::build(&source);
        let second = TreeBuilder::build(&source);

        let shape = |t: &Tree<Item>| {
            t.iter()
                .map(|n| (n.id(), n.depth(), n.display_name().to_string(), n.parent()))
                .collect::<Vec<_>>()
        };
        assert_eq!(shape(&first), shape(&second));
    }
}
