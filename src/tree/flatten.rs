//! Row flattening and sibling ordering.
//!
//! [`flatten`] walks the tree in pre-order, sorting each visited sibling list
//! into a scratch order array, and only descends into expanded nodes. The
//! same [`compare_nodes`] comparator orders search results.

use super::node::{Node, NodeId, NodePayload, Tree};
use super::state::ExpansionSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: usize,
    pub ascending: bool,
}

impl SortSpec {
    #[must_use]
    pub const fn new(column: usize, ascending: bool) -> Self {
        Self { column, ascending }
    }

    #[must_use]
    pub const fn ascending(column: usize) -> Self {
        Self::new(column, true)
    }

    #[must_use]
    pub const fn descending(column: usize) -> Self {
        Self::new(column, false)
    }

    /// Same column, opposite direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self::new(self.column, !self.ascending)
    }
}

/// A node as it appears in the flattened list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Row {
    pub id: NodeId,
    pub depth: usize,
}

/// Total order over sibling nodes for one sort spec.
///
/// Payloads of different kinds order by kind rank, then sortable kinds come
/// before grouping kinds. Within a group the payload comparison decides, with
/// the direction applied only to nodes that support sorting order. Equal
/// keys fall back to ascending id, so the order is total and reproducible.
/// The payload-less placeholder sorts last.
pub fn compare_nodes<P: NodePayload>(a: &Node<P>, b: &Node<P>, sort: SortSpec) -> Ordering {
    let primary = match (a.payload(), b.payload()) {
        (Some(pa), Some(pb)) => pa
            .kind_rank()
            .cmp(&pb.kind_rank())
            .then_with(|| {
                b.supports_sorting_order()
                    .cmp(&a.supports_sorting_order())
            })
            .then_with(|| {
                let ordering = pa.compare(pb, sort.column);
                if sort.ascending || !a.supports_sorting_order() {
                    ordering
                } else {
                    ordering.reverse()
                }
            }),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    primary.then_with(|| a.id().cmp(&b.id()))
}

/// Children of `parent` in display order.
pub fn sorted_children<P: NodePayload>(tree: &Tree<P>, parent: NodeId, sort: SortSpec) -> Vec<NodeId> {
    let Some(node) = tree.node(parent) else {
        return Vec::new();
    };
    let mut order: Vec<&Node<P>> = node
        .children()
        .iter()
        .filter_map(|&child| tree.node(child))
        .collect();
    order.sort_by(|a, b| compare_nodes(a, b, sort));
    order.into_iter().map(Node::id).collect()
}

/// Visible rows of `tree` for the given expansion state and sort.
///
/// The root is implicitly expanded and never emitted.
pub fn flatten<P: NodePayload>(tree: &Tree<P>, expanded: &ExpansionSet, sort: SortSpec) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut stack: Vec<NodeId> = sorted_children(tree, NodeId::ROOT, sort);
    stack.reverse();

    while let Some(id) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        rows.push(Row {
            id,
            depth: node.render_depth(),
        });
        if node.has_children() && expanded.contains(id) {
            stack.extend(sorted_children(tree, id, sort).into_iter().rev());
        }
    }

    tracing::trace!(rows = rows.len(), ?sort, "flattened tree");
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;

    #[derive(Debug, Clone)]
    enum Kind {
        Leaf { name: &'static str, size: u64 },
        Category { sort_value: u8 },
    }

    impl NodePayload for Kind {
        type Key = &'static str;

        fn compare(&self, other: &Self, column: usize) -> Ordering {
            match (self, other) {
                (Self::Leaf { name: a, size: sa }, Self::Leaf { name: b, size: sb }) => {
                    if column == 0 { a.cmp(b) } else { sa.cmp(sb) }
                }
                (Self::Category { sort_value: a }, Self::Category { sort_value: b }) => a.cmp(b),
                _ => Ordering::Equal,
            }
        }

        fn kind_rank(&self) -> u8 {
            match self {
                Self::Leaf { .. } => 0,
                Self::Category { .. } => 1,
            }
        }

        fn supports_sorting_order(&self) -> bool {
            matches!(self, Self::Leaf { .. })
        }
    }

    fn leaf(name: &'static str, size: u64) -> Kind {
        Kind::Leaf { name, size }
    }

    fn names(tree: &Tree<Kind>, rows: &[Row]) -> Vec<String> {
        rows.iter()
            .filter_map(|r| tree.node(r.id))
            .map(|n| n.display_name().to_string())
            .collect()
    }

    #[test]
    fn test_sort_by_size_both_directions() {
        let mut b = TreeBuilder::new();
        b.add(NodeId::ROOT, "A", leaf("A", 100));
        b.add(NodeId::ROOT, "B", leaf("B", 50));
        b.add(NodeId::ROOT, "C", leaf("C", 75));
        let tree = b.finish();
        let expanded = ExpansionSet::new();

        let asc = flatten(&tree, &expanded, SortSpec::ascending(1));
        assert_eq!(names(&tree, &asc), ["B", "C", "A"]);

        let desc = flatten(&tree, &expanded, SortSpec::descending(1));
        assert_eq!(names(&tree, &desc), ["A", "C", "B"]);
    }

    #[test]
    fn test_collapsed_subtrees_are_skipped() {
        let mut b = TreeBuilder::new();
        let a = b.add(NodeId::ROOT, "A", leaf("A", 1)).expect("a");
        b.add(a, "A1", leaf("A1", 1));
        let tree = b.finish();

        let mut expanded = ExpansionSet::new();
        let rows = flatten(&tree, &expanded, SortSpec::ascending(0));
        assert_eq!(names(&tree, &rows), ["A"]);

        expanded.insert(a);
        let rows = flatten(&tree, &expanded, SortSpec::ascending(0));
        assert_eq!(names(&tree, &rows), ["A", "A1"]);
        assert_eq!(rows[1].depth, 1);
    }

    #[test]
    fn test_categories_ignore_direction() {
        let mut b = TreeBuilder::new();
        let parent = b.add(NodeId::ROOT, "asset", leaf("asset", 1)).expect("parent");
        b.add(parent, "External", Kind::Category { sort_value: 1 });
        b.add(parent, "Internal", Kind::Category { sort_value: 0 });
        let tree = b.finish();

        let mut expanded = ExpansionSet::new();
        expanded.insert(parent);

        for sort in [SortSpec::ascending(1), SortSpec::descending(1)] {
            let rows = flatten(&tree, &expanded, sort);
            assert_eq!(names(&tree, &rows), ["asset", "Internal", "External"]);
        }
    }

    #[test]
    fn test_ties_break_by_id_in_both_directions() {
        let mut b = TreeBuilder::new();
        b.add(NodeId::ROOT, "first", leaf("x", 10));
        b.add(NodeId::ROOT, "second", leaf("x", 10));
        let tree = b.finish();
        let expanded = ExpansionSet::new();

        for sort in [SortSpec::ascending(1), SortSpec::descending(1)] {
            let rows = flatten(&tree, &expanded, sort);
            assert_eq!(names(&tree, &rows), ["first", "second"]);
        }
    }

    #[test]
    fn test_placeholder_is_the_only_row_of_empty_tree() {
        let tree: Tree<Kind> = Tree::empty();
        let rows = flatten(&tree, &ExpansionSet::new(), SortSpec::default());
        assert_eq!(rows, vec![Row { id: NodeId(1), depth: 0 }]);
    }

    #[test]
    fn test_sorted_children_does_not_mutate_tree() {
        let mut b = TreeBuilder::new();
        b.add(NodeId::ROOT, "big", leaf("big", 9));
        b.add(NodeId::ROOT, "small", leaf("small", 1));
        let tree = b.finish();

        let order = sorted_children(&tree, NodeId::ROOT, SortSpec::ascending(1));
        assert_eq!(order, vec![NodeId(2), NodeId(1)]);
        assert_eq!(tree.root().children(), &[NodeId(1), NodeId(2)]);
    }
}
