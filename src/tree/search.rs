//! Whole-tree search.
//!
//! Search ignores expansion: every node below the root is visited with an
//! explicit stack, searchable nodes are tested, and the matches come back as
//! one flat list sorted by the active column.

use super::flatten::{Row, SortSpec, compare_nodes};
use super::node::{Node, NodeId, NodePayload, Tree};

/// Searchable nodes whose payload matches `query`, as depth-0 rows.
///
/// An empty query means "not searching" and yields no rows.
pub fn search<P: NodePayload>(tree: &Tree<P>, query: &str, sort: SortSpec) -> Vec<Row> {
    if query.is_empty() {
        return Vec::new();
    }
    let query_lower = query.to_lowercase();

    let mut matches: Vec<&Node<P>> = Vec::new();
    let mut stack = vec![NodeId::ROOT];
    let mut visited = 0usize;

    while let Some(id) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        for child in node.children().iter().filter_map(|&c| tree.node(c)) {
            visited += 1;
            // Non-searchable nodes are still descended into.
            if child.supports_search() && child.matches_search(&query_lower) {
                matches.push(child);
            }
            if child.has_children() {
                stack.push(child.id());
            }
        }
    }

    matches.sort_by(|a, b| compare_nodes(a, b, sort));
    tracing::debug!(query, visited, matches = matches.len(), "searched tree");

    matches
        .into_iter()
        .map(|node| Row {
            id: node.id(),
            depth: 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeBuilder;
    use std::cmp::Ordering;

    #[derive(Debug, Clone)]
    struct Entry {
        size: u64,
        searchable: bool,
    }

    impl NodePayload for Entry {
        type Key = ();

        fn compare(&self, other: &Self, _column: usize) -> Ordering {
            self.size.cmp(&other.size)
        }

        fn supports_search(&self) -> bool {
            self.searchable
        }
    }

    fn entry(size: u64, searchable: bool) -> Entry {
        Entry { size, searchable }
    }

    fn sample() -> Tree<Entry> {
        let mut b = TreeBuilder::new();
        let group = b.add(NodeId::ROOT, "Textures", entry(0, false)).expect("group");
        b.add(group, "hero_texture", entry(30, true));
        b.add(group, "villain_texture", entry(10, true));
        let other = b.add(NodeId::ROOT, "texture_atlas", entry(20, true)).expect("other");
        b.add(other, "deep_TEXTURE", entry(5, true));
        b.add(NodeId::ROOT, "audio", entry(1, true));
        b.finish()
    }

    #[test]
    fn test_empty_query_is_not_searching() {
        assert!(search(&sample(), "", SortSpec::default()).is_empty());
    }

    #[test]
    fn test_search_ignores_expansion_and_skips_non_searchable() {
        let tree = sample();
        let rows = search(&tree, "texture", SortSpec::ascending(1));
        let names: Vec<&str> = rows
            .iter()
            .filter_map(|r| tree.node(r.id))
            .map(Node::display_name)
            .collect();

        // "Textures" is not searchable, its children are.
        assert_eq!(
            names,
            ["deep_TEXTURE", "villain_texture", "texture_atlas", "hero_texture"]
        );
        assert!(rows.iter().all(|r| r.depth == 0));
    }

    #[test]
    fn test_search_sorted_by_direction() {
        let tree = sample();
        let rows = search(&tree, "texture", SortSpec::descending(1));
        let sizes: Vec<u64> = rows
            .iter()
            .filter_map(|r| tree.node(r.id))
            .filter_map(|n| n.payload().map(|p| p.size))
            .collect();
        assert_eq!(sizes, [30, 20, 10, 5]);
    }

    #[test]
    fn test_no_matches() {
        assert!(search(&sample(), "shader", SortSpec::default()).is_empty());
    }
}
