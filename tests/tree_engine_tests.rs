//! Integration tests for the tree presentation engine.
//!
//! These drive [`TreeView`] through a small bundle/asset payload that is
//! independent of the built-in views.

use layout_explorer::tree::{Bookmark, Column, NodeId, NodePayload, SortSpec, TreeBuilder, TreeView};
use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

// ============================================================================
// Test payload
// ============================================================================

#[derive(Debug, Clone)]
enum Item {
    Bundle { name: &'static str, size: u64 },
    Asset { name: &'static str, size: u64 },
    Category { order: u8 },
}

impl NodePayload for Item {
    type Key = &'static str;

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        match (self, other) {
            (Self::Category { order: a }, Self::Category { order: b }) => a.cmp(b),
            (
                Self::Bundle { name: na, size: sa } | Self::Asset { name: na, size: sa },
                Self::Bundle { name: nb, size: sb } | Self::Asset { name: nb, size: sb },
            ) => match column {
                1 => sa.cmp(sb),
                _ => na.cmp(nb),
            },
            _ => Ordering::Equal,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Bundle { .. } | Self::Asset { .. } => 0,
            Self::Category { .. } => 1,
        }
    }

    fn supports_sorting_order(&self) -> bool {
        !matches!(self, Self::Category { .. })
    }

    fn supports_search(&self) -> bool {
        matches!(self, Self::Bundle { .. })
    }

    fn render_column(&self, display_name: &str, column: usize) -> String {
        match (self, column) {
            (_, 0) => display_name.to_string(),
            (Self::Bundle { size, .. } | Self::Asset { size, .. }, 1) => size.to_string(),
            _ => String::new(),
        }
    }

    fn object_key(&self) -> Option<Self::Key> {
        match self {
            Self::Bundle { name, .. } | Self::Asset { name, .. } => Some(name),
            Self::Category { .. } => None,
        }
    }
}

const COLUMNS: [Column; 2] = [Column::new("Name", 200, true), Column::new("Size", 80, false)];

fn bundle(name: &'static str, size: u64) -> Item {
    Item::Bundle { name, size }
}

fn asset(name: &'static str, size: u64) -> Item {
    Item::Asset { name, size }
}

/// root -> {BundleA(100) -> {a1(30), a2(70)}, BundleB(50) -> {b1(50)}}
fn populate(b: &mut TreeBuilder<Item>) {
    let a = b.add(NodeId::ROOT, "BundleA", bundle("BundleA", 100)).unwrap();
    b.add(a, "a1.png", asset("a1.png", 30));
    b.add(a, "a2.png", asset("a2.png", 70));
    let bb = b.add(NodeId::ROOT, "BundleB", bundle("BundleB", 50)).unwrap();
    b.add(bb, "b1.png", asset("b1.png", 50));
}

fn view(sort: SortSpec) -> TreeView<Item> {
    let mut view = TreeView::new(COLUMNS.to_vec(), sort);
    view.set_data(&populate);
    view
}

fn names(view: &TreeView<Item>) -> Vec<String> {
    view.rows().iter().map(|r| view.cell(r.id, 0)).collect()
}

fn id_of(view: &TreeView<Item>, key: &'static str) -> NodeId {
    view.find(&key).unwrap()
}

// ============================================================================
// Concrete bundles scenario
// ============================================================================

mod bundles_scenario {
    use super::*;

    #[test]
    fn test_sorted_by_size_ascending() {
        let view = view(SortSpec::ascending(1));
        assert_eq!(names(&view), ["BundleB", "BundleA"]);
    }

    #[test]
    fn test_collapsed_bundles_hide_assets() {
        let view = view(SortSpec::ascending(1));
        assert!(view.rows().iter().all(|r| r.depth == 0));
        assert_eq!(view.rows().len(), 2);
    }

    #[test]
    fn test_expanding_bundle_shows_sorted_assets() {
        let mut view = view(SortSpec::ascending(1));
        let a = id_of(&view, "BundleA");
        assert!(view.toggle_expanded(a));

        assert_eq!(names(&view), ["BundleB", "BundleA", "a1.png", "a2.png"]);
        let depths: Vec<usize> = view.rows().iter().map(|r| r.depth).collect();
        assert_eq!(depths, [0, 0, 1, 1]);

        view.sort_by_column(1);
        assert_eq!(names(&view), ["BundleA", "a2.png", "a1.png", "BundleB"]);
    }

    #[test]
    fn test_search_ignores_expansion() {
        let mut view = view(SortSpec::ascending(0));
        view.set_search_query("Bundle");
        assert_eq!(names(&view), ["BundleA", "BundleB"]);
        assert!(view.rows().iter().all(|r| r.depth == 0));

        view.set_search_query("");
        view.expand_all();
        view.set_search_query("Bundle");
        assert_eq!(names(&view), ["BundleA", "BundleB"]);
    }

    #[test]
    fn test_search_follows_active_column() {
        let mut view = view(SortSpec::ascending(1));
        view.set_search_query("bundle");
        assert_eq!(names(&view), ["BundleB", "BundleA"]);
        assert!(view.is_searching());
    }

    #[test]
    fn test_assets_are_not_searchable() {
        let mut view = view(SortSpec::ascending(0));
        view.set_search_query("png");
        assert!(view.rows().is_empty());
    }
}

// ============================================================================
// State across rebuilds
// ============================================================================

mod state_tests {
    use super::*;

    #[test]
    fn test_rebuild_keeps_expansion_and_selection() {
        let mut view = view(SortSpec::descending(1));
        let a = id_of(&view, "BundleA");
        view.set_expanded(a, true);
        view.select([a]);

        view.set_data(&populate);

        assert!(view.is_expanded(a));
        assert_eq!(view.selection(), [a]);
        assert_eq!(view.rows().len(), 4);
    }

    #[test]
    fn test_ids_missing_from_one_rebuild_come_back() {
        let mut view = view(SortSpec::ascending(0));
        let b1 = id_of(&view, "b1.png");
        let bb = id_of(&view, "BundleB");
        view.set_expanded(bb, true);
        view.select([b1]);

        view.set_data(&|b: &mut TreeBuilder<Item>| {
            b.add(NodeId::ROOT, "BundleA", bundle("BundleA", 100));
        });
        assert_eq!(names(&view), ["BundleA"]);
        assert_eq!(view.primary_selection(), None);

        view.set_data(&|_: &mut TreeBuilder<Item>| {});
        assert_eq!(names(&view), [""]);

        view.set_data(&populate);
        assert_eq!(view.expanded(), [bb]);
        assert_eq!(view.primary_selection(), Some(b1));
        assert_eq!(names(&view), ["BundleA", "BundleB", "b1.png"]);
    }

    #[test]
    fn test_bookmark_restore_reveals_hidden_selection() {
        let mut view = view(SortSpec::ascending(0));
        let a = id_of(&view, "BundleA");
        let a2 = id_of(&view, "a2.png");
        view.set_expanded(a, true);
        view.select([a2]);
        view.collapse_all();

        // Selection survives the collapse, so the bookmark holds a hidden row.
        let bookmark = view.capture_bookmark();
        assert!(bookmark.expanded_ids.is_empty());
        assert_eq!(view.row_index_of(a2), None);

        view.select([]);
        view.restore_bookmark(&bookmark);

        assert_eq!(view.selection(), [a2]);
        assert_eq!(view.expanded(), [a]);
        assert_eq!(view.row_index_of(a2), Some(2));
        assert_eq!(view.take_scroll_target(), Some(a2));
    }

    #[test]
    fn test_bookmark_restore_scrolls_to_selection() {
        let mut view = view(SortSpec::ascending(0));
        let a = id_of(&view, "BundleA");
        let a2 = id_of(&view, "a2.png");
        view.set_expanded(a, true);
        view.select([a2]);
        let bookmark = view.capture_bookmark();

        view.collapse_all();
        view.select([]);
        view.restore_bookmark(&bookmark);

        assert_eq!(view.selection(), [a2]);
        assert_eq!(view.expanded(), [a]);
        assert_eq!(view.take_scroll_target(), Some(a2));
        assert_eq!(view.take_scroll_target(), None);
    }

    #[test]
    fn test_bookmark_with_unknown_ids_is_partial() {
        let mut view = view(SortSpec::ascending(0));
        let a = id_of(&view, "BundleA");
        let bookmark = Bookmark {
            selected_ids: vec![NodeId(999), a],
            expanded_ids: vec![NodeId(999)],
        };
        view.restore_bookmark(&bookmark);
        assert_eq!(view.selection(), [a]);
        assert!(view.expanded().is_empty());
    }
}

// ============================================================================
// Navigation and selection callbacks
// ============================================================================

mod navigation_tests {
    use super::*;

    #[test]
    fn test_navigate_reveals_and_selects() {
        let mut view = view(SortSpec::ascending(0));
        let b1 = view.navigate_to(&"b1.png").unwrap();

        assert!(view.is_expanded(id_of(&view, "BundleB")));
        assert_eq!(view.selection(), [b1]);
        assert!(view.row_index_of(b1).is_some());
    }

    #[test]
    fn test_navigate_to_unknown_key_is_noop() {
        let mut view = view(SortSpec::ascending(0));
        assert_eq!(view.navigate_to(&"missing.png"), None);
        assert!(view.selection().is_empty());
    }

    #[test]
    fn test_selection_callback_fires_once_per_change() {
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut view = view(SortSpec::ascending(0));
        view.on_selection_changed(move |node| {
            sink.borrow_mut()
                .push(node.map(|n| n.display_name().to_string()));
        });

        let a = id_of(&view, "BundleA");
        view.select([a]);
        view.select([a]);
        view.select([]);

        assert_eq!(*seen.borrow(), vec![Some("BundleA".to_string()), None]);
    }
}

// ============================================================================
// Placeholder
// ============================================================================

#[test]
fn test_empty_source_yields_placeholder_row() {
    let mut view: TreeView<Item> = TreeView::new(COLUMNS.to_vec(), SortSpec::ascending(0));
    view.set_data(&|_: &mut TreeBuilder<Item>| {});

    assert_eq!(view.rows().len(), 1);
    let placeholder = view.rows()[0].id;
    assert!(view.node(placeholder).unwrap().is_placeholder());
    assert_eq!(view.cell(placeholder, 0), "");

    view.select([placeholder]);
    assert!(view.selection().is_empty());
}

#[test]
fn test_categories_keep_order_in_both_directions() {
    let source = |b: &mut TreeBuilder<Item>| {
        let a = b.add(NodeId::ROOT, "BundleA", bundle("BundleA", 1)).unwrap();
        b.add(a, "Second", Item::Category { order: 2 });
        b.add(a, "First", Item::Category { order: 1 });
        b.add(a, "z.png", asset("z.png", 1));
    };
    let mut view = TreeView::new(COLUMNS.to_vec(), SortSpec::ascending(0));
    view.set_data(&source);
    view.expand_all();
    assert_eq!(names(&view), ["BundleA", "z.png", "First", "Second"]);

    view.sort_by_column(0);
    assert_eq!(names(&view), ["BundleA", "z.png", "First", "Second"]);
}
