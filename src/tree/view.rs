//! The tree view engine.
//!
//! [`TreeView`] owns one built [`Tree`] plus the interaction state around it
//! (expansion, selection, search query and sort) and hands out the rows to
//! draw. Rows are cached and recomputed lazily after any state change;
//! interaction never rebuilds the tree.

use super::builder::{TreeBuilder, TreeSource};
use super::flatten::{Row, SortSpec, flatten};
use super::node::{Node, NodeId, NodePayload, Tree};
use super::search::search;
use super::state::{Bookmark, ExpansionSet, SelectionSet};
use std::cell::OnceCell;
use std::fmt;

/// Header definition of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub label: &'static str,
    pub default_width: u16,
    pub default_sort_ascending: bool,
}

impl Column {
    #[must_use]
    pub const fn new(label: &'static str, default_width: u16, default_sort_ascending: bool) -> Self {
        Self {
            label,
            default_width,
            default_sort_ascending,
        }
    }
}

/// Callback fired once per selection change with the new primary node.
pub type SelectionCallback<P> = Box<dyn FnMut(Option<&Node<P>>)>;

/// Interactive view over a node tree.
pub struct TreeView<P: NodePayload> {
    tree: Tree<P>,
    columns: Vec<Column>,
    sort: SortSpec,
    expanded: ExpansionSet,
    selection: SelectionSet,
    query: String,
    rows: OnceCell<Vec<Row>>,
    on_selection_changed: Option<SelectionCallback<P>>,
    scroll_target: Option<NodeId>,
}

impl<P: NodePayload> TreeView<P> {
    /// Empty view with a fixed column schema.
    ///
    /// An out-of-range sort column falls back to column 0.
    #[must_use]
    pub fn new(columns: Vec<Column>, sort: SortSpec) -> Self {
        let sort = if sort.column < columns.len() {
            sort
        } else {
            SortSpec::new(0, sort.ascending)
        };
        Self {
            tree: Tree::empty(),
            columns,
            sort,
            expanded: ExpansionSet::new(),
            selection: SelectionSet::new(),
            query: String::new(),
            rows: OnceCell::new(),
            on_selection_changed: None,
            scroll_target: None,
        }
    }

    // ========================================================================
    // Data
    // ========================================================================

    /// Rebuild the tree from `source`.
    ///
    /// Expanded and selected ids carry over unchanged. Ids the new tree lacks
    /// fail to resolve until a later reload brings them back. The selection
    /// callback fires when the node the primary selection resolves to changes.
    pub fn set_data(&mut self, source: &impl TreeSource<P>) {
        let before = self.resolved_primary();
        self.tree = TreeBuilder::build(source);
        if self.resolved_primary() != before {
            self.notify_selection_changed();
        }

        self.scroll_target = None;
        self.invalidate();
    }

    #[must_use]
    pub const fn tree(&self) -> &Tree<P> {
        &self.tree
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&Node<P>> {
        self.tree.node(id)
    }

    /// Text of one cell.
    #[must_use]
    pub fn cell(&self, id: NodeId, column: usize) -> String {
        self.tree
            .node(id)
            .map(|node| node.render_column(column))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    // ========================================================================
    // Rows
    // ========================================================================

    /// All rows to display: search results while searching, else the
    /// expanded tree.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        self.rows.get_or_init(|| {
            if self.query.is_empty() {
                flatten(&self.tree, &self.expanded, self.sort)
            } else {
                search(&self.tree, &self.query, self.sort)
            }
        })
    }

    /// Rows `first..=last`, clamped to what exists.
    #[must_use]
    pub fn rows_in(&self, first: usize, last: usize) -> &[Row] {
        let rows = self.rows();
        if first >= rows.len() || first > last {
            return &[];
        }
        let end = last.saturating_add(1).min(rows.len());
        &rows[first..end]
    }

    /// Position of `id` among the current rows.
    #[must_use]
    pub fn row_index_of(&self, id: NodeId) -> Option<usize> {
        self.rows().iter().position(|row| row.id == id)
    }

    fn invalidate(&mut self) {
        self.rows.take();
    }

    // ========================================================================
    // Expansion
    // ========================================================================

    #[must_use]
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(id)
    }

    /// Flip the expansion of `id`. Returns the new state.
    ///
    /// Nodes without children stay collapsed.
    pub fn toggle_expanded(&mut self, id: NodeId) -> bool {
        let expand = !self.is_expanded(id);
        self.set_expanded(id, expand)
    }

    /// Returns whether `id` is expanded afterwards.
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        if id.is_root() {
            return true;
        }
        if !self.tree.node(id).is_some_and(Node::has_children) {
            return false;
        }
        let changed = if expanded {
            self.expanded.insert(id)
        } else {
            self.expanded.remove(id)
        };
        if changed {
            self.invalidate();
        }
        expanded
    }

    pub fn expand_all(&mut self) {
        self.expanded = self
            .tree
            .iter()
            .filter(|node| !node.id().is_root() && node.has_children())
            .map(Node::id)
            .collect();
        self.invalidate();
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
        self.invalidate();
    }

    /// Expanded ids in ascending order.
    #[must_use]
    pub fn expanded(&self) -> Vec<NodeId> {
        self.expanded.to_vec()
    }

    // ========================================================================
    // Search and sort
    // ========================================================================

    pub fn set_search_query(&mut self, query: &str) {
        if self.query != query {
            self.query = query.to_string();
            self.invalidate();
        }
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    #[must_use]
    pub const fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Sort by `column`. Out-of-range columns are ignored.
    pub fn set_sort_column(&mut self, column: usize, ascending: bool) {
        if column >= self.columns.len() {
            tracing::debug!(column, columns = self.columns.len(), "ignoring sort on unknown column");
            return;
        }
        let sort = SortSpec::new(column, ascending);
        if sort != self.sort {
            self.sort = sort;
            self.invalidate();
        }
    }

    /// Header click: flip the active column, or switch to `column` in its
    /// default direction.
    pub fn sort_by_column(&mut self, column: usize) {
        if column == self.sort.column {
            self.set_sort_column(column, !self.sort.ascending);
        } else if let Some(def) = self.columns.get(column) {
            self.set_sort_column(column, def.default_sort_ascending);
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Register the selection callback, replacing any previous one.
    pub fn on_selection_changed(&mut self, callback: impl FnMut(Option<&Node<P>>) + 'static) {
        self.on_selection_changed = Some(Box::new(callback));
    }

    /// Replace the selection.
    ///
    /// Unknown ids, the root and the placeholder are ignored. Fires the selection callback
    /// once if the selection actually changed.
    pub fn select(&mut self, ids: impl IntoIterator<Item = NodeId>) {
        let tree = &self.tree;
        let selection = SelectionSet::from_ids(ids.into_iter().filter(|&id| tree.is_selectable(id)));
        if selection != self.selection {
            self.selection = selection;
            self.notify_selection_changed();
        }
    }

    pub fn clear_selection(&mut self) {
        self.select([]);
    }

    /// Selected ids, primary first. May hold ids a reload left unresolved.
    #[must_use]
    pub fn selection(&self) -> &[NodeId] {
        self.selection.ids()
    }

    /// The primary selection, if it resolves in the current tree.
    #[must_use]
    pub fn primary_selection(&self) -> Option<NodeId> {
        self.selection
            .primary()
            .filter(|&id| self.tree.is_selectable(id))
    }

    #[must_use]
    pub fn selected_node(&self) -> Option<&Node<P>> {
        self.primary_selection().and_then(|id| self.tree.node(id))
    }

    fn resolved_primary(&self) -> Option<(NodeId, Option<P::Key>)> {
        self.selected_node().map(|node| (node.id(), node.object_key()))
    }

    fn notify_selection_changed(&mut self) {
        let node = self.primary_selection().and_then(|id| self.tree.node(id));
        tracing::trace!(selected = ?node.map(Node::id), "selection changed");
        if let Some(callback) = self.on_selection_changed.as_mut() {
            callback(node);
        }
    }

    // ========================================================================
    // Bookmarks and navigation
    // ========================================================================

    #[must_use]
    pub fn capture_bookmark(&self) -> Bookmark {
        Bookmark::capture(&self.selection, &self.expanded)
    }

    /// Apply a bookmark's expansion and selection, then reveal the primary
    /// selection.
    ///
    /// Ids missing from the current tree are dropped. Revealing expands the
    /// primary's ancestors, so it is always a visible row afterwards.
    pub fn restore_bookmark(&mut self, bookmark: &Bookmark) {
        let tree = &self.tree;
        self.expanded = bookmark
            .expanded_ids
            .iter()
            .copied()
            .filter(|&id| tree.node(id).is_some_and(Node::has_children))
            .collect();
        self.invalidate();

        self.select(bookmark.selected_ids.iter().copied());

        let dropped = bookmark
            .selected_ids
            .len()
            .saturating_sub(self.selection.ids().len());
        if dropped > 0 {
            tracing::debug!(dropped, "bookmark referenced ids missing from the tree");
        }
        self.scroll_target = None;
        if let Some(primary) = self.primary_selection() {
            self.reveal(primary);
        }
    }

    /// Node wrapping the object identified by `key`.
    #[must_use]
    pub fn find(&self, key: &P::Key) -> Option<NodeId> {
        self.tree.find(key)
    }

    /// Expand the ancestors of `id` and make it the pending scroll target.
    pub fn reveal(&mut self, id: NodeId) -> bool {
        if id.is_root() || !self.tree.contains(id) {
            return false;
        }
        let mut changed = false;
        for ancestor in self.tree.ancestors(id) {
            changed |= self.expanded.insert(ancestor);
        }
        if changed {
            self.invalidate();
        }
        self.scroll_target = Some(id);
        true
    }

    /// Find, reveal and select the node for `key`.
    pub fn navigate_to(&mut self, key: &P::Key) -> Option<NodeId> {
        let Some(id) = self.find(key) else {
            tracing::debug!(?key, "navigation target not in tree");
            return None;
        };
        self.reveal(id);
        self.select([id]);
        Some(id)
    }

    /// Consume the pending scroll request, if any.
    pub fn take_scroll_target(&mut self) -> Option<NodeId> {
        self.scroll_target.take()
    }
}

impl<P: NodePayload> fmt::Debug for TreeView<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeView")
            .field("nodes", &self.tree.len())
            .field("columns", &self.columns.len())
            .field("sort", &self.sort)
            .field("expanded", &self.expanded)
            .field("selection", &self.selection)
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::cmp::Ordering;
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    struct Item {
        key: u32,
        size: u64,
    }

    impl NodePayload for Item {
        type Key = u32;

        fn compare(&self, other: &Self, column: usize) -> Ordering {
            match column {
                1 => self.size.cmp(&other.size),
                _ => self.key.cmp(&other.key),
            }
        }

        fn supports_search(&self) -> bool {
            true
        }

        fn render_column(&self, display_name: &str, column: usize) -> String {
            match column {
                0 => display_name.to_string(),
                _ => self.size.to_string(),
            }
        }

        fn object_key(&self) -> Option<u32> {
            Some(self.key)
        }
    }

    const COLUMNS: [Column; 2] = [Column::new("Name", 250, true), Column::new("Size", 80, false)];

    fn source(b: &mut TreeBuilder<Item>) {
        let a = b.add(NodeId::ROOT, "alpha", Item { key: 1, size: 10 });
        if let Some(a) = a {
            let inner = b.add(a, "alpha.child", Item { key: 11, size: 3 });
            if let Some(inner) = inner {
                b.add(inner, "alpha.grandchild", Item { key: 111, size: 1 });
            }
        }
        b.add(NodeId::ROOT, "beta", Item { key: 2, size: 20 });
    }

    fn view() -> TreeView<Item> {
        let mut view = TreeView::new(COLUMNS.to_vec(), SortSpec::ascending(0));
        view.set_data(&source);
        view
    }

    fn visible(view: &TreeView<Item>) -> Vec<String> {
        view.rows()
            .iter()
            .map(|r| view.cell(r.id, 0))
            .collect()
    }

    #[test]
    fn test_rows_follow_expansion() {
        let mut view = view();
        assert_eq!(visible(&view), ["alpha", "beta"]);

        let alpha = view.find(&1).expect("alpha");
        assert!(view.toggle_expanded(alpha));
        assert_eq!(visible(&view), ["alpha", "alpha.child", "beta"]);

        assert!(!view.toggle_expanded(alpha));
        assert_eq!(visible(&view), ["alpha", "beta"]);
    }

    #[test]
    fn test_expanding_leaf_is_noop() {
        let mut view = view();
        let beta = view.find(&2).expect("beta");
        assert!(!view.toggle_expanded(beta));
        assert!(view.expanded().is_empty());
    }

    #[test]
    fn test_rows_in_clamps() {
        let mut view = view();
        view.expand_all();
        assert_eq!(view.rows().len(), 4);
        assert_eq!(view.rows_in(1, 2).len(), 2);
        assert_eq!(view.rows_in(3, 99).len(), 1);
        assert!(view.rows_in(9, 12).is_empty());
        assert!(view.rows_in(2, 1).is_empty());
    }

    #[test]
    fn test_header_click_toggles_and_applies_defaults() {
        let mut view = view();
        view.sort_by_column(1);
        assert_eq!(view.sort(), SortSpec::descending(1));
        assert_eq!(visible(&view), ["beta", "alpha"]);

        view.sort_by_column(1);
        assert_eq!(view.sort(), SortSpec::ascending(1));

        view.sort_by_column(0);
        assert_eq!(view.sort(), SortSpec::ascending(0));

        view.set_sort_column(7, true);
        assert_eq!(view.sort(), SortSpec::ascending(0));
    }

    #[test]
    fn test_search_mode_switches_row_source() {
        let mut view = view();
        view.set_search_query("ALPHA");
        assert!(view.is_searching());
        assert_eq!(visible(&view), ["alpha", "alpha.child", "alpha.grandchild"]);
        assert!(view.rows().iter().all(|r| r.depth == 0));

        view.set_search_query("");
        assert_eq!(visible(&view), ["alpha", "beta"]);
    }

    #[test]
    fn test_selection_fires_once_per_change() {
        let mut view = view();
        let events: Rc<RefCell<Vec<Option<String>>>> = Rc::default();
        let sink = Rc::clone(&events);
        view.on_selection_changed(move |node| {
            sink.borrow_mut()
                .push(node.map(|n| n.display_name().to_string()));
        });

        let beta = view.find(&2).expect("beta");
        view.select([beta]);
        view.select([beta]);
        view.select([NodeId(999)]);
        view.clear_selection();

        // Re-selecting beta and clearing an empty selection fire nothing.
        assert_eq!(*events.borrow(), vec![Some("beta".to_string()), None]);
    }

    #[test]
    fn test_selection_survives_collapse() {
        let mut view = view();
        let alpha = view.find(&1).expect("alpha");
        let child = view.find(&11).expect("child");
        view.set_expanded(alpha, true);
        view.select([child]);
        view.set_expanded(alpha, false);
        assert_eq!(view.selection(), &[child]);
        assert_eq!(view.row_index_of(child), None);
    }

    #[test]
    fn test_navigate_to_reveals_and_selects() {
        let mut view = view();
        let target = view.navigate_to(&111).expect("found");
        assert_eq!(view.primary_selection(), Some(target));
        assert!(view.row_index_of(target).is_some());
        assert_eq!(view.take_scroll_target(), Some(target));
        assert_eq!(view.take_scroll_target(), None);

        assert_eq!(view.navigate_to(&404), None);
    }

    #[test]
    fn test_bookmark_round_trip_and_stale_ids() {
        let mut view = view();
        let alpha = view.find(&1).expect("alpha");
        let child = view.find(&11).expect("child");
        view.set_expanded(alpha, true);
        view.select([child]);
        let bookmark = view.capture_bookmark();

        view.collapse_all();
        view.clear_selection();
        view.restore_bookmark(&bookmark);
        assert_eq!(view.capture_bookmark(), bookmark);
        assert_eq!(view.take_scroll_target(), Some(child));

        let stale = Bookmark {
            selected_ids: vec![NodeId(500)],
            expanded_ids: vec![NodeId(501)],
        };
        view.restore_bookmark(&stale);
        assert!(view.selection().is_empty());
        assert!(view.expanded().is_empty());
        assert_eq!(view.take_scroll_target(), None);
    }

    #[test]
    fn test_restore_reveals_selection_under_collapsed_parent() {
        let mut view = view();
        let alpha = view.find(&1).expect("alpha");
        let child = view.find(&11).expect("child");
        let grandchild = view.find(&111).expect("grandchild");

        let bookmark = Bookmark {
            selected_ids: vec![grandchild],
            expanded_ids: Vec::new(),
        };
        view.restore_bookmark(&bookmark);

        assert_eq!(view.selection(), &[grandchild]);
        assert_eq!(view.expanded(), vec![alpha, child]);
        assert_eq!(view.row_index_of(grandchild), Some(2));
        assert_eq!(view.take_scroll_target(), Some(grandchild));
    }

    #[test]
    fn test_reload_keeps_state_by_id() {
        let mut view = view();
        let alpha = view.find(&1).expect("alpha");
        view.set_expanded(alpha, true);
        view.select([alpha]);

        view.set_data(&source);
        assert_eq!(view.expanded(), vec![alpha]);
        assert_eq!(view.selection(), &[alpha]);

        view.set_data(&|_: &mut TreeBuilder<Item>| {});
        assert_eq!(visible(&view), [""]);
        assert_eq!(view.primary_selection(), None);
        assert!(view.selected_node().is_none());

        view.set_data(&source);
        assert_eq!(view.expanded(), vec![alpha]);
        assert_eq!(view.primary_selection(), Some(alpha));
        assert_eq!(visible(&view), ["alpha", "alpha.child", "beta"]);
    }

    #[test]
    fn test_reload_notifies_only_when_resolution_changes() {
        let mut view = view();
        let events: Rc<RefCell<Vec<Option<u32>>>> = Rc::default();
        let sink = Rc::clone(&events);
        view.on_selection_changed(move |node| {
            sink.borrow_mut().push(node.and_then(Node::object_key));
        });

        let beta = view.find(&2).expect("beta");
        view.select([beta]);
        view.set_data(&source);
        view.set_data(&|_: &mut TreeBuilder<Item>| {});
        view.set_data(&source);

        assert_eq!(*events.borrow(), vec![Some(2), None, Some(2)]);
    }
}
