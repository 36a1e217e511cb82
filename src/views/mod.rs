//! Concrete views over a build layout.
//!
//! Each view is a [`Facet`]: a node-kind enum, a column schema, a default
//! sort and a `populate` function that walks the layout. [`FacetView`] binds
//! a facet to the generic [`TreeView`] engine and exposes it through the
//! object-safe [`LayoutView`] trait, which is all the TUI and the CLI see.

mod assets;
mod bundles;
mod groups;

pub use assets::{AssetNode, AssetsFacet, ReferenceCategory};
pub use bundles::{BundleNode, BundlesFacet};
pub use groups::{GroupNode, GroupsFacet};

use crate::model::{BuildLayout, ObjectRef};
use crate::tree::{Bookmark, Column, NodeId, NodePayload, Row, SortSpec, TreeBuilder, TreeView};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// View kinds
// ============================================================================

/// The available views.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Bundles and the assets they contain
    #[default]
    Bundles,
    /// Groups and the bundles they produce
    Groups,
    /// Assets and what they reference
    Assets,
}

impl ViewKind {
    /// All views in tab order.
    pub const ALL: [Self; 3] = [Self::Bundles, Self::Groups, Self::Assets];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Bundles => "Bundles",
            Self::Groups => "Groups",
            Self::Assets => "Assets",
        }
    }

    /// Position in [`ViewKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Bundles => 0,
            Self::Groups => 1,
            Self::Assets => 2,
        }
    }

    /// The view where an object is shown at the top level.
    #[must_use]
    pub const fn home_of(object: ObjectRef) -> Self {
        match object {
            ObjectRef::Group(_) => Self::Groups,
            ObjectRef::Bundle(_) => Self::Bundles,
            ObjectRef::Asset(_) => Self::Assets,
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundles => write!(f, "bundles"),
            Self::Groups => write!(f, "groups"),
            Self::Assets => write!(f, "assets"),
        }
    }
}

/// A view's bookmark tagged with the view that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationBookmark {
    pub view: ViewKind,
    pub state: Bookmark,
}

/// Listener told about every selection change in a view.
pub type SelectionListener = Box<dyn FnMut(ViewKind, Option<ObjectRef>)>;

// ============================================================================
// Facets
// ============================================================================

/// One domain perspective on a build layout.
pub trait Facet {
    /// Node kinds shown by this facet.
    type Node: NodePayload<Key = ObjectRef> + 'static;

    const KIND: ViewKind;
    const COLUMNS: &'static [Column];
    const DEFAULT_SORT: SortSpec;

    /// Push this facet's nodes for `layout` into `builder`.
    fn populate(layout: &BuildLayout, builder: &mut TreeBuilder<Self::Node>);

    /// One-line summary shown under the view.
    fn status(layout: &BuildLayout) -> String;
}

/// Object-safe surface of a view, used by the TUI and the CLI.
pub trait LayoutView {
    fn kind(&self) -> ViewKind;

    /// Rebuild from a (re)loaded layout, keeping state by id.
    fn set_layout(&mut self, layout: &BuildLayout);

    fn status(&self) -> &str;
    fn columns(&self) -> &[Column];

    fn rows(&self) -> &[Row];
    fn rows_in(&self, first: usize, last: usize) -> &[Row];
    fn row_index_of(&self, id: NodeId) -> Option<usize>;
    fn cell(&self, id: NodeId, column: usize) -> String;
    fn has_children(&self, id: NodeId) -> bool;
    /// True for the blank row shown when the view has no content.
    fn is_placeholder(&self, id: NodeId) -> bool;

    fn is_expanded(&self, id: NodeId) -> bool;
    fn toggle_expanded(&mut self, id: NodeId) -> bool;
    fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool;
    fn expand_all(&mut self);
    fn collapse_all(&mut self);

    fn search_query(&self) -> &str;
    fn set_search_query(&mut self, query: &str);

    fn sort(&self) -> SortSpec;
    fn set_sort_column(&mut self, column: usize, ascending: bool);
    fn sort_by_column(&mut self, column: usize);

    fn select(&mut self, ids: &[NodeId]);
    fn selection(&self) -> &[NodeId];
    fn set_selection_listener(&mut self, listener: SelectionListener);

    /// Object wrapped by the primary selection.
    fn selected_object(&self) -> Option<ObjectRef>;
    /// Object a row points at when activated.
    fn target_of(&self, id: NodeId) -> Option<ObjectRef>;

    fn can_navigate_to(&self, object: ObjectRef) -> bool;
    /// Reveal and select `object`. Returns `false` when it is not in this view.
    fn navigate_to(&mut self, object: ObjectRef) -> bool;
    fn take_scroll_target(&mut self) -> Option<NodeId>;

    fn bookmark(&self) -> NavigationBookmark;
    /// Restore a bookmark taken from a view of the same kind.
    fn set_bookmark(&mut self, bookmark: &NavigationBookmark) -> bool;
}

/// A [`Facet`] bound to the tree engine.
#[derive(Debug)]
pub struct FacetView<F: Facet> {
    engine: TreeView<F::Node>,
    status: String,
}

impl<F: Facet> FacetView<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_sort(F::DEFAULT_SORT)
    }

    #[must_use]
    pub fn with_sort(sort: SortSpec) -> Self {
        Self {
            engine: TreeView::new(F::COLUMNS.to_vec(), sort),
            status: String::new(),
        }
    }

    /// Typed access to the underlying engine.
    #[must_use]
    pub const fn engine(&self) -> &TreeView<F::Node> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TreeView<F::Node> {
        &mut self.engine
    }
}

impl<F: Facet> Default for FacetView<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Facet> LayoutView for FacetView<F> {
    fn kind(&self) -> ViewKind {
        F::KIND
    }

    fn set_layout(&mut self, layout: &BuildLayout) {
        self.engine
            .set_data(&|builder: &mut TreeBuilder<F::Node>| F::populate(layout, builder));
        self.status = F::status(layout);
    }

    fn status(&self) -> &str {
        &self.status
    }

    fn columns(&self) -> &[Column] {
        self.engine.columns()
    }

    fn rows(&self) -> &[Row] {
        self.engine.rows()
    }

    fn rows_in(&self, first: usize, last: usize) -> &[Row] {
        self.engine.rows_in(first, last)
    }

    fn row_index_of(&self, id: NodeId) -> Option<usize> {
        self.engine.row_index_of(id)
    }

    fn cell(&self, id: NodeId, column: usize) -> String {
        self.engine.cell(id, column)
    }

    fn has_children(&self, id: NodeId) -> bool {
        self.engine.node(id).is_some_and(|n| n.has_children())
    }

    fn is_placeholder(&self, id: NodeId) -> bool {
        self.engine.node(id).is_some_and(|n| n.is_placeholder())
    }

    fn is_expanded(&self, id: NodeId) -> bool {
        self.engine.is_expanded(id)
    }

    fn toggle_expanded(&mut self, id: NodeId) -> bool {
        self.engine.toggle_expanded(id)
    }

    fn set_expanded(&mut self, id: NodeId, expanded: bool) -> bool {
        self.engine.set_expanded(id, expanded)
    }

    fn expand_all(&mut self) {
        self.engine.expand_all();
    }

    fn collapse_all(&mut self) {
        self.engine.collapse_all();
    }

    fn search_query(&self) -> &str {
        self.engine.search_query()
    }

    fn set_search_query(&mut self, query: &str) {
        self.engine.set_search_query(query);
    }

    fn sort(&self) -> SortSpec {
        self.engine.sort()
    }

    fn set_sort_column(&mut self, column: usize, ascending: bool) {
        self.engine.set_sort_column(column, ascending);
    }

    fn sort_by_column(&mut self, column: usize) {
        self.engine.sort_by_column(column);
    }

    fn select(&mut self, ids: &[NodeId]) {
        self.engine.select(ids.iter().copied());
    }

    fn selection(&self) -> &[NodeId] {
        self.engine.selection()
    }

    fn set_selection_listener(&mut self, mut listener: SelectionListener) {
        self.engine
            .on_selection_changed(move |node| listener(F::KIND, node.and_then(|n| n.object_key())));
    }

    fn selected_object(&self) -> Option<ObjectRef> {
        self.engine.selected_node().and_then(|n| n.object_key())
    }

    fn target_of(&self, id: NodeId) -> Option<ObjectRef> {
        self.engine.node(id).and_then(|n| n.target_key())
    }

    fn can_navigate_to(&self, object: ObjectRef) -> bool {
        self.engine.find(&object).is_some()
    }

    fn navigate_to(&mut self, object: ObjectRef) -> bool {
        self.engine.navigate_to(&object).is_some()
    }

    fn take_scroll_target(&mut self) -> Option<NodeId> {
        self.engine.take_scroll_target()
    }

    fn bookmark(&self) -> NavigationBookmark {
        NavigationBookmark {
            view: F::KIND,
            state: self.engine.capture_bookmark(),
        }
    }

    fn set_bookmark(&mut self, bookmark: &NavigationBookmark) -> bool {
        if bookmark.view != F::KIND {
            tracing::warn!(
                expected = %F::KIND,
                actual = %bookmark.view,
                "ignoring bookmark taken from another view"
            );
            return false;
        }
        self.engine.restore_bookmark(&bookmark.state);
        true
    }
}

pub type BundlesView = FacetView<BundlesFacet>;
pub type GroupsView = FacetView<GroupsFacet>;
pub type AssetsView = FacetView<AssetsFacet>;

/// A boxed, empty view of `kind` sorted by `sort`, or its default sort.
#[must_use]
pub fn create_view(kind: ViewKind, sort: Option<SortSpec>) -> Box<dyn LayoutView> {
    match kind {
        ViewKind::Bundles => Box::new(BundlesView::with_sort(
            sort.unwrap_or(BundlesFacet::DEFAULT_SORT),
        )),
        ViewKind::Groups => Box::new(GroupsView::with_sort(
            sort.unwrap_or(GroupsFacet::DEFAULT_SORT),
        )),
        ViewKind::Assets => Box::new(AssetsView::with_sort(
            sort.unwrap_or(AssetsFacet::DEFAULT_SORT),
        )),
    }
}

/// Column schema of a view without constructing it.
#[must_use]
pub const fn columns_of(kind: ViewKind) -> &'static [Column] {
    match kind {
        ViewKind::Bundles => BundlesFacet::COLUMNS,
        ViewKind::Groups => GroupsFacet::COLUMNS,
        ViewKind::Assets => AssetsFacet::COLUMNS,
    }
}

/// Case-insensitive ordering shared by the name columns.
pub(crate) fn cmp_ignore_case(a: &str, b: &str) -> std::cmp::Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bundle, BundleId};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn layout() -> BuildLayout {
        BuildLayout {
            bundles: vec![
                Bundle {
                    name: "a.bundle".to_string(),
                    size: 10,
                    ..Bundle::default()
                },
                Bundle {
                    name: "b.bundle".to_string(),
                    size: 20,
                    ..Bundle::default()
                },
            ],
            ..BuildLayout::default()
        }
    }

    #[test]
    fn test_home_views() {
        assert_eq!(ViewKind::home_of(ObjectRef::Bundle(BundleId(0))), ViewKind::Bundles);
        assert_eq!(ViewKind::ALL[ViewKind::Assets.index()], ViewKind::Assets);
        assert_eq!(ViewKind::Groups.to_string(), "groups");
    }

    #[test]
    fn test_bookmark_of_other_view_is_ignored() {
        let mut bundles = BundlesView::new();
        bundles.set_layout(&layout());
        assert!(bundles.navigate_to(ObjectRef::Bundle(BundleId(1))));

        let foreign = NavigationBookmark {
            view: ViewKind::Groups,
            state: Bookmark::default(),
        };
        assert!(!bundles.set_bookmark(&foreign));
        assert_eq!(bundles.selected_object(), Some(ObjectRef::Bundle(BundleId(1))));
    }

    #[test]
    fn test_selection_listener_receives_objects() {
        let seen: Rc<RefCell<Vec<(ViewKind, Option<ObjectRef>)>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut bundles = BundlesView::new();
        bundles.set_layout(&layout());
        bundles.set_selection_listener(Box::new(move |kind, object| {
            sink.borrow_mut().push((kind, object));
        }));

        bundles.navigate_to(ObjectRef::Bundle(BundleId(0)));
        bundles.select(&[]);

        assert_eq!(
            *seen.borrow(),
            vec![
                (ViewKind::Bundles, Some(ObjectRef::Bundle(BundleId(0)))),
                (ViewKind::Bundles, None),
            ]
        );
    }

    #[test]
    fn test_create_view_applies_sort_override() {
        let view = create_view(ViewKind::Groups, Some(SortSpec::descending(1)));
        assert_eq!(view.kind(), ViewKind::Groups);
        assert_eq!(view.sort(), SortSpec::descending(1));
        assert_eq!(view.columns(), columns_of(ViewKind::Groups));
    }

    #[test]
    fn test_cmp_ignore_case() {
        use std::cmp::Ordering;
        assert_eq!(cmp_ignore_case("Alpha", "alpha"), Ordering::Equal);
        assert_eq!(cmp_ignore_case("alpha", "Beta"), Ordering::Less);
    }
}
