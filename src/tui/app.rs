//! Inspector application state.
//!
//! [`InspectorApp`] owns one [`LayoutView`] per tab and everything around
//! them that is not tree state: the table cursors, the search box, the
//! navigation history and footer messages. Key handling lives in
//! [`events`](super::events), drawing in [`ui`](super::ui).

use super::navigation::NavigationHistory;
use super::state::{ListNavigation, TableCursor};
use super::viewmodel::{SearchInput, StatusMessage};
use crate::config::AppConfig;
use crate::error::Result;
use crate::model::{BuildLayout, ObjectRef};
use crate::parsers::parse_layout;
use crate::tree::NodeId;
use crate::utils::transform_bundle_name;
use crate::views::{LayoutView, NavigationBookmark, ViewKind, create_view};
use ratatui::layout::Rect;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

type SelectionQueue = Rc<RefCell<Vec<(ViewKind, Option<ObjectRef>)>>>;

/// Screen geometry of the last drawn table, used for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub struct TableGeometry {
    /// Row of the column headers
    pub header_y: u16,
    /// First row of data
    pub body: Rect,
    /// Inclusive `x` span of each column
    pub columns: Vec<(u16, u16)>,
}

impl TableGeometry {
    /// Column under screen column `x`.
    #[must_use]
    pub fn column_at(&self, x: u16) -> Option<usize> {
        self.columns
            .iter()
            .position(|&(start, end)| (start..=end).contains(&x))
    }
}

/// The interactive build layout inspector.
pub struct InspectorApp {
    /// File the layout was read from, for the header and reloads
    pub(crate) source: Option<PathBuf>,
    pub(crate) layout: BuildLayout,
    views: Vec<Box<dyn LayoutView>>,
    active: ViewKind,
    cursors: Vec<TableCursor>,
    selection_events: SelectionQueue,
    /// Last selection notice per view
    selection_notes: Vec<Option<String>>,
    pub(crate) history: NavigationHistory,
    pub(crate) search: SearchInput,
    pub(crate) status_message: StatusMessage,
    pub(crate) show_help: bool,
    pub(crate) should_quit: bool,
    pub(crate) mouse_enabled: bool,
    pub(crate) tick_rate: Duration,
    pub(crate) geometry: TableGeometry,
}

impl InspectorApp {
    /// Build the app over `layout` with the views configured by `config`.
    #[must_use]
    pub fn new(layout: BuildLayout, source: Option<PathBuf>, config: &AppConfig) -> Self {
        let selection_events = SelectionQueue::default();
        let views = ViewKind::ALL
            .iter()
            .map(|&kind| {
                let mut view = create_view(kind, config.views.sort_for(kind));
                view.set_layout(&layout);
                let queue = Rc::clone(&selection_events);
                view.set_selection_listener(Box::new(move |kind, object| {
                    queue.borrow_mut().push((kind, object));
                }));
                view
            })
            .collect();
        let cursors = ViewKind::ALL
            .iter()
            .map(|_| TableCursor::with_page_size(config.tui.page_size))
            .collect();

        let mut app = Self {
            source,
            layout,
            views,
            active: config.views.default_view,
            cursors,
            selection_events,
            selection_notes: vec![None; ViewKind::ALL.len()],
            history: NavigationHistory::default(),
            search: SearchInput::new(),
            status_message: StatusMessage::with_expiry(Duration::from_secs(4)),
            show_help: false,
            should_quit: false,
            mouse_enabled: config.tui.mouse_enabled,
            tick_rate: Duration::from_millis(config.tui.tick_rate_ms),
            geometry: TableGeometry::default(),
        };
        for kind in ViewKind::ALL {
            app.sync_cursor(kind);
        }
        app
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn active_kind(&self) -> ViewKind {
        self.active
    }

    #[must_use]
    pub fn view(&self, kind: ViewKind) -> &dyn LayoutView {
        self.views[kind.index()].as_ref()
    }

    #[must_use]
    pub fn active_view(&self) -> &dyn LayoutView {
        self.view(self.active)
    }

    fn active_view_mut(&mut self) -> &mut dyn LayoutView {
        self.views[self.active.index()].as_mut()
    }

    #[must_use]
    pub fn cursor(&self) -> &TableCursor {
        &self.cursors[self.active.index()]
    }

    pub fn cursor_mut(&mut self) -> &mut TableCursor {
        &mut self.cursors[self.active.index()]
    }

    /// Row id under the cursor.
    #[must_use]
    pub fn current_row(&self) -> Option<NodeId> {
        self.active_view()
            .rows()
            .get(self.cursor().selected)
            .map(|row| row.id)
    }

    /// Selection notice of the active view.
    #[must_use]
    pub fn selection_note(&self) -> Option<&str> {
        self.selection_notes[self.active.index()].as_deref()
    }

    // ------------------------------------------------------------------
    // Cursor and selection
    // ------------------------------------------------------------------

    /// Re-read row count and move the cursor onto the view's selection or
    /// pending scroll target.
    fn sync_cursor(&mut self, kind: ViewKind) {
        let index = kind.index();
        let view = &mut self.views[index];
        let target = view
            .take_scroll_target()
            .or_else(|| view.selection().first().copied());
        let row = target.and_then(|id| view.row_index_of(id));
        let total = view.rows().len();

        let cursor = &mut self.cursors[index];
        cursor.set_total(total);
        if let Some(row) = row {
            cursor.set_selected(row);
        }
        cursor.clamp_selection();
    }

    /// Select the row under the cursor in the active view.
    fn select_cursor_row(&mut self) {
        let id = self.current_row();
        let view = self.active_view_mut();
        match id {
            Some(id) if view.selection().first() != Some(&id) => view.select(&[id]),
            Some(_) => {}
            None => view.select(&[]),
        }
        self.drain_selection_events();
    }

    /// Turn queued selection callbacks into footer notices.
    pub fn drain_selection_events(&mut self) {
        let events: Vec<_> = self.selection_events.borrow_mut().drain(..).collect();
        for (kind, object) in events {
            let note = object.map(|object| self.describe(object));
            self.selection_notes[kind.index()] = note;
        }
    }

    fn describe(&self, object: ObjectRef) -> String {
        let name = self.layout.name_of(object).unwrap_or("?");
        let name = match object {
            ObjectRef::Bundle(_) => transform_bundle_name(name),
            ObjectRef::Group(_) | ObjectRef::Asset(_) => name.to_string(),
        };
        format!("{} {name}", object.kind_name())
    }

    /// Apply a cursor movement and select the row it lands on.
    pub fn move_cursor(&mut self, movement: impl FnOnce(&mut TableCursor)) {
        movement(self.cursor_mut());
        self.select_cursor_row();
    }

    /// Put the cursor on row `index` of the active view.
    pub fn select_row(&mut self, index: usize) {
        if index < self.cursor().total {
            self.move_cursor(|cursor| cursor.set_selected(index));
        }
    }

    // ------------------------------------------------------------------
    // Tabs
    // ------------------------------------------------------------------

    pub fn switch_to(&mut self, kind: ViewKind) {
        if self.search.active {
            self.search.stop();
        }
        self.active = kind;
        self.sync_cursor(kind);
    }

    pub fn next_tab(&mut self) {
        let next = ViewKind::ALL[(self.active.index() + 1) % ViewKind::ALL.len()];
        self.switch_to(next);
    }

    pub fn prev_tab(&mut self) {
        let count = ViewKind::ALL.len();
        let prev = ViewKind::ALL[(self.active.index() + count - 1) % count];
        self.switch_to(prev);
    }

    // ------------------------------------------------------------------
    // Expansion
    // ------------------------------------------------------------------

    /// Expand the cursor row, or step into its first child when it is
    /// already open.
    pub fn expand_current(&mut self) {
        let Some(id) = self.current_row() else {
            return;
        };
        let view = self.active_view_mut();
        if !view.has_children(id) {
            return;
        }
        if view.is_expanded(id) {
            self.move_cursor(ListNavigation::select_next);
        } else {
            view.set_expanded(id, true);
            self.sync_cursor(self.active);
        }
    }

    /// Collapse the cursor row, or step out to its parent row.
    pub fn collapse_current(&mut self) {
        let Some(id) = self.current_row() else {
            return;
        };
        let view = self.active_view_mut();
        if view.has_children(id) && view.is_expanded(id) {
            view.set_expanded(id, false);
            self.sync_cursor(self.active);
            return;
        }
        let rows = self.active_view().rows();
        let index = self.cursor().selected;
        let depth = rows[index].depth;
        if let Some(parent) = rows[..index].iter().rposition(|row| row.depth < depth) {
            self.select_row(parent);
        }
    }

    pub fn toggle_current(&mut self) {
        if let Some(id) = self.current_row() {
            self.active_view_mut().toggle_expanded(id);
            self.sync_cursor(self.active);
        }
    }

    pub fn expand_all(&mut self) {
        self.active_view_mut().expand_all();
        self.sync_cursor(self.active);
    }

    pub fn collapse_all(&mut self) {
        self.active_view_mut().collapse_all();
        self.sync_cursor(self.active);
    }

    // ------------------------------------------------------------------
    // Sorting and search
    // ------------------------------------------------------------------

    /// Header click on `column`.
    pub fn sort_by_column(&mut self, column: usize) {
        if column < self.active_view().columns().len() {
            self.active_view_mut().sort_by_column(column);
            self.sync_cursor(self.active);
        }
    }

    /// Move the sort to the next column in its natural direction.
    pub fn cycle_sort_column(&mut self) {
        let view = self.active_view();
        let count = view.columns().len();
        let next = (view.sort().column + 1) % count;
        let ascending = view.columns()[next].default_sort_ascending;
        self.active_view_mut().set_sort_column(next, ascending);
        self.sync_cursor(self.active);
    }

    pub fn start_search(&mut self) {
        let query = self.active_view().search_query().to_string();
        self.search.start(&query);
    }

    /// Push the search box query into the active view.
    pub fn apply_search(&mut self) {
        let query = self.search.query.clone();
        self.active_view_mut().set_search_query(&query);
        self.sync_cursor(self.active);
        self.select_cursor_row();
    }

    pub fn clear_search(&mut self) {
        self.search.cancel();
        self.apply_search();
    }

    // ------------------------------------------------------------------
    // Cross-view navigation
    // ------------------------------------------------------------------

    /// Enter on the cursor row: follow it to the object it points at, or
    /// fold it when it already is that object.
    pub fn activate_current(&mut self) {
        let Some(id) = self.current_row() else {
            return;
        };
        self.select_cursor_row();
        let Some(object) = self.active_view().target_of(id) else {
            self.toggle_current();
            return;
        };
        let home = ViewKind::home_of(object);
        let here = home == self.active && self.active_view().selected_object() == Some(object);
        if here {
            self.toggle_current();
        } else {
            self.navigate_to(object);
        }
    }

    /// Show `object` in its home view, recording where we came from.
    pub fn navigate_to(&mut self, object: ObjectRef) -> bool {
        let target = ViewKind::home_of(object);
        if !self.view(target).can_navigate_to(object) {
            let message = format!("{} is not shown in the {} view", self.describe(object), target.title());
            self.status_message.set(message);
            return false;
        }

        let left = self.active_view().bookmark();
        self.history.push(left);

        let view = &mut self.views[target.index()];
        if !view.search_query().is_empty() {
            view.set_search_query("");
        }
        view.navigate_to(object);
        self.search.cancel();
        self.active = target;
        self.sync_cursor(target);
        self.drain_selection_events();
        true
    }

    pub fn go_back(&mut self) {
        let current = self.active_view().bookmark();
        match self.history.back(current) {
            Some(bookmark) => self.restore(&bookmark),
            None => self.status_message.set("No earlier view to go back to"),
        }
    }

    pub fn go_forward(&mut self) {
        let current = self.active_view().bookmark();
        match self.history.forward(current) {
            Some(bookmark) => self.restore(&bookmark),
            None => self.status_message.set("Nothing to go forward to"),
        }
    }

    fn restore(&mut self, bookmark: &NavigationBookmark) {
        let kind = bookmark.view;
        self.views[kind.index()].set_bookmark(bookmark);
        self.search.cancel();
        self.active = kind;
        self.sync_cursor(kind);
        self.drain_selection_events();
    }

    // ------------------------------------------------------------------
    // Reload
    // ------------------------------------------------------------------

    /// Swap in a new layout, keeping each view's state by node id.
    pub fn set_layout(&mut self, layout: BuildLayout) {
        self.layout = layout;
        for view in &mut self.views {
            view.set_layout(&self.layout);
        }
        for kind in ViewKind::ALL {
            self.sync_cursor(kind);
        }
        self.drain_selection_events();
    }

    /// Re-read the layout file from disk.
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = self.source.clone() else {
            self.status_message.set("Nothing to reload: layout was not read from a file");
            return Ok(());
        };
        let layout = parse_layout(&path)?;
        self.set_layout(layout);
        self.status_message.set(format!("Reloaded {}", path.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Asset, AssetId, Bundle, BundleId, Group, GroupId};

    fn layout() -> BuildLayout {
        BuildLayout {
            groups: vec![Group {
                name: "Default".to_string(),
                packing_mode: "PackTogether".to_string(),
                bundles: vec![BundleId(0), BundleId(1)],
            }],
            bundles: vec![
                Bundle {
                    name: "BundleA".to_string(),
                    size: 100,
                    group: Some(GroupId(0)),
                    assets: vec![AssetId(0), AssetId(1)],
                    ..Bundle::default()
                },
                Bundle {
                    name: "BundleB".to_string(),
                    size: 50,
                    group: Some(GroupId(0)),
                    assets: vec![AssetId(2)],
                    ..Bundle::default()
                },
            ],
            assets: vec![
                Asset {
                    name: "Assets/hero.prefab".to_string(),
                    size: 60,
                    bundle: Some(BundleId(0)),
                    internal_references: vec![AssetId(1)],
                    external_references: vec![AssetId(2)],
                },
                Asset {
                    name: "Assets/hero.mat".to_string(),
                    size: 40,
                    bundle: Some(BundleId(0)),
                    ..Asset::default()
                },
                Asset {
                    name: "Assets/shared.png".to_string(),
                    size: 50,
                    bundle: Some(BundleId(1)),
                    ..Asset::default()
                },
            ],
        }
    }

    fn app() -> InspectorApp {
        InspectorApp::new(layout(), None, &AppConfig::default())
    }

    fn row_names(app: &InspectorApp) -> Vec<String> {
        let view = app.active_view();
        view.rows().iter().map(|r| view.cell(r.id, 0)).collect()
    }

    #[test]
    fn test_starts_on_configured_view() {
        let config = AppConfig::builder().default_view(ViewKind::Groups).build();
        let app = InspectorApp::new(layout(), None, &config);
        assert_eq!(app.active_kind(), ViewKind::Groups);
        assert_eq!(row_names(&app), ["Default"]);
    }

    #[test]
    fn test_cursor_movement_selects_rows() {
        let mut app = app();
        app.move_cursor(ListNavigation::select_next);
        assert_eq!(app.active_view().selected_object(), Some(ObjectRef::Bundle(BundleId(1))));
        assert_eq!(app.selection_note(), Some("bundle BundleB"));
    }

    #[test]
    fn test_expand_and_collapse_with_arrows() {
        let mut app = app();
        app.expand_current();
        assert_eq!(row_names(&app), ["BundleA", "Assets/hero.prefab", "Assets/hero.mat", "BundleB"]);

        // Already open: step into the first child.
        app.expand_current();
        assert_eq!(app.cursor().selected, 1);

        // Leaf: step out to the parent row.
        app.collapse_current();
        assert_eq!(app.cursor().selected, 0);

        app.collapse_current();
        assert_eq!(row_names(&app), ["BundleA", "BundleB"]);
    }

    #[test]
    fn test_enter_on_asset_opens_assets_view_and_back_restores() {
        let mut app = app();
        app.expand_current();
        app.select_row(2);
        app.activate_current();

        assert_eq!(app.active_kind(), ViewKind::Assets);
        assert_eq!(app.active_view().selected_object(), Some(ObjectRef::Asset(AssetId(1))));
        let cursor_row = app.current_row();
        assert_eq!(app.active_view().selection().first().copied(), cursor_row);

        app.go_back();
        assert_eq!(app.active_kind(), ViewKind::Bundles);
        assert_eq!(app.cursor().selected, 2);
        assert_eq!(app.active_view().selected_object(), Some(ObjectRef::Asset(AssetId(1))));

        app.go_forward();
        assert_eq!(app.active_kind(), ViewKind::Assets);
    }

    #[test]
    fn test_back_to_collapsed_selection_puts_cursor_on_it() {
        let mut app = app();
        app.expand_current();
        app.select_row(1);
        app.collapse_all();
        assert_eq!(row_names(&app), ["BundleA", "BundleB"]);

        assert!(app.navigate_to(ObjectRef::Asset(AssetId(2))));
        app.go_back();

        assert_eq!(app.active_kind(), ViewKind::Bundles);
        assert_eq!(app.active_view().selected_object(), Some(ObjectRef::Asset(AssetId(0))));
        assert_eq!(app.current_row(), app.active_view().selection().first().copied());
        assert_eq!(app.cursor().selected, 1);
        assert_eq!(row_names(&app).len(), 4);
    }

    #[test]
    fn test_enter_on_reference_follows_it() {
        let mut app = app();
        app.switch_to(ViewKind::Assets);
        assert!(app.navigate_to(ObjectRef::Asset(AssetId(0))));
        app.expand_current();
        app.expand_all();

        let view = app.active_view();
        let reference = view
            .rows()
            .iter()
            .position(|r| r.depth > 0 && view.cell(r.id, 0) == "Assets/shared.png")
            .unwrap();
        assert_eq!(view.selected_object(), Some(ObjectRef::Asset(AssetId(0))));
        app.select_row(reference);
        assert_eq!(app.active_view().selected_object(), None);
        app.activate_current();

        assert_eq!(app.active_view().selected_object(), Some(ObjectRef::Asset(AssetId(2))));
        assert_eq!(app.history.trail(), "Assets > Assets");
    }

    #[test]
    fn test_enter_on_own_object_toggles() {
        let mut app = app();
        app.activate_current();
        assert_eq!(app.active_kind(), ViewKind::Bundles);
        assert_eq!(row_names(&app).len(), 4);
        assert!(!app.history.can_go_back());
    }

    #[test]
    fn test_search_updates_rows_live() {
        let mut app = app();
        app.start_search();
        for c in "bundleb".chars() {
            app.search.push_char(c);
            app.apply_search();
        }
        assert_eq!(row_names(&app), ["BundleB"]);
        assert_eq!(app.active_view().selected_object(), Some(ObjectRef::Bundle(BundleId(1))));

        app.clear_search();
        assert_eq!(row_names(&app), ["BundleA", "BundleB"]);
        assert_eq!(app.cursor().selected, 1);
    }

    #[test]
    fn test_sort_keys() {
        let mut app = app();
        app.sort_by_column(0);
        assert_eq!(app.active_view().sort().column, 0);
        app.sort_by_column(0);
        assert_eq!(row_names(&app), ["BundleB", "BundleA"]);

        app.sort_by_column(42);
        assert_eq!(app.active_view().sort().column, 0);

        app.cycle_sort_column();
        assert_eq!(app.active_view().sort().column, 1);
        assert!(!app.active_view().sort().ascending);
    }

    #[test]
    fn test_reload_keeps_state() {
        let mut app = app();
        app.expand_current();
        app.select_row(1);

        let mut bigger = layout();
        bigger.assets[0].size = 500;
        app.set_layout(bigger);

        assert_eq!(app.active_view().selected_object(), Some(ObjectRef::Asset(AssetId(0))));
        assert_eq!(app.cursor().selected, 1);
        assert_eq!(row_names(&app).len(), 4);
    }
}
