//! Interactive terminal inspector built on ratatui.
//!
//! The inspector shows one tab per [`ViewKind`](crate::views::ViewKind).
//! Each tab is a virtualized tree table over a
//! [`LayoutView`](crate::views::LayoutView); pressing Enter on a row opens
//! the object it refers to in its own view, and Backspace walks back.

mod app;
pub(crate) mod constants;
mod events;
mod navigation;
pub mod state;
pub mod theme;
mod ui;
pub mod viewmodel;
pub(crate) mod widgets;

pub use app::{InspectorApp, TableGeometry};
pub use events::{Event, EventHandler};
pub use navigation::NavigationHistory;
pub use state::{ListNavigation, TableCursor};
pub use theme::{ColorScheme, FooterHints, Styles, Theme, colors, set_theme, toggle_theme};
pub use ui::run_inspector_tui;
pub use viewmodel::{SearchInput, StatusMessage};
