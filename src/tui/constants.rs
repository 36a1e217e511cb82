//! Named constants for TUI layout and navigation.

/// Default number of rows moved per page-up/page-down action.
pub(crate) const PAGE_SIZE: usize = 10;

/// Minimum terminal size the inspector renders in.
pub(crate) const MIN_WIDTH: u16 = 60;
pub(crate) const MIN_HEIGHT: u16 = 12;

/// Display columns of indentation per tree level.
pub(crate) const INDENT_WIDTH: usize = 2;

/// Display columns per unit of a column's default (pixel) width.
pub(crate) const PIXELS_PER_CELL: u16 = 5;

/// Entries kept in each direction of the navigation history.
pub(crate) const HISTORY_LIMIT: usize = 64;
