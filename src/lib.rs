//! **Explore the output of a content build: groups, bundles and assets.**
//!
//! `layout-explorer` reads a build layout report and presents it as three
//! interactive trees. Each tree can be expanded, sorted by any column and
//! searched by name, and any object can be followed into the view where it
//! is shown at the top level.
//!
//! ## Core Concepts & Modules
//!
//! - **[`tree`]**: The generic presentation engine. A [`TreeView`] owns an
//!   id-indexed tree, flattens it into sorted rows, searches it, and keeps
//!   selection and expansion by id so that they survive a rebuild.
//! - **[`model`]**: The linked [`BuildLayout`]. Objects live in per-kind
//!   arenas and are identified across views by an [`ObjectRef`].
//! - **[`parsers`]**: Reads the JSON layout report and links names into
//!   arena indices.
//! - **[`views`]**: The Bundles, Groups and Assets facets, each binding a
//!   node kind and column schema to the engine.
//! - **[`reports`]**: Plain-text and JSON renderings of a view for scripts.
//! - **[`tui`]**: The interactive inspector.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use layout_explorer::{LayoutView, ViewKind, create_view, parse_layout};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let layout = parse_layout(Path::new("buildlayout.json"))?;
//!
//!     let mut bundles = create_view(ViewKind::Bundles, None);
//!     bundles.set_layout(&layout);
//!     println!("{}", bundles.status());
//!
//!     for row in bundles.rows() {
//!         println!("{}  {}", bundles.cell(row.id, 0), bundles.cell(row.id, 1));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Searching
//!
//! Setting a query switches a view from the expanded tree to a flat list of
//! every matching node, sorted by the active column:
//!
//! ```no_run
//! # use layout_explorer::{LayoutView, ViewKind, create_view, parse_layout};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let layout = parse_layout(std::path::Path::new("buildlayout.json"))?;
//! let mut assets = create_view(ViewKind::Assets, None);
//! assets.set_layout(&layout);
//! assets.set_search_query("texture");
//! println!("{} matches", assets.rows().len());
//! # Ok(())
//! # }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
// Pedantic lints: allow categories that are design choices for this codebase
#![allow(
    // usize/u16 casts are pervasive in TUI layout math and bounded in practice
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // TUI render functions are inherently long
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::unused_self,
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod reports;
pub mod tree;
pub mod tui;
pub mod utils;
pub mod views;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, OutputConfig, TuiConfig, ViewsConfig};
pub use config::{ConfigError, Validatable};
pub use error::{ErrorContext, LayoutError, Result};
pub use model::{AssetId, BuildLayout, BundleId, GroupId, ObjectRef};
pub use parsers::{parse_layout, parse_layout_str};
pub use reports::{ReportFormat, ReportGenerator};
pub use tree::{Bookmark, Column, NodeId, NodePayload, Row, SortSpec, TreeBuilder, TreeView};
pub use views::{LayoutView, NavigationBookmark, ViewKind, create_view};
