//! Generic hierarchical tree presentation engine.
//!
//! The engine turns an arbitrary tree of typed nodes into rows for a
//! virtualized table:
//!
//! - [`TreeBuilder`] converts a domain graph into an id-indexed [`Tree`]
//!   once per reload.
//! - [`flatten`] produces the sorted, depth-tagged rows of the expanded
//!   tree; [`search`] produces a flat, globally sorted list of matches.
//! - [`ExpansionSet`], [`SelectionSet`] and [`Bookmark`] hold interaction
//!   state by id, so it survives a rebuild.
//! - [`TreeView`] ties these together behind a single interactive facade.
//!
//! Node behaviour (ordering, matching, cell text) is supplied per view
//! through the [`NodePayload`] trait.
//!
//! ```
//! use layout_explorer::tree::{Column, NodeId, NodePayload, SortSpec, TreeBuilder, TreeView};
//! use std::cmp::Ordering;
//!
//! #[derive(Debug)]
//! struct File(u64);
//!
//! impl NodePayload for File {
//!     type Key = ();
//!     fn compare(&self, other: &Self, _column: usize) -> Ordering {
//!         self.0.cmp(&other.0)
//!     }
//! }
//!
//! let mut view = TreeView::new(vec![Column::new("Name", 200, true)], SortSpec::ascending(0));
//! view.set_data(&|b: &mut TreeBuilder<File>| {
//!     b.add(NodeId::ROOT, "big.bin", File(900));
//!     b.add(NodeId::ROOT, "small.bin", File(3));
//! });
//! let names: Vec<String> = view.rows().iter().map(|r| view.cell(r.id, 0)).collect();
//! assert_eq!(names, ["small.bin", "big.bin"]);
//! ```

mod builder;
mod flatten;
mod node;
mod search;
mod state;
mod view;

pub use builder::{TreeBuilder, TreeSource};
pub use flatten::{Row, SortSpec, compare_nodes, flatten, sorted_children};
pub use node::{Node, NodeId, NodePayload, Tree};
pub use search::search;
pub use state::{Bookmark, ExpansionSet, SelectionSet};
pub use view::{Column, SelectionCallback, TreeView};
