//! Domain model for build layout reports.
//!
//! A [`BuildLayout`] is the linked form of a layout file: objects live in
//! per-kind arenas and refer to each other through typed indices
//! ([`GroupId`], [`BundleId`], [`AssetId`]). Views wrap these objects in tree
//! nodes and use [`ObjectRef`] to find them again.

mod identifiers;
mod layout;

pub use identifiers::*;
pub use layout::*;
