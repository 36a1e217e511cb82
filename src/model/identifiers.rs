//! Typed indices into a [`BuildLayout`](super::BuildLayout).
//!
//! Each object kind lives in its own arena, so a bare `usize` would be easy
//! to mix up between bundles and assets. These newtypes keep the kinds apart,
//! and [`ObjectRef`] is the kind-tagged handle views use to find an object's
//! node again.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl $name {
            #[must_use]
            pub const fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

arena_id!(
    /// Index of a [`Group`](super::Group).
    GroupId,
    "group#"
);
arena_id!(
    /// Index of a [`Bundle`](super::Bundle).
    BundleId,
    "bundle#"
);
arena_id!(
    /// Index of an [`Asset`](super::Asset).
    AssetId,
    "asset#"
);

/// Stable, kind-tagged reference to one object in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum ObjectRef {
    Group(GroupId),
    Bundle(BundleId),
    Asset(AssetId),
}

impl ObjectRef {
    /// Human-readable kind name.
    #[must_use]
    pub const fn kind_name(self) -> &'static str {
        match self {
            Self::Group(_) => "group",
            Self::Bundle(_) => "bundle",
            Self::Asset(_) => "asset",
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(id) => id.fmt(f),
            Self::Bundle(id) => id.fmt(f),
            Self::Asset(id) => id.fmt(f),
        }
    }
}

impl From<GroupId> for ObjectRef {
    fn from(id: GroupId) -> Self {
        Self::Group(id)
    }
}

impl From<BundleId> for ObjectRef {
    fn from(id: BundleId) -> Self {
        Self::Bundle(id)
    }
}

impl From<AssetId> for ObjectRef {
    fn from(id: AssetId) -> Self {
        Self::Asset(id)
    }
}
