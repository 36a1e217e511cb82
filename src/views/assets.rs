//! Assets view: every asset with its references split into categories.
//!
//! The "Internal References" and "External References" grouping nodes opt
//! out of sort direction, so they keep their order whichever way the active
//! column is sorted.

use super::{Facet, ViewKind, cmp_ignore_case};
use crate::model::{AssetId, BuildLayout, ObjectRef};
use crate::tree::{Column, NodeId, NodePayload, SortSpec, TreeBuilder};
use crate::utils::{format_bytes, transform_bundle_name};
use std::cmp::Ordering;

const COL_NAME: usize = 0;
const COL_SIZE: usize = 1;
const COL_BUNDLE: usize = 2;

/// Reference grouping under an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReferenceCategory {
    Internal,
    External,
}

impl ReferenceCategory {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Internal => "Internal References",
            Self::External => "External References",
        }
    }

    const fn sort_value(self) -> u8 {
        match self {
            Self::Internal => 0,
            Self::External => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetNode {
    Asset {
        id: AssetId,
        name: String,
        size: u64,
        bundle: String,
    },
    Category {
        category: ReferenceCategory,
        count: usize,
    },
    /// A referenced asset shown under a category; points at that asset.
    Reference {
        target: AssetId,
        name: String,
        size: u64,
        bundle: String,
    },
}

impl NodePayload for AssetNode {
    type Key = ObjectRef;

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        match (self, other) {
            (
                Self::Category { category, .. },
                Self::Category {
                    category: other_category,
                    ..
                },
            ) => category.sort_value().cmp(&other_category.sort_value()),
            (
                Self::Asset {
                    name, size, bundle, ..
                }
                | Self::Reference {
                    name, size, bundle, ..
                },
                Self::Asset {
                    name: other_name,
                    size: other_size,
                    bundle: other_bundle,
                    ..
                }
                | Self::Reference {
                    name: other_name,
                    size: other_size,
                    bundle: other_bundle,
                    ..
                },
            ) => match column {
                COL_NAME => cmp_ignore_case(name, other_name),
                COL_SIZE => size.cmp(other_size),
                COL_BUNDLE => cmp_ignore_case(bundle, other_bundle),
                _ => Ordering::Equal,
            },
            _ => Ordering::Equal,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Asset { .. } => 0,
            Self::Category { .. } => 1,
            Self::Reference { .. } => 2,
        }
    }

    fn supports_sorting_order(&self) -> bool {
        !matches!(self, Self::Category { .. })
    }

    fn supports_search(&self) -> bool {
        matches!(self, Self::Asset { .. })
    }

    /// Assets match on their path or on the bundle they live in.
    fn matches_search(&self, display_name: &str, query_lower: &str) -> bool {
        display_name.to_lowercase().contains(query_lower)
            || matches!(self, Self::Asset { bundle, .. } if bundle.to_lowercase().contains(query_lower))
    }

    fn render_column(&self, display_name: &str, column: usize) -> String {
        match (self, column) {
            (Self::Category { count, .. }, COL_NAME) => format!("{display_name} ({count})"),
            (_, COL_NAME) => display_name.to_string(),
            (Self::Asset { size, .. } | Self::Reference { size, .. }, COL_SIZE) => {
                format_bytes(*size)
            }
            (Self::Asset { bundle, .. } | Self::Reference { bundle, .. }, COL_BUNDLE) => {
                bundle.clone()
            }
            _ => String::new(),
        }
    }

    fn object_key(&self) -> Option<ObjectRef> {
        match self {
            Self::Asset { id, .. } => Some(ObjectRef::Asset(*id)),
            Self::Category { .. } | Self::Reference { .. } => None,
        }
    }

    fn target_key(&self) -> Option<ObjectRef> {
        match self {
            Self::Asset { id, .. } => Some(ObjectRef::Asset(*id)),
            Self::Reference { target, .. } => Some(ObjectRef::Asset(*target)),
            Self::Category { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AssetsFacet;

impl AssetsFacet {
    fn bundle_label(layout: &BuildLayout, asset: AssetId) -> String {
        layout
            .bundle_name_of(asset)
            .map(transform_bundle_name)
            .unwrap_or_default()
    }

    fn add_category(
        layout: &BuildLayout,
        builder: &mut TreeBuilder<AssetNode>,
        parent: NodeId,
        category: ReferenceCategory,
        references: &[AssetId],
    ) {
        if references.is_empty() {
            return;
        }
        let node = AssetNode::Category {
            category,
            count: references.len(),
        };
        let Some(category_id) = builder.add(parent, category.label(), node) else {
            return;
        };
        for &target in references {
            let Some(asset) = layout.asset(target) else {
                continue;
            };
            let node = AssetNode::Reference {
                target,
                name: asset.name.clone(),
                size: asset.size,
                bundle: Self::bundle_label(layout, target),
            };
            builder.add(category_id, asset.name.clone(), node);
        }
    }
}

impl Facet for AssetsFacet {
    type Node = AssetNode;

    const KIND: ViewKind = ViewKind::Assets;
    const COLUMNS: &'static [Column] = &[
        Column::new("Name", 300, true),
        Column::new("Size", 80, false),
        Column::new("Bundle", 200, true),
    ];
    const DEFAULT_SORT: SortSpec = SortSpec::descending(COL_SIZE);

    fn populate(layout: &BuildLayout, builder: &mut TreeBuilder<AssetNode>) {
        for asset_id in layout.asset_ids() {
            let Some(asset) = layout.asset(asset_id) else {
                continue;
            };
            let node = AssetNode::Asset {
                id: asset_id,
                name: asset.name.clone(),
                size: asset.size,
                bundle: Self::bundle_label(layout, asset_id),
            };
            let Some(parent) = builder.add(NodeId::ROOT, asset.name.clone(), node) else {
                continue;
            };
            Self::add_category(
                layout,
                builder,
                parent,
                ReferenceCategory::Internal,
                &asset.internal_references,
            );
            Self::add_category(
                layout,
                builder,
                parent,
                ReferenceCategory::External,
                &asset.external_references,
            );
        }
    }

    fn status(layout: &BuildLayout) -> String {
        format!(
            "{} assets making up {}",
            layout.assets.len(),
            format_bytes(layout.total_asset_size())
        )
    }
}
