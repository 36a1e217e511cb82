//! Bundles view: every bundle with the assets packed into it.

use super::{Facet, ViewKind, cmp_ignore_case};
use crate::model::{AssetId, BuildLayout, BundleId, ObjectRef};
use crate::tree::{Column, NodeId, NodePayload, SortSpec, TreeBuilder};
use crate::utils::{format_bytes, transform_bundle_name};
use std::cmp::Ordering;

const COL_NAME: usize = 0;
const COL_SIZE: usize = 1;
const COL_COMPRESSION: usize = 2;
const COL_DEPENDENCIES: usize = 3;
const COL_REFERENCED_BY: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleNode {
    Bundle {
        id: BundleId,
        name: String,
        size: u64,
        compression: String,
        dependencies: usize,
        referenced_by: usize,
    },
    Asset {
        id: AssetId,
        name: String,
        size: u64,
    },
}

impl BundleNode {
    fn name(&self) -> &str {
        match self {
            Self::Bundle { name, .. } | Self::Asset { name, .. } => name,
        }
    }

    const fn size(&self) -> u64 {
        match self {
            Self::Bundle { size, .. } | Self::Asset { size, .. } => *size,
        }
    }
}

impl NodePayload for BundleNode {
    type Key = ObjectRef;

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        match column {
            COL_NAME => cmp_ignore_case(self.name(), other.name()),
            COL_SIZE => self.size().cmp(&other.size()),
            _ => match (self, other) {
                (
                    Self::Bundle {
                        compression,
                        dependencies,
                        referenced_by,
                        ..
                    },
                    Self::Bundle {
                        compression: other_compression,
                        dependencies: other_dependencies,
                        referenced_by: other_referenced_by,
                        ..
                    },
                ) => match column {
                    COL_COMPRESSION => cmp_ignore_case(compression, other_compression),
                    COL_DEPENDENCIES => dependencies.cmp(other_dependencies),
                    COL_REFERENCED_BY => referenced_by.cmp(other_referenced_by),
                    _ => Ordering::Equal,
                },
                _ => Ordering::Equal,
            },
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Bundle { .. } => 0,
            Self::Asset { .. } => 1,
        }
    }

    fn supports_search(&self) -> bool {
        matches!(self, Self::Bundle { .. })
    }

    fn render_column(&self, display_name: &str, column: usize) -> String {
        match (self, column) {
            (_, COL_NAME) => display_name.to_string(),
            (_, COL_SIZE) => format_bytes(self.size()),
            (Self::Bundle { compression, .. }, COL_COMPRESSION) => compression.clone(),
            (Self::Bundle { dependencies, .. }, COL_DEPENDENCIES) => dependencies.to_string(),
            (Self::Bundle { referenced_by, .. }, COL_REFERENCED_BY) => referenced_by.to_string(),
            _ => String::new(),
        }
    }

    fn object_key(&self) -> Option<ObjectRef> {
        Some(match self {
            Self::Bundle { id, .. } => ObjectRef::Bundle(*id),
            Self::Asset { id, .. } => ObjectRef::Asset(*id),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BundlesFacet;

impl Facet for BundlesFacet {
    type Node = BundleNode;

    const KIND: ViewKind = ViewKind::Bundles;
    const COLUMNS: &'static [Column] = &[
        Column::new("Name", 250, true),
        Column::new("Size", 80, false),
        Column::new("Compression", 80, true),
        Column::new("References to Bundles", 80, false),
        Column::new("Referenced by Bundles", 80, false),
    ];
    const DEFAULT_SORT: SortSpec = SortSpec::descending(COL_SIZE);

    fn populate(layout: &BuildLayout, builder: &mut TreeBuilder<BundleNode>) {
        for bundle_id in layout.bundle_ids() {
            let Some(bundle) = layout.bundle(bundle_id) else {
                continue;
            };
            let name = transform_bundle_name(&bundle.name);
            let node = BundleNode::Bundle {
                id: bundle_id,
                name: name.clone(),
                size: bundle.size,
                compression: bundle.compression.clone(),
                dependencies: bundle.dependency_count(),
                referenced_by: bundle.referenced_by.len(),
            };
            let Some(parent) = builder.add(NodeId::ROOT, name, node) else {
                continue;
            };
            for &asset_id in &bundle.assets {
                if let Some(asset) = layout.asset(asset_id) {
                    let node = BundleNode::Asset {
                        id: asset_id,
                        name: asset.name.clone(),
                        size: asset.size,
                    };
                    builder.add(parent, asset.name.clone(), node);
                }
            }
        }
    }

    /// Counts the bundles reachable through groups; ungrouped bundles are
    /// listed but not counted.
    fn status(layout: &BuildLayout) -> String {
        let (count, size) = layout
            .groups
            .iter()
            .flat_map(|group| &group.bundles)
            .filter_map(|&id| layout.bundle(id))
            .fold((0usize, 0u64), |(count, size), bundle| (count + 1, size + bundle.size));
        format!("{count} bundles making up {}", format_bytes(size))
    }
}
