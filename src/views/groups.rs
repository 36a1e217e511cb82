//! Groups view: every group with the bundles it produced.

use super::{Facet, ViewKind, cmp_ignore_case};
use crate::model::{BuildLayout, BundleId, GroupId, ObjectRef};
use crate::tree::{Column, NodeId, NodePayload, SortSpec, TreeBuilder};
use crate::utils::{format_bytes, transform_bundle_name};
use std::cmp::Ordering;

const COL_NAME: usize = 0;
const COL_SIZE: usize = 1;
const COL_BUNDLES: usize = 2;
const COL_PACKING: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupNode {
    Group {
        id: GroupId,
        name: String,
        size: u64,
        bundle_count: usize,
        packing_mode: String,
    },
    Bundle {
        id: BundleId,
        name: String,
        size: u64,
    },
}

impl GroupNode {
    fn name(&self) -> &str {
        match self {
            Self::Group { name, .. } | Self::Bundle { name, .. } => name,
        }
    }

    const fn size(&self) -> u64 {
        match self {
            Self::Group { size, .. } | Self::Bundle { size, .. } => *size,
        }
    }
}

impl NodePayload for GroupNode {
    type Key = ObjectRef;

    fn compare(&self, other: &Self, column: usize) -> Ordering {
        match (column, self, other) {
            (COL_NAME, _, _) => cmp_ignore_case(self.name(), other.name()),
            (COL_SIZE, _, _) => self.size().cmp(&other.size()),
            (
                COL_BUNDLES,
                Self::Group { bundle_count, .. },
                Self::Group {
                    bundle_count: other_count,
                    ..
                },
            ) => bundle_count.cmp(other_count),
            (
                COL_PACKING,
                Self::Group { packing_mode, .. },
                Self::Group {
                    packing_mode: other_mode,
                    ..
                },
            ) => cmp_ignore_case(packing_mode, other_mode),
            _ => Ordering::Equal,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            Self::Group { .. } => 0,
            Self::Bundle { .. } => 1,
        }
    }

    fn supports_search(&self) -> bool {
        true
    }

    fn render_column(&self, display_name: &str, column: usize) -> String {
        match (self, column) {
            (_, COL_NAME) => display_name.to_string(),
            (_, COL_SIZE) => format_bytes(self.size()),
            (Self::Group { bundle_count, .. }, COL_BUNDLES) => bundle_count.to_string(),
            (Self::Group { packing_mode, .. }, COL_PACKING) => packing_mode.clone(),
            _ => String::new(),
        }
    }

    fn object_key(&self) -> Option<ObjectRef> {
        Some(match self {
            Self::Group { id, .. } => ObjectRef::Group(*id),
            Self::Bundle { id, .. } => ObjectRef::Bundle(*id),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GroupsFacet;

impl Facet for GroupsFacet {
    type Node = GroupNode;

    const KIND: ViewKind = ViewKind::Groups;
    const COLUMNS: &'static [Column] = &[
        Column::new("Name", 250, true),
        Column::new("Size", 80, false),
        Column::new("Bundles", 80, false),
        Column::new("Packing Mode", 120, true),
    ];
    const DEFAULT_SORT: SortSpec = SortSpec::ascending(COL_NAME);

    fn populate(layout: &BuildLayout, builder: &mut TreeBuilder<GroupNode>) {
        for group_id in layout.group_ids() {
            let Some(group) = layout.group(group_id) else {
                continue;
            };
            let node = GroupNode::Group {
                id: group_id,
                name: group.name.clone(),
                size: layout.group_size(group_id),
                bundle_count: group.bundles.len(),
                packing_mode: group.packing_mode.clone(),
            };
            let Some(parent) = builder.add(NodeId::ROOT, group.name.clone(), node) else {
                continue;
            };
            for &bundle_id in &group.bundles {
                if let Some(bundle) = layout.bundle(bundle_id) {
                    let name = transform_bundle_name(&bundle.name);
                    let node = GroupNode::Bundle {
                        id: bundle_id,
                        name: name.clone(),
                        size: bundle.size,
                    };
                    builder.add(parent, name, node);
                }
            }
        }
    }

    fn status(layout: &BuildLayout) -> String {
        let total: u64 = layout.group_ids().map(|id| layout.group_size(id)).sum();
        format!(
            "{} groups making up {}",
            layout.groups.len(),
            format_bytes(total)
        )
    }
}
