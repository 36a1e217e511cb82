//! The linked build layout: groups own bundles, bundles own assets.

use super::identifiers::{AssetId, BundleId, GroupId, ObjectRef};
use serde::{Deserialize, Serialize};

/// A build layout with every name reference resolved to an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildLayout {
    pub groups: Vec<Group>,
    pub bundles: Vec<Bundle>,
    pub assets: Vec<Asset>,
}

/// A named set of bundles built with one packing mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    pub packing_mode: String,
    pub bundles: Vec<BundleId>,
}

/// One archive produced by the build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub name: String,
    pub size: u64,
    pub compression: String,
    pub group: Option<GroupId>,
    pub assets: Vec<AssetId>,
    /// Bundles this bundle loads directly.
    pub dependencies: Vec<BundleId>,
    /// Bundles pulled in transitively, excluding direct dependencies.
    pub expanded_dependencies: Vec<BundleId>,
    /// Bundles that list this one as a direct dependency.
    pub referenced_by: Vec<BundleId>,
}

impl Bundle {
    /// Count shown in the "References to Bundles" column.
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len() + self.expanded_dependencies.len()
    }
}

/// One explicit asset placed into a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub name: String,
    pub size: u64,
    pub bundle: Option<BundleId>,
    /// Referenced assets living in the same bundle.
    pub internal_references: Vec<AssetId>,
    /// Referenced assets living in other bundles.
    pub external_references: Vec<AssetId>,
}

impl BuildLayout {
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.index())
    }

    #[must_use]
    pub fn bundle(&self, id: BundleId) -> Option<&Bundle> {
        self.bundles.get(id.index())
    }

    #[must_use]
    pub fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(id.index())
    }

    pub fn group_ids(&self) -> impl Iterator<Item = GroupId> {
        (0..self.groups.len()).map(GroupId)
    }

    pub fn bundle_ids(&self) -> impl Iterator<Item = BundleId> {
        (0..self.bundles.len()).map(BundleId)
    }

    pub fn asset_ids(&self) -> impl Iterator<Item = AssetId> {
        (0..self.assets.len()).map(AssetId)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.bundles.is_empty() && self.assets.is_empty()
    }

    /// Sum of a group's bundle sizes.
    #[must_use]
    pub fn group_size(&self, id: GroupId) -> u64 {
        self.group(id).map_or(0, |group| {
            group
                .bundles
                .iter()
                .filter_map(|&b| self.bundle(b))
                .map(|b| b.size)
                .sum()
        })
    }

    #[must_use]
    pub fn total_asset_size(&self) -> u64 {
        self.assets.iter().map(|a| a.size).sum()
    }

    /// Name of the object behind `object`, if it exists.
    #[must_use]
    pub fn name_of(&self, object: ObjectRef) -> Option<&str> {
        match object {
            ObjectRef::Group(id) => self.group(id).map(|g| g.name.as_str()),
            ObjectRef::Bundle(id) => self.bundle(id).map(|b| b.name.as_str()),
            ObjectRef::Asset(id) => self.asset(id).map(|a| a.name.as_str()),
        }
    }

    /// Name of the bundle containing `asset`.
    #[must_use]
    pub fn bundle_name_of(&self, asset: AssetId) -> Option<&str> {
        self.asset(asset)
            .and_then(|a| a.bundle)
            .and_then(|b| self.bundle(b))
            .map(|b| b.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BuildLayout {
        BuildLayout {
            groups: vec![Group {
                name: "Default".to_string(),
                packing_mode: "PackTogether".to_string(),
                bundles: vec![BundleId(0), BundleId(1)],
            }],
            bundles: vec![
                Bundle {
                    name: "a.bundle".to_string(),
                    size: 100,
                    group: Some(GroupId(0)),
                    assets: vec![AssetId(0)],
                    dependencies: vec![BundleId(1)],
                    ..Bundle::default()
                },
                Bundle {
                    name: "b.bundle".to_string(),
                    size: 50,
                    group: Some(GroupId(0)),
                    referenced_by: vec![BundleId(0)],
                    ..Bundle::default()
                },
            ],
            assets: vec![Asset {
                name: "Assets/hero.prefab".to_string(),
                size: 40,
                bundle: Some(BundleId(0)),
                ..Asset::default()
            }],
        }
    }

    #[test]
    fn test_sizes() {
        let layout = layout();
        assert_eq!(layout.group_size(GroupId(0)), 150);
        assert_eq!(layout.group_size(GroupId(7)), 0);
        assert_eq!(layout.total_asset_size(), 40);
    }

    #[test]
    fn test_lookups() {
        let layout = layout();
        assert_eq!(layout.name_of(ObjectRef::Bundle(BundleId(1))), Some("b.bundle"));
        assert_eq!(layout.name_of(ObjectRef::Asset(AssetId(5))), None);
        assert_eq!(layout.bundle_name_of(AssetId(0)), Some("a.bundle"));
        assert_eq!(layout.bundles[0].dependency_count(), 1);
        assert_eq!(layout.bundle_ids().count(), 2);
    }
}
