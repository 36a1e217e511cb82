//! Name resolution from [`RawLayout`] to [`BuildLayout`].
//!
//! Linking is best-effort: duplicate names keep their first occurrence,
//! references to unknown names are dropped, and an object claimed by two
//! owners stays with the first. Every drop is logged at `warn`.

use super::raw::RawLayout;
use crate::model::{Asset, AssetId, Bundle, BuildLayout, BundleId, Group, GroupId};
use indexmap::IndexMap;

/// Resolve all name references in `raw`.
pub fn link(raw: RawLayout) -> BuildLayout {
    let raw_bundles = raw.bundles.unwrap_or_default();
    let raw_assets = raw.assets.unwrap_or_default();
    let raw_groups = raw.groups.unwrap_or_default();

    // Bundles and assets first, so groups and references can resolve names.
    let mut bundle_index: IndexMap<String, BundleId> = IndexMap::new();
    let mut bundles = Vec::with_capacity(raw_bundles.len());
    let mut kept_bundles = Vec::with_capacity(raw_bundles.len());
    for raw_bundle in raw_bundles {
        if bundle_index.contains_key(&raw_bundle.name) {
            tracing::warn!(name = %raw_bundle.name, "duplicate bundle name, keeping first");
            continue;
        }
        let id = BundleId(bundles.len());
        bundle_index.insert(raw_bundle.name.clone(), id);
        bundles.push(Bundle {
            name: raw_bundle.name.clone(),
            size: raw_bundle.size,
            compression: raw_bundle.compression.clone(),
            ..Bundle::default()
        });
        kept_bundles.push(raw_bundle);
    }

    let mut asset_index: IndexMap<String, AssetId> = IndexMap::new();
    let mut assets = Vec::with_capacity(raw_assets.len());
    let mut kept_assets = Vec::with_capacity(raw_assets.len());
    for raw_asset in raw_assets {
        if asset_index.contains_key(&raw_asset.name) {
            tracing::warn!(name = %raw_asset.name, "duplicate asset name, keeping first");
            continue;
        }
        let id = AssetId(assets.len());
        asset_index.insert(raw_asset.name.clone(), id);
        assets.push(Asset {
            name: raw_asset.name.clone(),
            size: raw_asset.size,
            ..Asset::default()
        });
        kept_assets.push(raw_asset);
    }

    let mut groups = Vec::with_capacity(raw_groups.len());
    for raw_group in raw_groups {
        let group_id = GroupId(groups.len());
        let mut members = Vec::new();
        for name in &raw_group.bundles {
            let Some(&bundle_id) = bundle_index.get(name) else {
                tracing::warn!(group = %raw_group.name, bundle = %name, "group lists unknown bundle");
                continue;
            };
            let bundle = &mut bundles[bundle_id.index()];
            if let Some(owner) = bundle.group {
                tracing::warn!(bundle = %name, %owner, "bundle already belongs to a group");
                continue;
            }
            bundle.group = Some(group_id);
            members.push(bundle_id);
        }
        groups.push(Group {
            name: raw_group.name,
            packing_mode: raw_group.packing_mode,
            bundles: members,
        });
    }

    for (index, raw_bundle) in kept_bundles.iter().enumerate() {
        let this = BundleId(index);
        let direct = resolve_bundles(&bundle_index, this, &raw_bundle.name, &raw_bundle.dependencies);
        let expanded: Vec<BundleId> =
            resolve_bundles(&bundle_index, this, &raw_bundle.name, &raw_bundle.expanded_dependencies)
                .into_iter()
                .filter(|id| !direct.contains(id))
                .collect();

        let mut contents = Vec::new();
        for name in &raw_bundle.assets {
            let Some(&asset_id) = asset_index.get(name) else {
                tracing::warn!(bundle = %raw_bundle.name, asset = %name, "bundle lists unknown asset");
                continue;
            };
            let asset = &mut assets[asset_id.index()];
            if let Some(owner) = asset.bundle {
                tracing::warn!(asset = %name, %owner, "asset already placed in a bundle");
                continue;
            }
            asset.bundle = Some(this);
            contents.push(asset_id);
        }

        let bundle = &mut bundles[index];
        bundle.dependencies = direct;
        bundle.expanded_dependencies = expanded;
        bundle.assets = contents;
    }

    for index in 0..bundles.len() {
        let dependencies = bundles[index].dependencies.clone();
        for dep in dependencies {
            bundles[dep.index()].referenced_by.push(BundleId(index));
        }
    }

    for (index, raw_asset) in kept_assets.iter().enumerate() {
        let this = AssetId(index);
        let home = assets[index].bundle;
        let mut internal = Vec::new();
        let mut external = Vec::new();
        for name in &raw_asset.references {
            let Some(&target) = asset_index.get(name) else {
                tracing::warn!(asset = %raw_asset.name, reference = %name, "reference to unknown asset");
                continue;
            };
            if target == this || internal.contains(&target) || external.contains(&target) {
                continue;
            }
            if home.is_some() && assets[target.index()].bundle == home {
                internal.push(target);
            } else {
                external.push(target);
            }
        }
        let asset = &mut assets[index];
        asset.internal_references = internal;
        asset.external_references = external;
    }

    tracing::debug!(
        groups = groups.len(),
        bundles = bundles.len(),
        assets = assets.len(),
        "linked build layout"
    );
    BuildLayout {
        groups,
        bundles,
        assets,
    }
}

/// Resolve bundle names, dropping unknown names, self references and repeats.
fn resolve_bundles(
    index: &IndexMap<String, BundleId>,
    this: BundleId,
    owner: &str,
    names: &[String],
) -> Vec<BundleId> {
    let mut resolved = Vec::with_capacity(names.len());
    for name in names {
        match index.get(name) {
            Some(&id) if id == this => {}
            Some(&id) => {
                if !resolved.contains(&id) {
                    resolved.push(id);
                }
            }
            None => tracing::warn!(bundle = %owner, dependency = %name, "dependency on unknown bundle"),
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::raw::{RawAsset, RawBundle, RawGroup};

    fn bundle(name: &str, deps: &[&str], assets: &[&str]) -> RawBundle {
        RawBundle {
            name: name.to_string(),
            size: 10,
            dependencies: deps.iter().map(ToString::to_string).collect(),
            assets: assets.iter().map(ToString::to_string).collect(),
            ..RawBundle::default()
        }
    }

    fn asset(name: &str, refs: &[&str]) -> RawAsset {
        RawAsset {
            name: name.to_string(),
            size: 1,
            references: refs.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_references_split_by_bundle() {
        let raw = RawLayout {
            bundles: Some(vec![
                bundle("ui", &["shared"], &["menu.prefab", "menu.mat"]),
                bundle("shared", &[], &["font.ttf"]),
            ]),
            assets: Some(vec![
                asset("menu.prefab", &["menu.mat", "font.ttf", "menu.prefab"]),
                asset("menu.mat", &[]),
                asset("font.ttf", &[]),
            ]),
            groups: None,
        };
        let layout = link(raw);

        let menu = &layout.assets[0];
        assert_eq!(menu.bundle, Some(BundleId(0)));
        assert_eq!(menu.internal_references, vec![AssetId(1)]);
        assert_eq!(menu.external_references, vec![AssetId(2)]);
        assert_eq!(layout.bundles[1].referenced_by, vec![BundleId(0)]);
    }

    #[test]
    fn test_dangling_and_duplicate_names_are_dropped() {
        let raw = RawLayout {
            groups: Some(vec![
                RawGroup {
                    name: "Default".to_string(),
                    packing_mode: "PackSeparately".to_string(),
                    bundles: vec!["a".to_string(), "ghost".to_string()],
                },
                RawGroup {
                    name: "Second".to_string(),
                    packing_mode: String::new(),
                    bundles: vec!["a".to_string()],
                },
            ]),
            bundles: Some(vec![
                bundle("a", &["missing", "a", "b", "b"], &["x", "nope"]),
                bundle("b", &[], &["x"]),
                bundle("a", &[], &[]),
            ]),
            assets: Some(vec![asset("x", &["unknown"])]),
        };
        let layout = link(raw);

        assert_eq!(layout.bundles.len(), 2);
        assert_eq!(layout.bundles[0].dependencies, vec![BundleId(1)]);
        assert_eq!(layout.bundles[0].assets, vec![AssetId(0)]);
        assert!(layout.bundles[1].assets.is_empty());
        assert_eq!(layout.groups[0].bundles, vec![BundleId(0)]);
        assert!(layout.groups[1].bundles.is_empty());
        assert!(layout.assets[0].external_references.is_empty());
    }

    #[test]
    fn test_expanded_dependencies_exclude_direct() {
        let mut a = bundle("a", &["b"], &[]);
        a.expanded_dependencies = vec!["b".to_string(), "c".to_string()];
        let raw = RawLayout {
            bundles: Some(vec![a, bundle("b", &["c"], &[]), bundle("c", &[], &[])]),
            ..RawLayout::default()
        };
        let layout = link(raw);
        assert_eq!(layout.bundles[0].expanded_dependencies, vec![BundleId(2)]);
        assert_eq!(layout.bundles[0].dependency_count(), 2);
        assert_eq!(layout.bundles[2].referenced_by, vec![BundleId(1)]);
    }
}
