//! Serde mirror of the JSON build layout file.
//!
//! Objects refer to each other by name here; [`link`](super::link) turns the
//! names into arena indices.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLayout {
    pub groups: Option<Vec<RawGroup>>,
    pub bundles: Option<Vec<RawBundle>>,
    pub assets: Option<Vec<RawAsset>>,
}

impl RawLayout {
    /// True when none of the three sections is present at all.
    pub(crate) const fn has_no_sections(&self) -> bool {
        self.groups.is_none() && self.bundles.is_none() && self.assets.is_none()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroup {
    pub name: String,
    #[serde(default)]
    pub packing_mode: String,
    #[serde(default)]
    pub bundles: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBundle {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub compression: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub expanded_dependencies: Vec<String>,
    #[serde(default)]
    pub assets: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAsset {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub references: Vec<String>,
}
