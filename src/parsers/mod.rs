//! Build layout readers.
//!
//! A layout file is JSON with three optional top-level arrays, `groups`,
//! `bundles` and `assets`, whose entries refer to each other by name:
//!
//! ```json
//! {
//!   "groups":  [{ "name": "Default", "packingMode": "PackTogether", "bundles": ["ui.bundle"] }],
//!   "bundles": [{ "name": "ui.bundle", "size": 2048, "compression": "LZ4",
//!                 "dependencies": [], "expandedDependencies": [], "assets": ["Assets/menu.prefab"] }],
//!   "assets":  [{ "name": "Assets/menu.prefab", "size": 512, "references": [] }]
//! }
//! ```
//!
//! Parsing fails only on unreadable or structurally invalid documents.
//! Inconsistent references inside a valid document are dropped while linking.

mod link;
mod raw;

pub use link::link;
pub use raw::{RawAsset, RawBundle, RawGroup, RawLayout};

use crate::error::{ErrorContext, LayoutError, ParseErrorKind, Result};
use crate::model::BuildLayout;
use std::path::Path;

/// Maximum layout file size (512 MB).
const MAX_LAYOUT_FILE_SIZE: u64 = 512 * 1024 * 1024;

/// Read and link the layout at `path`.
pub fn parse_layout(path: &Path) -> Result<BuildLayout> {
    let metadata = std::fs::metadata(path).map_err(|e| LayoutError::io(path, e))?;
    if metadata.len() > MAX_LAYOUT_FILE_SIZE {
        return Err(LayoutError::parse(
            format!("at {}", path.display()),
            ParseErrorKind::TooLarge {
                size_mb: metadata.len() / (1024 * 1024),
                limit_mb: MAX_LAYOUT_FILE_SIZE / (1024 * 1024),
            },
        ));
    }
    let content = std::fs::read_to_string(path).map_err(|e| LayoutError::io(path, e))?;
    parse_layout_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Parse and link layout JSON from a string.
pub fn parse_layout_str(content: &str) -> Result<BuildLayout> {
    let raw: RawLayout = serde_json::from_str(content)?;
    if raw.has_no_sections() {
        return Err(LayoutError::missing_field(
            "groups, bundles or assets",
            "layout document",
        ));
    }
    Ok(link(raw))
}
