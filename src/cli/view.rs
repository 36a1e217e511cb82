//! View command handler.
//!
//! Implements the `view` subcommand: the interactive inspector.

use super::exit_codes;
use crate::config::AppConfig;
use crate::parsers::parse_layout;
use crate::tui::{InspectorApp, run_inspector_tui};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the view command
pub fn run_view(layout_path: &Path, config: &AppConfig) -> Result<i32> {
    let layout = parse_layout(layout_path)
        .with_context(|| format!("Failed to load layout {}", layout_path.display()))?;
    tracing::info!(
        groups = layout.groups.len(),
        bundles = layout.bundles.len(),
        assets = layout.assets.len(),
        "loaded build layout"
    );

    let mut app = InspectorApp::new(layout, Some(layout_path.to_path_buf()), config);
    run_inspector_tui(&mut app, &config.tui.theme).context("Inspector failed")?;

    Ok(exit_codes::SUCCESS)
}
