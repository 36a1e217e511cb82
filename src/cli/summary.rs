//! Summary command handler.

use super::{OutputTarget, exit_codes, should_use_color, write_output};
use crate::config::AppConfig;
use crate::parsers::parse_layout;
use crate::reports::create_reporter_with_options;
use crate::views::{LayoutView, ViewKind, create_view};
use anyhow::{Context, Result};
use std::path::Path;

/// Print the status line of every view.
pub fn run_summary(layout_path: &Path, config: &AppConfig) -> Result<i32> {
    let layout = parse_layout(layout_path)
        .with_context(|| format!("Failed to load layout {}", layout_path.display()))?;

    let views: Vec<Box<dyn LayoutView>> = ViewKind::ALL
        .iter()
        .map(|&kind| {
            let mut view = create_view(kind, config.views.sort_for(kind));
            view.set_layout(&layout);
            view
        })
        .collect();
    let refs: Vec<&dyn LayoutView> = views.iter().map(AsRef::as_ref).collect();

    let target = OutputTarget::Stdout;
    let colored = should_use_color(config.output.no_color, &target);
    let reporter = create_reporter_with_options(config.output.format, colored);
    let report = reporter.generate_summary_report(&refs)?;
    write_output(&report, &target)?;

    Ok(exit_codes::SUCCESS)
}
