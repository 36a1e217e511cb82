//! Tree command handler.
//!
//! Implements the `tree` subcommand: print the rows of one view, either
//! the flattened tree or the results of a search, without a terminal UI.

use super::{OutputTarget, exit_codes, should_use_color, write_output};
use crate::config::AppConfig;
use crate::parsers::parse_layout;
use crate::reports::{ReportFormat, create_reporter_with_options};
use crate::views::{LayoutView, ViewKind, create_view};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;

/// Options of the `tree` subcommand after merging with the config file.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    pub layout_path: PathBuf,
    pub view: ViewKind,
    /// Column to sort by, overriding the configured one
    pub sort_column: Option<usize>,
    /// Direction to sort in; `None` keeps the column's natural direction
    pub ascending: Option<bool>,
    pub expand_all: bool,
    pub search: Option<String>,
    pub format: ReportFormat,
    pub output_file: Option<PathBuf>,
}

/// Run the tree command
pub fn run_tree(options: &TreeOptions, config: &AppConfig) -> Result<i32> {
    let layout = parse_layout(&options.layout_path)
        .with_context(|| format!("Failed to load layout {}", options.layout_path.display()))?;

    let mut view = create_view(options.view, config.views.sort_for(options.view));
    apply_sort(view.as_mut(), options)?;
    view.set_layout(&layout);

    if options.expand_all {
        view.expand_all();
    }
    let searching = options.search.as_deref().is_some_and(|q| !q.is_empty());
    if let Some(query) = &options.search {
        view.set_search_query(query);
    }

    let target = OutputTarget::from_option(options.output_file.clone());
    let colored = should_use_color(config.output.no_color, &target);
    let reporter = create_reporter_with_options(options.format, colored);
    let report = reporter.generate_view_report(view.as_ref())?;
    write_output(&report, &target)?;

    let matches = view
        .rows()
        .iter()
        .filter(|row| !view.is_placeholder(row.id))
        .count();
    tracing::debug!(view = %options.view, rows = matches, "tree printed");

    if searching && matches == 0 {
        return Ok(exit_codes::NO_MATCHES);
    }
    Ok(exit_codes::SUCCESS)
}

/// Apply `--sort-column` and `--ascending`/`--descending` on top of the
/// configured sort.
fn apply_sort(view: &mut dyn LayoutView, options: &TreeOptions) -> Result<()> {
    if options.sort_column.is_none() && options.ascending.is_none() {
        return Ok(());
    }
    let current = view.sort();
    let column = options.sort_column.unwrap_or(current.column);
    let Some(def) = view.columns().get(column) else {
        bail!(
            "Sort column {column} is out of range; the {} view has {} columns",
            options.view.title(),
            view.columns().len()
        );
    };
    let ascending = options.ascending.unwrap_or(if column == current.column {
        current.ascending
    } else {
        def.default_sort_ascending
    });
    view.set_sort_column(column, ascending);
    Ok(())
}
