//! JSON report generator.

use super::{ReportFormat, ReportGenerator};
use crate::error::{LayoutError, ReportErrorKind, Result};
use crate::model::ObjectRef;
use crate::tree::{NodeId, SortSpec};
use crate::views::{LayoutView, ViewKind};
use indexmap::IndexMap;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map_err(|e| {
            LayoutError::report(
                "serializing rows",
                ReportErrorKind::JsonSerializationError(e.to_string()),
            )
        })
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ViewReport<'a> {
    view: ViewKind,
    status: &'a str,
    sort: SortSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_query: Option<&'a str>,
    rows: Vec<RowReport>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RowReport {
    id: NodeId,
    depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    object: Option<ObjectRef>,
    has_children: bool,
    expanded: bool,
    cells: IndexMap<&'static str, String>,
}

#[derive(Serialize)]
struct SummaryEntry<'a> {
    view: ViewKind,
    status: &'a str,
}

impl ReportGenerator for JsonReporter {
    fn generate_view_report(&self, view: &dyn LayoutView) -> Result<String> {
        let rows = view
            .rows()
            .iter()
            .filter(|row| !view.is_placeholder(row.id))
            .map(|row| RowReport {
                id: row.id,
                depth: row.depth,
                object: view.target_of(row.id),
                has_children: view.has_children(row.id),
                expanded: view.is_expanded(row.id),
                cells: view
                    .columns()
                    .iter()
                    .enumerate()
                    .map(|(index, column)| (column.label, view.cell(row.id, index)))
                    .collect(),
            })
            .collect();

        self.to_json(&ViewReport {
            view: view.kind(),
            status: view.status(),
            sort: view.sort(),
            search_query: Some(view.search_query()).filter(|q| !q.is_empty()),
            rows,
        })
    }

    fn generate_summary_report(&self, views: &[&dyn LayoutView]) -> Result<String> {
        let entries: Vec<SummaryEntry<'_>> = views
            .iter()
            .map(|view| SummaryEntry {
                view: view.kind(),
                status: view.status(),
            })
            .collect();
        self.to_json(&entries)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}
