//! Table report generator for terminal output.

use super::{ReportFormat, ReportGenerator};
use crate::error::Result;
use crate::tree::Row;
use crate::utils::fit_width;
use crate::views::LayoutView;
use unicode_width::UnicodeWidthStr;

/// Display columns per unit of a column's default (pixel) width.
const PIXELS_PER_CHAR: u16 = 5;
const MIN_COLUMN_WIDTH: usize = 8;
const INDENT: &str = "  ";

/// Apply ANSI color formatting if colored output is enabled.
fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

/// Aligned, indented table of a view's visible rows.
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    /// Column 0 text: indentation, foldout marker and name.
    fn name_cell(view: &dyn LayoutView, row: Row) -> String {
        let marker = if view.search_query().is_empty() && view.has_children(row.id) {
            if view.is_expanded(row.id) { "▼ " } else { "▶ " }
        } else {
            ""
        };
        format!("{}{marker}{}", INDENT.repeat(row.depth), view.cell(row.id, 0))
    }

    fn header_labels(view: &dyn LayoutView) -> Vec<String> {
        let sort = view.sort();
        view.columns()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                if index == sort.column {
                    let arrow = if sort.ascending { "▲" } else { "▼" };
                    format!("{} {arrow}", column.label)
                } else {
                    column.label.to_string()
                }
            })
            .collect()
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate_view_report(&self, view: &dyn LayoutView) -> Result<String> {
        let rows: Vec<Row> = view
            .rows()
            .iter()
            .copied()
            .filter(|row| !view.is_placeholder(row.id))
            .collect();
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|&row| {
                (0..view.columns().len())
                    .map(|column| {
                        if column == 0 {
                            Self::name_cell(view, row)
                        } else {
                            view.cell(row.id, column)
                        }
                    })
                    .collect()
            })
            .collect();

        let headers = Self::header_labels(view);
        let widths: Vec<usize> = view
            .columns()
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let cap = usize::from(column.default_width / PIXELS_PER_CHAR).max(MIN_COLUMN_WIDTH);
                let content = cells.iter().map(|r| r[index].width()).max().unwrap_or(0);
                content.min(cap).max(headers[index].width())
            })
            .collect();

        let join = |values: &[String]| -> String {
            values
                .iter()
                .zip(&widths)
                .map(|(value, &width)| fit_width(value, width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut lines = Vec::with_capacity(rows.len() + 4);
        lines.push(self.color(&join(&headers), "bold"));
        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        lines.push(self.color(&"─".repeat(total), "dim"));
        lines.extend(cells.iter().map(|row| join(row)));
        lines.push(String::new());

        if view.search_query().is_empty() {
            lines.push(self.color(view.status(), "cyan"));
        } else {
            lines.push(self.color(
                &format!(
                    "{} matches for \"{}\" | {}",
                    rows.len(),
                    view.search_query(),
                    view.status()
                ),
                "cyan",
            ));
        }

        Ok(lines.join("\n") + "\n")
    }

    fn generate_summary_report(&self, views: &[&dyn LayoutView]) -> Result<String> {
        let mut lines = vec![
            self.color("Build Layout Summary", "bold"),
            self.color(&"─".repeat(40), "dim"),
        ];
        for view in views {
            lines.push(format!(
                "{}  {}",
                self.color(&format!("{:<8}", view.kind().title()), "cyan"),
                view.status()
            ));
        }
        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}
