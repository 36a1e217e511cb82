//! Non-interactive output of view rows.
//!
//! The `tree` and `summary` commands print what a view would show on screen:
//! - Table: aligned columns with depth indentation, for terminals
//! - JSON: rows with their cells keyed by column label, for scripts
//!
//! Reporters only read a view through [`LayoutView`], so the rows they print
//! are exactly the rows the TUI would render.

mod json;
mod table;
mod types;

pub use json::JsonReporter;
pub use table::TableReporter;
pub use types::ReportFormat;

use crate::error::Result;
use crate::views::LayoutView;
use std::io::Write;

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the visible rows of one view.
    fn generate_view_report(&self, view: &dyn LayoutView) -> Result<String>;

    /// Render the status line of every view.
    fn generate_summary_report(&self, views: &[&dyn LayoutView]) -> Result<String>;

    /// Write a view report to a writer
    fn write_view_report(&self, view: &dyn LayoutView, writer: &mut dyn Write) -> Result<()> {
        let report = self.generate_view_report(view)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control
#[must_use]
pub fn create_reporter_with_options(format: ReportFormat, colored: bool) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Table => {
            if colored {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_format() {
        assert_eq!(create_reporter(ReportFormat::Json).format(), ReportFormat::Json);
        assert_eq!(
            create_reporter_with_options(ReportFormat::Table, false).format(),
            ReportFormat::Table
        );
    }
}
