//! Virtualized tree table over a [`LayoutView`].
//!
//! Only the rows inside the viewport are turned into lines. The first
//! column carries the tree: depth indent, a foldout marker and the name.

use crate::tui::app::TableGeometry;
use crate::tui::constants::{INDENT_WIDTH, PIXELS_PER_CELL};
use crate::tui::state::TableCursor;
use crate::tui::theme::{Styles, colors};
use crate::tree::{Column, Row};
use crate::utils::fit_width;
use crate::views::LayoutView;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const MIN_NAME_WIDTH: u16 = 12;

/// Widths of each column for a table `total` cells wide.
///
/// Columns after the first keep their default width; the first column
/// takes whatever is left.
#[must_use]
pub fn column_widths(columns: &[Column], total: u16) -> Vec<u16> {
    let mut widths: Vec<u16> = columns
        .iter()
        .map(|c| {
            let label = u16::try_from(c.label.width()).unwrap_or(u16::MAX);
            (c.default_width / PIXELS_PER_CELL).max(label.saturating_add(2)).max(6)
        })
        .collect();
    if let Some((first, rest)) = widths.split_first_mut() {
        let gaps = u16::try_from(rest.len()).unwrap_or(u16::MAX);
        let used = rest.iter().fold(gaps, |acc, w| acc.saturating_add(*w));
        *first = total.saturating_sub(used).max(MIN_NAME_WIDTH);
    }
    widths
}

/// The tree table of one view.
pub struct TreeTable<'a> {
    view: &'a dyn LayoutView,
    cursor: &'a TableCursor,
    focused: bool,
}

impl<'a> TreeTable<'a> {
    #[must_use]
    pub fn new(view: &'a dyn LayoutView, cursor: &'a TableCursor) -> Self {
        Self {
            view,
            cursor,
            focused: true,
        }
    }

    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Draw into `area` and return where the header and rows ended up.
    pub fn render(self, frame: &mut Frame, area: Rect) -> TableGeometry {
        let border = if self.focused {
            Styles::border_focused()
        } else {
            Styles::border()
        };
        let block = Block::default()
            .title(format!(" {} ", self.view.kind().title()))
            .title_style(Styles::section_title())
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return TableGeometry::default();
        }

        let widths = column_widths(self.view.columns(), inner.width);
        let mut lines = vec![self.header_line(&widths)];
        let body_height = inner.height.saturating_sub(1);
        lines.extend(self.row_lines(&widths, usize::from(body_height)));
        frame.render_widget(Paragraph::new(lines), inner);

        let mut columns = Vec::with_capacity(widths.len());
        let mut x = inner.x;
        for width in &widths {
            let end = x.saturating_add(*width).saturating_sub(1);
            columns.push((x, end));
            x = end.saturating_add(2);
        }

        TableGeometry {
            header_y: inner.y,
            body: Rect::new(inner.x, inner.y + 1, inner.width, body_height),
            columns,
        }
    }

    fn header_line(&self, widths: &[u16]) -> Line<'static> {
        let sort = self.view.sort();
        let mut spans = Vec::with_capacity(widths.len() * 2);
        for (i, (column, width)) in self.view.columns().iter().zip(widths).enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let sorted = i == sort.column;
            let label = if sorted {
                let arrow = if sort.ascending { "▲" } else { "▼" };
                format!("{} {arrow}", column.label)
            } else {
                column.label.to_string()
            };
            spans.push(Span::styled(
                fit_width(&label, usize::from(*width)),
                Styles::column_header(sorted),
            ));
        }
        Line::from(spans)
    }

    /// Lines for the rows visible in a body `height` rows tall.
    pub fn row_lines(&self, widths: &[u16], height: usize) -> Vec<Line<'static>> {
        let Some((first, last)) = self.cursor.visible_range(height) else {
            return Vec::new();
        };
        self.view
            .rows_in(first, last)
            .iter()
            .enumerate()
            .map(|(offset, row)| self.row_line(row, first + offset, widths))
            .collect()
    }

    fn row_line(&self, row: &Row, index: usize, widths: &[u16]) -> Line<'static> {
        if self.view.is_placeholder(row.id) {
            return Line::from("");
        }

        let view = self.view;
        let is_category = view.target_of(row.id).is_none();
        let searching = !view.search_query().is_empty();
        let mut spans = Vec::with_capacity(widths.len() * 2 + 2);

        for (column, width) in widths.iter().enumerate() {
            let width = usize::from(*width);
            if column > 0 {
                spans.push(Span::raw(" "));
            }
            if column == 0 {
                spans.extend(self.name_spans(row, width, searching, is_category));
                continue;
            }
            let text = fit_width(&view.cell(row.id, column), width);
            let style = if view.columns()[column].label == "Size" {
                Styles::size()
            } else {
                Styles::text()
            };
            spans.push(Span::styled(text, style));
        }

        let line = Line::from(spans);
        if index == self.cursor.selected {
            line.style(Styles::selected())
        } else if view.selection().contains(&row.id) {
            line.style(Style::default().bg(colors().background_alt))
        } else {
            line
        }
    }

    fn name_spans(
        &self,
        row: &Row,
        width: usize,
        searching: bool,
        is_category: bool,
    ) -> Vec<Span<'static>> {
        let view = self.view;
        let indent = " ".repeat(row.depth * INDENT_WIDTH);
        let marker = if searching || !view.has_children(row.id) {
            "  "
        } else if view.is_expanded(row.id) {
            "▼ "
        } else {
            "▶ "
        };
        let prefix = format!("{indent}{marker}");
        let name_width = width.saturating_sub(prefix.width());
        let name = fit_width(&view.cell(row.id, 0), name_width);
        let name_style = if is_category {
            Styles::category()
        } else {
            Styles::text()
        };

        let mut spans = vec![Span::raw(indent), Span::styled(marker, Styles::foldout())];
        match searching.then(|| highlight_range(&name, view.search_query())).flatten() {
            Some((start, end)) => {
                spans.push(Span::styled(name[..start].to_string(), name_style));
                spans.push(Span::styled(
                    name[start..end].to_string(),
                    name_style.bg(colors().search_highlight_bg),
                ));
                spans.push(Span::styled(name[end..].to_string(), name_style));
            }
            None => spans.push(Span::styled(name, name_style)),
        }
        spans
    }
}

/// Byte range of the first case-insensitive match of `query` in `text`.
fn highlight_range(text: &str, query: &str) -> Option<(usize, usize)> {
    let lower = text.to_lowercase();
    // Lowercasing can change byte lengths outside ASCII.
    if lower.len() != text.len() {
        return None;
    }
    let start = lower.find(&query.to_lowercase())?;
    let end = start + query.len();
    (text.is_char_boundary(start) && text.is_char_boundary(end)).then_some((start, end))
}
