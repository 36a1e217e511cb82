//! Custom widgets for the inspector.

mod tree_table;

pub use tree_table::{TreeTable, column_widths};

use crate::tui::constants::{MIN_HEIGHT, MIN_WIDTH};
use crate::tui::theme::colors;
use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// A rect of the given percentages of `area`, centered in it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [band] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(band);
    popup
}

/// Whether the table, status bar and footer all fit in `area`.
pub const fn fits_terminal(area: Rect) -> bool {
    area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT
}

/// Shown instead of the inspector when the terminal is too small.
pub fn render_size_warning(frame: &mut ratatui::Frame, area: Rect) {
    let scheme = colors();
    let lines = vec![
        Line::styled("Terminal too small", Style::default().fg(scheme.warning).bold()),
        Line::from(vec![
            Span::styled(
                format!("{}x{}", area.width, area.height),
                Style::default().fg(scheme.text),
            ),
            Span::styled(" of ", Style::default().fg(scheme.text_muted)),
            Span::styled(
                format!("{MIN_WIDTH}x{MIN_HEIGHT}"),
                Style::default().fg(scheme.accent),
            ),
        ]),
    ];

    let [middle] = Layout::vertical([Constraint::Length(4)])
        .flex(Flex::Center)
        .areas(area);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(scheme.warning)),
        )
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, middle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, outer);
        assert_eq!(inner.width, 60);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 20);
    }

    #[test]
    fn test_fits_terminal() {
        assert!(fits_terminal(Rect::new(0, 0, MIN_WIDTH, MIN_HEIGHT)));
        assert!(!fits_terminal(Rect::new(0, 0, MIN_WIDTH, MIN_HEIGHT - 1)));
        assert!(!fits_terminal(Rect::new(0, 0, 10, 40)));
    }
}
