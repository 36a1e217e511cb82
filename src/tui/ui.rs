//! Terminal setup, main loop and rendering for the inspector.

use super::app::InspectorApp;
use super::events::{Event, EventHandler, handle_key_event, handle_mouse_event};
use super::theme::{FooterHints, Styles, Theme, colors, render_footer_hints, set_theme};
use super::widgets::{self, TreeTable, fits_terminal, render_size_warning};
use crate::config::TuiPreferences;
use crate::error::{LayoutError, Result};
use crate::views::ViewKind;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
};
use std::io::stdout;

/// Theme to start with: an explicit config choice wins over the saved
/// preference.
fn initial_theme(configured: &str) -> Theme {
    if configured == Theme::dark().name {
        Theme::from_name(&TuiPreferences::load().theme)
    } else {
        Theme::from_name(configured)
    }
}

/// Run the inspector until the user quits.
pub fn run_inspector_tui(app: &mut InspectorApp, configured_theme: &str) -> Result<()> {
    set_theme(initial_theme(configured_theme));

    enable_raw_mode().map_err(|e| LayoutError::terminal(format!("cannot enter raw mode: {e}")))?;
    let mut stdout = stdout();
    if app.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = event_loop(&mut terminal, app);

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    if app.mouse_enabled {
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    outcome
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut InspectorApp) -> Result<()> {
    let events = EventHandler::new(app.tick_rate);
    tracing::debug!(view = %app.active_kind(), "inspector started");

    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Mouse(mouse) => handle_mouse_event(app, mouse),
            Event::Resize(_, _) | Event::Tick => {}
        }
        app.drain_selection_events();

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Main render function.
pub fn render(frame: &mut Frame, app: &mut InspectorApp) {
    let area = frame.area();

    if !fits_terminal(area) {
        render_size_warning(frame, area);
        return;
    }

    let show_search = app.search.active || !app.active_view().search_query().is_empty();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(u16::from(show_search)),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app.active_kind());
    render_table(frame, chunks[2], app);
    if show_search {
        render_search(frame, chunks[3], app);
    }
    render_status_bar(frame, chunks[4], app);
    render_footer(frame, chunks[5], app);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &InspectorApp) {
    let source = app
        .source
        .as_ref()
        .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
    let line = Line::from(vec![
        Span::styled(" Layout Explorer ", Styles::header_title()),
        Span::styled(source, Styles::text_muted()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, active: ViewKind) {
    let titles: Vec<Line> = ViewKind::ALL.iter().map(|k| Line::from(k.title())).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors().border)),
        )
        .highlight_style(Style::default().fg(colors().accent).bold())
        .select(active.index())
        .divider(Span::styled(" │ ", Style::default().fg(colors().muted)));
    frame.render_widget(tabs, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut InspectorApp) {
    // Border top and bottom plus the header line.
    let body_height = usize::from(area.height.saturating_sub(3));
    app.cursor_mut().ensure_visible(body_height);

    let geometry = TreeTable::new(app.active_view(), app.cursor())
        .focused(!app.search.active)
        .render(frame, area);
    app.geometry = geometry;
}

fn render_search(frame: &mut Frame, area: Rect, app: &InspectorApp) {
    let view = app.active_view();
    let query = if app.search.active {
        app.search.query.as_str()
    } else {
        view.search_query()
    };
    let mut spans = vec![
        Span::styled(" Search: ", Styles::shortcut_key()),
        Span::styled(query.to_string(), Styles::text()),
    ];
    if app.search.active {
        spans.push(Span::styled("▏", Styles::foldout()));
    }
    let matches = view.rows().iter().filter(|r| !view.is_placeholder(r.id)).count();
    spans.push(Span::styled(format!("  {matches} matches"), Styles::text_muted()));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &InspectorApp) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.active_view().status()),
        Styles::text(),
    )];
    if let Some(note) = app.selection_note() {
        spans.push(Span::styled("│ ", Styles::text_muted()));
        spans.push(Span::styled(note.to_string(), Styles::size()));
        spans.push(Span::raw(" "));
    }
    if app.history.can_go_back() {
        spans.push(Span::styled("│ ", Styles::text_muted()));
        spans.push(Span::styled(
            format!("{} > {}", app.history.trail(), app.active_kind().title()),
            Styles::text_muted(),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Styles::status_bar()),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, app: &mut InspectorApp) {
    let line = match app.status_message.message() {
        Some(message) => Line::styled(format!(" {message}"), Styles::warning()),
        None if app.search.active => Line::from(render_footer_hints(&[
            ("Enter", "keep"),
            ("Esc", "clear"),
            ("↑↓", "move"),
        ])),
        None => Line::from(render_footer_hints(&FooterHints::for_view(app.active_kind()))),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<15}"), Style::default().fg(colors().accent)),
        Span::styled(desc, Style::default().fg(colors().text)),
    ])
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = widgets::centered_rect(65, 80, area);
    frame.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(colors().primary).bold()))
    };
    let help_text = vec![
        Line::styled(
            "━━━ Layout Explorer Help ━━━",
            Style::default().fg(colors().accent).bold(),
        ),
        Line::from(""),
        section("Navigation"),
        help_line("Tab/Shift+Tab", "Next / previous view"),
        help_line("b / p / a", "Bundles / Groups / Assets view"),
        help_line("↑/↓ or j/k", "Move up/down"),
        help_line("PgUp/PgDn", "Move a page"),
        help_line("Home/End", "First / last row"),
        help_line("Enter", "Open the object in its own view"),
        help_line("Bksp / [", "Go back"),
        help_line("]", "Go forward"),
        Line::from(""),
        section("Tree"),
        help_line("→/l  ←/h", "Expand / collapse or go to parent"),
        help_line("Space", "Toggle expansion"),
        help_line("e / c", "Expand all / collapse all"),
        help_line("1-9", "Sort by column (again to reverse)"),
        help_line("s", "Next sort column"),
        Line::from(""),
        section("Search"),
        help_line("/", "Search names in this view"),
        help_line("Esc", "Clear search"),
        Line::from(""),
        section("Other"),
        help_line("t", "Cycle theme"),
        help_line("R / F5", "Reload layout file"),
        help_line("q", "Quit"),
        Line::from(""),
        Line::styled(
            "Press any key to close",
            Style::default().fg(colors().text_muted),
        ),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Styles::border_focused()),
    );
    frame.render_widget(paragraph, popup_area);
}
