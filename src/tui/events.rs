//! Event polling and key/mouse dispatch for the inspector.

use super::app::InspectorApp;
use super::state::ListNavigation;
use super::theme::toggle_theme;
use crate::config::TuiPreferences;
use crate::views::ViewKind;
use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Application event
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Nothing happened within one tick
    Tick,
    Resize(u16, u16),
}

/// Event handler
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub const fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event
    pub fn next(&self) -> Result<Event, std::io::Error> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Mouse(mouse) => Ok(Event::Mouse(mouse)),
                CrosstermEvent::Resize(width, height) => Ok(Event::Resize(width, height)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

/// Handle key events and update app state
pub fn handle_key_event(app: &mut InspectorApp, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    app.status_message.clear();

    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.search.active {
        handle_search_key(app, key);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),

        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(ListNavigation::select_prev),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(ListNavigation::select_next),
        KeyCode::PageUp => app.move_cursor(ListNavigation::page_up),
        KeyCode::PageDown => app.move_cursor(ListNavigation::page_down),
        KeyCode::Home | KeyCode::Char('g') => app.move_cursor(ListNavigation::go_first),
        KeyCode::End | KeyCode::Char('G') => app.move_cursor(ListNavigation::go_last),

        KeyCode::Right | KeyCode::Char('l') => app.expand_current(),
        KeyCode::Left | KeyCode::Char('h') => app.collapse_current(),
        KeyCode::Char(' ') => app.toggle_current(),
        KeyCode::Char('e') => app.expand_all(),
        KeyCode::Char('c') => app.collapse_all(),
        KeyCode::Enter => app.activate_current(),

        KeyCode::Backspace if key.modifiers.contains(KeyModifiers::SHIFT) => app.go_forward(),
        KeyCode::Backspace | KeyCode::Char('[') => app.go_back(),
        KeyCode::Char(']') => app.go_forward(),

        KeyCode::Char(c @ '1'..='9') => {
            let column = c as usize - '1' as usize;
            app.sort_by_column(column);
        }
        KeyCode::Char('s') => app.cycle_sort_column(),

        KeyCode::Char('/') => app.start_search(),
        KeyCode::Esc => {
            if !app.active_view().search_query().is_empty() {
                app.clear_search();
            }
        }

        KeyCode::Char('b') => app.switch_to(ViewKind::Bundles),
        KeyCode::Char('p') => app.switch_to(ViewKind::Groups),
        KeyCode::Char('a') => app.switch_to(ViewKind::Assets),

        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('t') => {
            let name = toggle_theme();
            let prefs = TuiPreferences {
                theme: name.to_string(),
            };
            if let Err(err) = prefs.save() {
                tracing::warn!(error = %err, "failed to save theme preference");
            }
            app.status_message.set(format!("Theme: {name}"));
        }
        KeyCode::Char('R') | KeyCode::F(5) => {
            if let Err(err) = app.reload() {
                tracing::warn!(error = %err, "reload failed");
                app.status_message.set(format!("Reload failed: {err}"));
            }
        }
        _ => {}
    }
}

fn handle_search_key(app: &mut InspectorApp, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter => app.search.stop(),
        KeyCode::Up => app.move_cursor(ListNavigation::select_prev),
        KeyCode::Down => app.move_cursor(ListNavigation::select_next),
        KeyCode::Backspace => {
            app.search.pop_char();
            app.apply_search();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search.push_char(c);
            app.apply_search();
        }
        _ => {}
    }
}

/// Handle mouse events against the last drawn table.
pub fn handle_mouse_event(app: &mut InspectorApp, mouse: MouseEvent) {
    if !app.mouse_enabled {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollUp => app.move_cursor(ListNavigation::select_prev),
        MouseEventKind::ScrollDown => app.move_cursor(ListNavigation::select_next),
        MouseEventKind::Down(MouseButton::Left) => {
            app.status_message.clear();
            if app.show_help {
                app.show_help = false;
                return;
            }

            let (x, y) = (mouse.column, mouse.row);
            let geometry = &app.geometry;
            if y == geometry.header_y {
                if let Some(column) = geometry.column_at(x) {
                    app.sort_by_column(column);
                }
                return;
            }

            let body = geometry.body;
            if (body.y..body.y + body.height).contains(&y) {
                let row = app.cursor().scroll_offset + usize::from(y - body.y);
                app.select_row(row);
            }
        }
        _ => {}
    }
}
