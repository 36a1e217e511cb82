//! Centralized theme and color scheme for the TUI.

use crate::views::ViewKind;
use ratatui::prelude::*;
use std::sync::{PoisonError, RwLock};

/// Semantic colors for the inspector UI.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub background_alt: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,
    pub warning: Color,

    // Row kinds
    pub foldout: Color,
    pub category: Color,
    pub size: Color,

    pub search_highlight_bg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Dark theme (default)
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            background_alt: Color::Rgb(28, 30, 38),
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::Rgb(52, 58, 84),
            warning: Color::Yellow,
            foldout: Color::Cyan,
            category: Color::Magenta,
            size: Color::Green,
            search_highlight_bg: Color::Rgb(96, 76, 0),
        }
    }

    /// Light theme
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(0, 92, 140),
            accent: Color::Rgb(170, 120, 0),
            muted: Color::Rgb(150, 150, 150),
            border: Color::Rgb(190, 190, 196),
            border_focused: Color::Rgb(0, 92, 140),
            background_alt: Color::Rgb(236, 238, 244),
            text: Color::Rgb(24, 24, 28),
            text_muted: Color::Rgb(96, 96, 104),
            selection: Color::Rgb(204, 222, 244),
            warning: Color::Rgb(170, 120, 0),
            foldout: Color::Rgb(0, 92, 140),
            category: Color::Rgb(120, 40, 140),
            size: Color::Rgb(20, 120, 40),
            search_highlight_bg: Color::Rgb(252, 226, 140),
        }
    }

    /// High contrast theme (accessibility)
    pub const fn high_contrast() -> Self {
        Self {
            primary: Color::LightCyan,
            accent: Color::LightYellow,
            muted: Color::Gray,
            border: Color::White,
            border_focused: Color::LightCyan,
            background_alt: Color::Rgb(16, 16, 16),
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::Blue,
            warning: Color::LightYellow,
            foldout: Color::LightCyan,
            category: Color::LightMagenta,
            size: Color::LightGreen,
            search_highlight_bg: Color::Rgb(128, 104, 0),
        }
    }
}

/// Global theme instance (runtime switchable)
static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            colors: ColorScheme::dark(),
            name: "dark",
        }
    }

    pub const fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    pub const fn high_contrast() -> Self {
        Self {
            colors: ColorScheme::high_contrast(),
            name: "high-contrast",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "high-contrast" | "highcontrast" | "hc" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }

    /// Get the next theme in the rotation
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            "light" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}

/// Set the current theme
pub fn set_theme(theme: Theme) {
    *THEME.write().unwrap_or_else(PoisonError::into_inner) = theme;
}

/// Toggle to the next theme in rotation (dark -> light -> high-contrast -> dark)
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().unwrap_or_else(PoisonError::into_inner);
    *theme = theme.next();
    theme.name
}

/// Convenience function to get current colors
pub fn colors() -> ColorScheme {
    THEME.read().unwrap_or_else(PoisonError::into_inner).colors
}

// ============================================================================
// Style Helpers
// ============================================================================

/// Common style presets for consistent UI elements
pub struct Styles;

impl Styles {
    pub fn header_title() -> Style {
        Style::default().fg(colors().primary).bold()
    }

    pub fn section_title() -> Style {
        Style::default().fg(colors().primary).bold()
    }

    pub fn text() -> Style {
        Style::default().fg(colors().text)
    }

    pub fn text_muted() -> Style {
        Style::default().fg(colors().text_muted)
    }

    /// Selected row
    pub fn selected() -> Style {
        Style::default()
            .bg(colors().selection)
            .fg(colors().text)
            .bold()
    }

    pub fn border() -> Style {
        Style::default().fg(colors().border)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors().border_focused)
    }

    pub fn status_bar() -> Style {
        Style::default().bg(colors().background_alt)
    }

    pub fn shortcut_key() -> Style {
        Style::default().fg(colors().accent)
    }

    pub fn shortcut_desc() -> Style {
        Style::default().fg(colors().text_muted)
    }

    /// Column header, bold when it is the sort column
    pub fn column_header(sorted: bool) -> Style {
        let style = Style::default().fg(colors().primary);
        if sorted { style.bold().underlined() } else { style }
    }

    pub fn foldout() -> Style {
        Style::default().fg(colors().foldout)
    }

    /// Grouping rows such as "Internal References"
    pub fn category() -> Style {
        Style::default().fg(colors().category).italic()
    }

    pub fn size() -> Style {
        Style::default().fg(colors().size)
    }

    pub fn warning() -> Style {
        Style::default().fg(colors().warning)
    }
}

// ============================================================================
// Footer Hints
// ============================================================================

/// View-specific footer hints
pub struct FooterHints;

impl FooterHints {
    /// Hints for one view, followed by the global ones
    pub fn for_view(kind: ViewKind) -> Vec<(&'static str, &'static str)> {
        let mut hints = Self::global();
        let specific: &[(&str, &str)] = match kind {
            ViewKind::Bundles => &[("Enter", "open asset")],
            ViewKind::Groups => &[("Enter", "open bundle")],
            ViewKind::Assets => &[("Enter", "follow reference")],
        };
        for (i, hint) in specific.iter().enumerate() {
            hints.insert(i, *hint);
        }
        hints
    }

    /// Global hints (always shown)
    pub fn global() -> Vec<(&'static str, &'static str)> {
        vec![
            ("Tab", "switch"),
            ("↑↓/jk", "navigate"),
            ("←→", "fold"),
            ("1-9", "sort"),
            ("/", "search"),
            ("Bksp", "back"),
            ("?", "help"),
            ("q", "quit"),
        ]
    }
}

/// Render footer hints as spans
pub fn render_footer_hints(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(format!("[{key}]"), Styles::shortcut_key()));
        spans.push(Span::styled((*desc).to_string(), Styles::shortcut_desc()));
    }

    spans
}
