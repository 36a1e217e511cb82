//! Configuration types for layout-explorer.
//!
//! Everything here is plain data with `#[serde(default)]`, so a config file
//! only needs to name the settings it changes.

use crate::reports::ReportFormat;
use crate::tree::SortSpec;
use crate::views::{ViewKind, columns_of};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Names accepted for `tui.theme`.
pub const THEME_NAMES: &[&str] = &["dark", "light", "high-contrast"];

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a config file and layered with CLI
/// flags (CLI wins).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Terminal UI settings
    pub tui: TuiConfig,
    /// Initial view and per-view sort order
    pub views: ViewsConfig,
    /// Non-interactive output settings
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the TUI theme.
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.tui.theme = theme.into();
        self
    }

    /// Enable or disable mouse capture in the TUI.
    pub const fn mouse_enabled(mut self, enabled: bool) -> Self {
        self.config.tui.mouse_enabled = enabled;
        self
    }

    /// Set the view shown first.
    pub const fn default_view(mut self, view: ViewKind) -> Self {
        self.config.views.default_view = view;
        self
    }

    /// Override the sort order of one view.
    pub const fn view_sort(mut self, view: ViewKind, column: usize, ascending: bool) -> Self {
        *self.config.views.sort_config_mut(view) = ViewSortConfig {
            column: Some(column),
            ascending: Some(ascending),
        };
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// TUI Preferences (persisted)
// ============================================================================

/// Preferences remembered between TUI sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuiPreferences {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
}

impl Default for TuiPreferences {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

impl TuiPreferences {
    /// Get the path to the preferences file.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("layout-explorer").join("preferences.json"))
    }

    /// Load preferences from disk, or return defaults if not found.
    #[must_use]
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save preferences to disk.
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }
}

// ============================================================================
// TUI Configuration
// ============================================================================

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
    /// Enable mouse support
    pub mouse_enabled: bool,
    /// Event poll interval in milliseconds
    #[schemars(range(min = 10, max = 5000))]
    pub tick_rate_ms: u64,
    /// Rows moved by PageUp/PageDown
    #[schemars(range(min = 1))]
    pub page_size: usize,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mouse_enabled: true,
            tick_rate_ms: 250,
            page_size: 10,
        }
    }
}

// ============================================================================
// View Configuration
// ============================================================================

/// Initial view and per-view sort overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ViewsConfig {
    /// View shown when the TUI opens
    pub default_view: ViewKind,
    /// Sort override for the bundles view
    pub bundles: ViewSortConfig,
    /// Sort override for the groups view
    pub groups: ViewSortConfig,
    /// Sort override for the assets view
    pub assets: ViewSortConfig,
}

impl ViewsConfig {
    #[must_use]
    pub const fn sort_config(&self, view: ViewKind) -> &ViewSortConfig {
        match view {
            ViewKind::Bundles => &self.bundles,
            ViewKind::Groups => &self.groups,
            ViewKind::Assets => &self.assets,
        }
    }

    pub const fn sort_config_mut(&mut self, view: ViewKind) -> &mut ViewSortConfig {
        match view {
            ViewKind::Bundles => &mut self.bundles,
            ViewKind::Groups => &mut self.groups,
            ViewKind::Assets => &mut self.assets,
        }
    }

    /// Sort order to open `view` with, or `None` for the view's default.
    ///
    /// A column set without a direction takes that column's natural
    /// direction.
    #[must_use]
    pub fn sort_for(&self, view: ViewKind) -> Option<SortSpec> {
        let entry = self.sort_config(view);
        let column = entry.column?;
        let natural = columns_of(view)
            .get(column)
            .is_none_or(|c| c.default_sort_ascending);
        Some(SortSpec::new(column, entry.ascending.unwrap_or(natural)))
    }
}

/// Sort override for one view. Unset fields keep the view's default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ViewSortConfig {
    /// Zero-based sort column
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// Sort direction; omitted means the column's natural direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascending: Option<bool>,
}

// ============================================================================
// Output Configuration
// ============================================================================

/// Settings for the non-interactive `tree` and `summary` commands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: table or json
    pub format: ReportFormat,
    /// Disable colored output
    pub no_color: bool,
}
