//! Configuration file loading and discovery.

use super::types::AppConfig;
use crate::reports::ReportFormat;
use crate::views::ViewKind;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".layout-explorer.yaml",
    ".layout-explorer.yml",
    "layout-explorer.yaml",
    "layout-explorer.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/layout-explorer/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(git_root) = find_git_root()
        && let Some(path) = find_config_in_dir(&git_root)
    {
        return Some(path);
    }

    if let Some(config_dir) = dirs::config_dir()
        && let Some(path) = find_config_in_dir(&config_dir.join("layout-explorer"))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    cwd.ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence
    /// wherever it differs from the defaults.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        if other.tui.theme != defaults.tui.theme {
            self.tui.theme.clone_from(&other.tui.theme);
        }
        if !other.tui.mouse_enabled {
            self.tui.mouse_enabled = false;
        }
        if other.tui.tick_rate_ms != defaults.tui.tick_rate_ms {
            self.tui.tick_rate_ms = other.tui.tick_rate_ms;
        }
        if other.tui.page_size != defaults.tui.page_size {
            self.tui.page_size = other.tui.page_size;
        }

        if other.views.default_view != ViewKind::default() {
            self.views.default_view = other.views.default_view;
        }
        for view in ViewKind::ALL {
            let theirs = *other.views.sort_config(view);
            let ours = self.views.sort_config_mut(view);
            if theirs.column.is_some() {
                ours.column = theirs.column;
            }
            if theirs.ascending.is_some() {
                ours.ascending = theirs.ascending;
            }
        }

        if other.output.format != ReportFormat::default() {
            self.output.format = other.output.format;
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# Layout Explorer Configuration
# Place this file at .layout-explorer.yaml in your project root or ~/.config/layout-explorer/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# Layout Explorer Configuration File
# ===================================
#
# Place it at:
#   - .layout-explorer.yaml in your project root
#   - ~/.config/layout-explorer/layout-explorer.yaml for global config
#
# CLI arguments always override file settings.

# Terminal UI
tui:
  # Theme: dark, light, high-contrast
  theme: dark
  mouse_enabled: true
  # Event poll interval (10-5000 ms)
  tick_rate_ms: 250
  # Rows moved by PageUp/PageDown
  page_size: 10

# Views
views:
  # View shown first: bundles, groups, assets
  default_view: bundles
  # Per-view sort override. Columns are zero-based; omit `ascending`
  # to use the column's natural direction.
  # bundles:
  #   column: 1
  #   ascending: false
  bundles: {}
  groups: {}
  assets: {}

# Non-interactive output (tree, summary)
output:
  # Format: table, json
  format: table
  no_color: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
