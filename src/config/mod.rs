//! Configuration for layout-explorer.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use layout_explorer::config::{AppConfig, ViewKind};
//!
//! let config = AppConfig::builder()
//!     .theme("light")
//!     .default_view(ViewKind::Groups)
//!     .build();
//!
//! use layout_explorer::config::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.layout-explorer.yaml` file in your project root or
//! `~/.config/layout-explorer/`:
//!
//! ```yaml
//! tui:
//!   theme: light
//! views:
//!   default_view: assets
//!   bundles:
//!     column: 0
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{
    AppConfig, AppConfigBuilder, OutputConfig, THEME_NAMES, TuiConfig, TuiPreferences,
    ViewSortConfig, ViewsConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    ConfigFileError, discover_config_file, generate_example_config, generate_full_example_config,
    load_config_file, load_or_default,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and autocomplete
/// `.layout-explorer.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
