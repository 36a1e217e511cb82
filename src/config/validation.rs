//! Configuration validation for layout-explorer.

use super::types::{AppConfig, THEME_NAMES, TuiConfig, ViewsConfig};
use crate::views::{ViewKind, columns_of};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.tui.validate());
        errors.extend(self.views.validate());
        errors
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !THEME_NAMES.contains(&self.theme.as_str()) {
            errors.push(ConfigError {
                field: "tui.theme".to_string(),
                message: format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    THEME_NAMES.join(", ")
                ),
            });
        }

        if !(10..=5000).contains(&self.tick_rate_ms) {
            errors.push(ConfigError {
                field: "tui.tick_rate_ms".to_string(),
                message: format!(
                    "Tick rate must be between 10 and 5000 ms, got {}",
                    self.tick_rate_ms
                ),
            });
        }

        if self.page_size == 0 {
            errors.push(ConfigError {
                field: "tui.page_size".to_string(),
                message: "Page size must be at least 1".to_string(),
            });
        }

        errors
    }
}

impl Validatable for ViewsConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        for view in ViewKind::ALL {
            let Some(column) = self.sort_config(view).column else {
                continue;
            };
            let count = columns_of(view).len();
            if column >= count {
                errors.push(ConfigError {
                    field: format!("views.{view}.column"),
                    message: format!(
                        "Sort column {column} is out of range; the {} view has {count} columns",
                        view.title()
                    ),
                });
            }
        }
        errors
    }
}
