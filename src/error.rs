//! Unified error types for layout-explorer.
//!
//! The tree engine itself never fails: malformed input is dropped during the
//! build and stale ids resolve to "not found". The errors here cover the
//! fallible edges around it: reading layout files, writing reports and
//! driving the terminal. Configuration problems are reported separately as
//! [`ConfigError`](crate::config::ConfigError) lists.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for layout-explorer operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LayoutError {
    /// Errors while reading a build layout report
    #[error("Failed to parse build layout: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while writing reports
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Terminal setup or drawing failed
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} in {context}")]
    MissingField { field: String, context: String },

    #[error("File is {size_mb} MB, exceeding the {limit_mb} MB limit")]
    TooLarge { size_mb: u64, limit_mb: u64 },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for layout-explorer operations
pub type Result<T> = std::result::Result<T, LayoutError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl LayoutError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a parse error for a missing field
    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        Self::parse(
            "missing required field",
            ParseErrorKind::MissingField {
                field: field.into(),
                context: context.into(),
            },
        )
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create a terminal error
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for LayoutError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outward, so a failure deep in the parser reads as
/// `"loading layout: linking bundles: missing required field"`.
///
/// # Example
///
/// ```ignore
/// use layout_explorer::error::ErrorContext;
///
/// fn load(path: &Path) -> Result<BuildLayout> {
///     let content = std::fs::read_to_string(path)
///         .with_context(|| format!("reading {}", path.display()))?;
///     parse_layout_str(&content).context("parsing layout")
/// }
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<LayoutError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: LayoutError, new_ctx: &str) -> LayoutError {
    match err {
        LayoutError::Parse {
            context: existing,
            source,
        } => LayoutError::Parse {
            context: chain_context(new_ctx, &existing),
            source,
        },
        LayoutError::Report {
            context: existing,
            source,
        } => LayoutError::Report {
            context: chain_context(new_ctx, &existing),
            source,
        },
        LayoutError::Io {
            path,
            message,
            source,
        } => LayoutError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        LayoutError::Terminal(msg) => LayoutError::Terminal(chain_context(new_ctx, &msg)),
    }
}

/// Join `new` in front of `existing`, skipping the separator when `existing` is empty.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
