//! CLI command handlers.
//!
//! Each handler implements the logic of one subcommand and returns the
//! process exit code; `main.rs` only parses arguments and dispatches.

mod summary;
mod tree;
mod view;

pub use summary::run_summary;
pub use tree::{TreeOptions, run_tree};
pub use view::run_view;

use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Process exit codes
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// A search was given and nothing matched
    pub const NO_MATCHES: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

/// Output destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }

    /// Check if output is to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Determine if color should be used based on flags and environment
#[must_use]
pub fn should_use_color(no_color_flag: bool, target: &OutputTarget) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none() && target.is_terminal()
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            println!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
            Ok(())
        }
    }
}
