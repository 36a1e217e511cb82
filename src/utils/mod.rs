//! Shared utilities.

mod format;

pub use format::{fit_width, format_bytes, transform_bundle_name, truncate_str};
