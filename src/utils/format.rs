//! Display formatting for sizes and bundle names.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a byte count with a binary unit, e.g. `1.5 MB`.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Strip the content hash a build appends to bundle file names.
///
/// `ui_assets_all_3f2a...e9.bundle` becomes `ui_assets_all.bundle`. Names
/// without a 32-digit hex suffix are returned unchanged.
#[must_use]
pub fn transform_bundle_name(name: &str) -> String {
    static HASH_SUFFIX: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"_[0-9a-fA-F]{32}(\.bundle)$").expect("static regex"));
    HASH_SUFFIX.replace(name, "$1").into_owned()
}

/// Truncate a string with ellipsis, using Unicode display width.
#[must_use]
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let (budget, ellipsis) = if max_width > 3 {
        (max_width - 3, "...")
    } else {
        (max_width, "")
    };
    let mut width = 0;
    let mut truncated: String = s
        .chars()
        .take_while(|ch| {
            let w = ch.width().unwrap_or(0);
            if width + w > budget {
                return false;
            }
            width += w;
            true
        })
        .collect();
    truncated.push_str(ellipsis);
    truncated
}

/// Truncate or right-pad `s` to exactly `width` display columns.
#[must_use]
pub fn fit_width(s: &str, width: usize) -> String {
    let mut fitted = truncate_str(s, width);
    let used = fitted.width();
    fitted.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    fitted
}
