//! Unified diff between two rendered configurations.

use similar::TextDiff;

/// Header naming the legacy side of a diff
pub const FROM_LABEL: &str = "daapi-v0";

/// Header naming the current side of a diff
pub const TO_LABEL: &str = "daapi-v1";

/// Line-oriented unified diff of `from` → `to` without context lines
pub fn unified_diff(from: &str, to: &str) -> String {
    TextDiff::from_lines(from, to)
        .unified_diff()
        .context_radius(0)
        .header(FROM_LABEL, TO_LABEL)
        .to_string()
}
