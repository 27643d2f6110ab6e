//! Filename generation.
//!
//! Builds filesystem-safe export filenames from an optional database/table
//! context plus a compact UTC timestamp, and guards against Windows
//! reserved device names.

use crate::models::{ExportFormat, FilenameContext};
use chrono::{DateTime, Utc};

/// Hard cap on a sanitized name, in characters.
pub const MAX_SANITIZED_LEN: usize = 100;

/// Stem used when neither database nor table context is available.
const DEFAULT_STEM: &str = "query_results";

/// Stands in when sanitization consumes the entire name, and prefixes the
/// regenerated name when the normal one collides with a reserved device name.
const EMPTY_NAME_FALLBACK: &str = "export";

/// Characters Windows refuses in filenames.
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Device names Windows reserves regardless of extension.
const RESERVED_WINDOWS_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Make a name safe for use as a filename component.
///
/// Replaces illegal characters and C0 controls with `_`, collapses
/// whitespace runs to a single `_`, trims leading and trailing dots and
/// underscores, caps the length, and falls back to `"export"` when nothing
/// survives. The steps run in that order.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if ILLEGAL_CHARS.contains(&c) || (c as u32) < 0x20 {
                '_'
            } else {
                c
            }
        })
        .collect();

    let mut collapsed = String::with_capacity(replaced.len());
    let mut in_whitespace = false;
    for c in replaced.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                collapsed.push('_');
                in_whitespace = true;
            }
        } else {
            collapsed.push(c);
            in_whitespace = false;
        }
    }

    let trimmed = collapsed.trim_matches(|c| c == '.' || c == '_');
    let truncated: String = trimmed.chars().take(MAX_SANITIZED_LEN).collect();
    if truncated.is_empty() {
        EMPTY_NAME_FALLBACK.to_string()
    } else {
        truncated
    }
}

/// Render a timestamp in the compact filename form `YYYY-MM-DD_HH-mm-ss`,
/// UTC.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Build an export filename from the context.
///
/// Present, non-empty database and table names are sanitized and joined
/// with `_`; with neither, the stem is `query_results`. The compact
/// timestamp and the format extension always follow.
pub fn generate_filename(context: &FilenameContext, format: ExportFormat) -> String {
    let timestamp = format_timestamp(&context.timestamp.unwrap_or_else(Utc::now));
    let mut parts: Vec<String> = Vec::new();
    if let Some(database) = non_empty(&context.database) {
        parts.push(sanitize_filename(database));
    }
    if let Some(table) = non_empty(&context.table) {
        parts.push(sanitize_filename(table));
    }
    if parts.is_empty() {
        parts.push(DEFAULT_STEM.to_string());
    }
    parts.push(timestamp);
    format!("{}.{}", parts.join("_"), format.extension())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Check whether the text before the first `.` is a reserved Windows device
/// name. Case-insensitive, so both `con` and `CON.csv` match.
pub fn is_reserved_windows_name(name: &str) -> bool {
    let base = name.split('.').next().unwrap_or(name);
    RESERVED_WINDOWS_NAMES
        .iter()
        .any(|reserved| base.eq_ignore_ascii_case(reserved))
}

/// Build an export filename, regenerating when the result would start with
/// a reserved device name.
///
/// The regenerated name is `export_{timestamp}.{ext}` with a fresh "now"
/// timestamp rather than the context's.
pub fn generate_safe_filename(context: &FilenameContext, format: ExportFormat) -> String {
    let filename = generate_filename(context, format);
    if is_reserved_windows_name(&filename) {
        return format!(
            "{}_{}.{}",
            EMPTY_NAME_FALLBACK,
            format_timestamp(&Utc::now()),
            format.extension()
        );
    }
    filename
}
