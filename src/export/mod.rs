//! Export serializers and file handling.
//!
//! This module turns a [`QueryResult`](crate::models::QueryResult) into a
//! downloadable artifact:
//! - CSV generation with type-preserving cell conversion
//! - JSON generation with optional metadata envelope
//! - Filesystem-safe filename generation
//! - File save with byte-accurate size reporting
//! - Shared pre-export validation

use crate::models::{QueryResult, Severity, ValidationIssue, ValidationReport, ValidationWarning};
use std::collections::HashSet;

pub mod csv;
pub mod filename;
pub mod json;
pub mod save;

pub use self::csv::export_to_csv;
pub use filename::{
    format_timestamp, generate_filename, generate_safe_filename, is_reserved_windows_name,
    sanitize_filename,
};
pub use json::{export_to_json, export_to_minimal_json};
pub use save::{format_file_size, is_save_supported, save_to_file};

/// Validate a query result before CSV export.
///
/// Errors block the export; warnings do not.
pub fn validate_for_csv_export(result: &QueryResult) -> ValidationReport {
    validate_result(result)
}

/// Validate a query result before JSON export. Same checks as CSV.
pub fn validate_for_json_export(result: &QueryResult) -> ValidationReport {
    validate_result(result)
}

fn validate_result(result: &QueryResult) -> ValidationReport {
    let mut report = ValidationReport::default();

    if result.columns.is_empty() {
        report.errors.push(ValidationIssue::new(
            "NO_COLUMNS",
            "No columns defined in query results",
        ));
    }

    if result.row_count != result.rows.len() {
        report.warnings.push(ValidationWarning::new(
            "ROW_COUNT_MISMATCH",
            format!(
                "Declared row count is {} but {} rows are present",
                result.row_count,
                result.rows.len()
            ),
            Severity::Medium,
        ));
    }

    let mut seen = HashSet::new();
    let mut duplicates: Vec<&str> = Vec::new();
    for column in &result.columns {
        if !seen.insert(column.name.as_str()) && !duplicates.contains(&column.name.as_str()) {
            duplicates.push(column.name.as_str());
        }
    }
    if !duplicates.is_empty() {
        report.warnings.push(ValidationWarning::new(
            "DUPLICATE_COLUMNS",
            format!("Duplicate column names: {}", duplicates.join(", ")),
            Severity::High,
        ));
    }

    report
}
