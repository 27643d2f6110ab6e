//! Data models for the export pipeline.
//!
//! This module re-exports all model types used throughout the crate.

pub mod export;
pub mod query;

// Re-export commonly used types
pub use export::{
    CsvOptions, DEFAULT_CSV_DELIMITER, DEFAULT_JSON_INDENT, ExportFormat, ExportOutcome,
    FilenameContext, JsonOptions, LineEnding, SavedFile, Severity, ValidationIssue,
    ValidationReport, ValidationWarning,
};
pub use query::{CellValue, ColumnMetadata, QueryResult, Row};
