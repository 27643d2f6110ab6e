//! Error types for the export pipeline.
//!
//! This module defines all error types using `thiserror`. Each error carries
//! a stable code for structured logging and, where a remedy exists, an
//! actionable suggestion.

use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Export failed: {message}")]
    ExportFailed { message: String },

    #[error("Invalid data format: {message}")]
    InvalidData { message: String },

    #[error("Export already in progress")]
    ExportInProgress,

    #[error("Permission denied saving {path}: {source}")]
    PermissionDenied { path: String, source: io::Error },

    #[error("Insufficient disk space writing {path}")]
    DiskFull { path: String },

    #[error("Failed to save {path}: {source}")]
    Save { path: String, source: io::Error },

    #[error("CSV generation failed: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("JSON serialization failed: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    #[error("Unsupported export format: {value}")]
    UnsupportedFormat { value: String },
}

impl ExportError {
    /// Create a generic export failure.
    pub fn export_failed(message: impl Into<String>) -> Self {
        Self::ExportFailed {
            message: message.into(),
        }
    }

    /// Create an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create an unsupported format error.
    pub fn unsupported_format(value: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            value: value.into(),
        }
    }

    /// Classify a filesystem error from a save attempt.
    pub fn save(path: &Path, source: io::Error) -> Self {
        let path = path.display().to_string();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            io::ErrorKind::StorageFull => Self::DiskFull { path },
            _ => Self::Save { path, source },
        }
    }

    /// Stable error code for programmatic handling and structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExportFailed { .. } | Self::Save { .. } | Self::Csv { .. } | Self::Json { .. } => {
                "EXPORT_FAILED"
            }
            Self::InvalidData { .. } | Self::UnsupportedFormat { .. } => "INVALID_DATA_FORMAT",
            Self::ExportInProgress => "EXPORT_IN_PROGRESS",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::DiskFull { .. } => "DISK_SPACE_FULL",
        }
    }

    /// Get the suggestion for this error, if one exists.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::PermissionDenied { .. } => Some("Check permissions on the output directory"),
            Self::DiskFull { .. } => Some("Free up disk space and try again"),
            Self::ExportInProgress => Some("Wait for the current export to finish"),
            Self::UnsupportedFormat { .. } => Some("Supported formats: csv, json"),
            _ => None,
        }
    }
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
