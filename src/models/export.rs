//! Export configuration and report types.
//!
//! This module defines the export formats, the per-format option sets with
//! their defaults, the filename generation context, and the structures
//! reported back after a save.

use crate::error::ExportError;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default JSON indentation width in spaces.
pub const DEFAULT_JSON_INDENT: usize = 2;

/// Default CSV field delimiter.
pub const DEFAULT_CSV_DELIMITER: u8 = b',';

/// Supported export formats. Adding a format means extending this enum and
/// both exporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma-separated values
    #[default]
    Csv,
    /// JSON document
    Json,
}

impl ExportFormat {
    /// Human-readable label for selection surfaces.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Csv => "CSV (Spreadsheet)",
            Self::Json => "JSON (Data Format)",
        }
    }

    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// MIME type of the produced content.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv;charset=utf-8",
            Self::Json => "application/json;charset=utf-8",
        }
    }

    /// One-line description of the format.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Csv => "Comma-separated values, compatible with Excel and Google Sheets",
            Self::Json => "JavaScript Object Notation, ideal for programmatic use",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim();
        if normalized.eq_ignore_ascii_case("csv") {
            Ok(Self::Csv)
        } else if normalized.eq_ignore_ascii_case("json") {
            Ok(Self::Json)
        } else {
            Err(ExportError::unsupported_format(s))
        }
    }
}

/// Record separator for CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\r\n`, the RFC 4180 default
    #[default]
    Crlf,
    /// `\n`
    Lf,
}

impl LineEnding {
    /// The literal separator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
        }
    }
}

/// CSV generation options.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvOptions {
    /// Include the header row with column names.
    pub include_headers: bool,
    /// Quote every field. Fields containing the delimiter, a quote, or a
    /// line break are quoted regardless of this flag.
    pub quote_all: bool,
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Record separator.
    pub line_ending: LineEnding,
    /// Prepend the UTF-8 byte-order mark so Excel detects the encoding.
    pub include_bom: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            include_headers: true,
            quote_all: false,
            delimiter: DEFAULT_CSV_DELIMITER,
            line_ending: LineEnding::Crlf,
            include_bom: true,
        }
    }
}

/// JSON generation options.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonOptions {
    /// Wrap the data in a `{metadata, data}` object.
    pub include_metadata: bool,
    /// Pretty-print with indentation.
    pub pretty_print: bool,
    /// Indentation width in spaces, used when pretty-printing.
    pub indent: usize,
    /// Render timestamp cells through the converter's millisecond-padded
    /// ISO-8601 form. When false, timestamps keep their native RFC 3339
    /// rendering; both forms are ISO-8601.
    pub stringify_dates: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            include_metadata: true,
            pretty_print: true,
            indent: DEFAULT_JSON_INDENT,
            stringify_dates: true,
        }
    }
}

/// Input to filename generation. No persisted identity; built fresh per
/// export.
#[derive(Debug, Clone, Default)]
pub struct FilenameContext {
    /// Source database name, when known.
    pub database: Option<String>,
    /// Source table name, for simple single-table queries.
    pub table: Option<String>,
    /// Export instant. `None` means "now" at generation time.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Report of a completed file save.
#[derive(Debug, Clone)]
pub struct SavedFile {
    pub filename: String,
    pub path: PathBuf,
    /// Byte length of the written content (UTF-8 bytes, not characters).
    pub size_bytes: u64,
}

/// Report of a completed export, returned by the pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    pub filename: String,
    pub path: PathBuf,
    pub rows_exported: usize,
    pub file_size_bytes: u64,
    pub elapsed_ms: u64,
    pub format: ExportFormat,
}

impl ExportOutcome {
    /// The success notification line: row count, filename, formatted size.
    pub fn summary(&self) -> String {
        format!(
            "{} rows exported to {} ({})",
            self.rows_exported,
            self.filename,
            crate::export::format_file_size(self.file_size_bytes)
        )
    }
}

/// Severity of a non-blocking validation warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A blocking validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// A non-blocking validation warning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationWarning {
    pub code: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationWarning {
    pub fn new(code: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Outcome of pre-export validation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// True when no blocking errors were found. Warnings do not block.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All error messages joined for display.
    pub fn error_messages(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}
