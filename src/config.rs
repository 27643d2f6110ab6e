//! Configuration handling for the query-export CLI.
//!
//! This module provides configuration management via CLI arguments and environment variables,
//! plus accessors that assemble the domain option types from the raw flags.

use crate::models::{
    CsvOptions, DEFAULT_JSON_INDENT, ExportFormat, FilenameContext, JsonOptions, LineEnding,
};
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_DELIMITER: &str = ",";

/// Configuration for the query-export CLI.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "query-export",
    about = "Export SQL query results to CSV or JSON files",
    version,
    author
)]
pub struct Config {
    /// Query result file (JSON). Reads stdin when omitted.
    #[arg(value_name = "RESULT_FILE")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(
        short,
        long,
        value_enum,
        default_value = "csv",
        env = "QUERY_EXPORT_FORMAT"
    )]
    pub format: ExportFormat,

    /// Directory to write into. Defaults to the platform download
    /// directory, falling back to the current directory.
    #[arg(short, long, value_name = "DIR", env = "QUERY_EXPORT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Database name, used in the generated filename
    #[arg(long, env = "QUERY_EXPORT_DATABASE")]
    pub database: Option<String>,

    /// Table name, used in the generated filename
    #[arg(long, env = "QUERY_EXPORT_TABLE")]
    pub table: Option<String>,

    /// Omit the CSV header row
    #[arg(long)]
    pub no_headers: bool,

    /// Quote every CSV field, not just the ones that need it
    #[arg(long)]
    pub quote_all: bool,

    /// CSV field delimiter (single byte)
    #[arg(long, default_value = DEFAULT_DELIMITER, env = "QUERY_EXPORT_DELIMITER")]
    pub delimiter: String,

    /// CSV record separator
    #[arg(long, value_enum, default_value = "crlf")]
    pub line_ending: LineEnding,

    /// Skip the UTF-8 byte-order mark at the start of CSV output
    #[arg(long)]
    pub no_bom: bool,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,

    /// Pretty-print indentation width in spaces
    #[arg(long, default_value_t = DEFAULT_JSON_INDENT, env = "QUERY_EXPORT_INDENT")]
    pub indent: usize,

    /// Omit the metadata envelope from JSON output
    #[arg(long)]
    pub no_metadata: bool,

    /// Emit a bare JSON array of rows (implies --format json)
    #[arg(long)]
    pub minimal: bool,

    /// Print the first N rows as a table before exporting
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "QUERY_EXPORT_LOG_LEVEL")]
    pub log_level: String,

    /// Enable JSON logging format
    #[arg(long, env = "QUERY_EXPORT_JSON_LOGS")]
    pub json_logs: bool,
}

impl Config {
    /// Parse configuration from command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a default configuration (useful for testing).
    pub fn default_config() -> Self {
        Self {
            input: None,
            format: ExportFormat::Csv,
            output_dir: None,
            database: None,
            table: None,
            no_headers: false,
            quote_all: false,
            delimiter: DEFAULT_DELIMITER.to_string(),
            line_ending: LineEnding::Crlf,
            no_bom: false,
            compact: false,
            indent: DEFAULT_JSON_INDENT,
            no_metadata: false,
            minimal: false,
            preview: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            json_logs: false,
        }
    }

    /// Build CSV options from the flags. The delimiter must be one byte.
    pub fn csv_options(&self) -> Result<CsvOptions, String> {
        let bytes = self.delimiter.as_bytes();
        if bytes.len() != 1 {
            return Err(format!(
                "Delimiter must be a single byte, got {:?}",
                self.delimiter
            ));
        }
        Ok(CsvOptions {
            include_headers: !self.no_headers,
            quote_all: self.quote_all,
            delimiter: bytes[0],
            line_ending: self.line_ending,
            include_bom: !self.no_bom,
        })
    }

    /// Build JSON options from the flags.
    pub fn json_options(&self) -> JsonOptions {
        JsonOptions {
            include_metadata: !self.no_metadata,
            pretty_print: !self.compact,
            indent: self.indent,
            stringify_dates: true,
        }
    }

    /// Build the filename context from the flags.
    pub fn filename_context(&self) -> FilenameContext {
        FilenameContext {
            database: self.database.clone(),
            table: self.table.clone(),
            timestamp: None,
        }
    }

    /// Resolve the output directory: the flag, then the platform download
    /// directory, then the current directory.
    pub fn resolve_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    /// The format actually exported. `--minimal` is a JSON shape, so it
    /// forces JSON regardless of `--format`.
    pub fn effective_format(&self) -> ExportFormat {
        if self.minimal {
            ExportFormat::Json
        } else {
            self.format
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
