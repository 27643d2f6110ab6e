//! Export orchestration.
//!
//! Wires validation, serialization, filename generation, and the file save
//! into one operation. A pipeline either produces a saved file or a single
//! error; there is no partial success.

use crate::error::{ExportError, ExportResult};
use crate::export::{
    export_to_csv, export_to_json, generate_safe_filename, is_save_supported, save_to_file,
    validate_for_csv_export, validate_for_json_export,
};
use crate::models::{
    CsvOptions, ExportFormat, ExportOutcome, FilenameContext, JsonOptions, QueryResult,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{error, info, warn};

/// Runs exports into a fixed output directory with fixed options.
///
/// At most one export runs at a time; a second call while one is in flight
/// fails with [`ExportError::ExportInProgress`] instead of double-writing.
/// Safe to share behind `Arc`.
pub struct ExportPipeline {
    output_dir: PathBuf,
    csv_options: CsvOptions,
    json_options: JsonOptions,
    exporting: AtomicBool,
}

impl ExportPipeline {
    /// Create a pipeline writing into `output_dir` with default options.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            csv_options: CsvOptions::default(),
            json_options: JsonOptions::default(),
            exporting: AtomicBool::new(false),
        }
    }

    pub fn with_csv_options(mut self, options: CsvOptions) -> Self {
        self.csv_options = options;
        self
    }

    pub fn with_json_options(mut self, options: JsonOptions) -> Self {
        self.json_options = options;
        self
    }

    /// Whether an export is currently in flight.
    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::SeqCst)
    }

    /// Run one export: validate, serialize, name, save.
    ///
    /// Validation errors abort before any serialization work; warnings are
    /// logged and do not block. The in-flight guard is released on every
    /// path, success or failure.
    pub fn export(
        &self,
        result: &QueryResult,
        format: ExportFormat,
        context: &FilenameContext,
    ) -> ExportResult<ExportOutcome> {
        if self.exporting.swap(true, Ordering::SeqCst) {
            return Err(ExportError::ExportInProgress);
        }
        let outcome = self.run_export(result, format, context);
        self.exporting.store(false, Ordering::SeqCst);

        match &outcome {
            Ok(o) => info!(
                rows = o.rows_exported,
                filename = %o.filename,
                size_bytes = o.file_size_bytes,
                elapsed_ms = o.elapsed_ms,
                mime_type = format.mime_type(),
                "Export complete"
            ),
            Err(e) => error!(code = e.code(), error = %e, "Export failed"),
        }
        outcome
    }

    fn run_export(
        &self,
        result: &QueryResult,
        format: ExportFormat,
        context: &FilenameContext,
    ) -> ExportResult<ExportOutcome> {
        let start = Instant::now();

        let report = match format {
            ExportFormat::Csv => validate_for_csv_export(result),
            ExportFormat::Json => validate_for_json_export(result),
        };
        for warning in &report.warnings {
            warn!(code = %warning.code, severity = ?warning.severity, "{}", warning.message);
        }
        if !report.is_valid() {
            return Err(ExportError::invalid_data(report.error_messages()));
        }

        let content = match format {
            ExportFormat::Csv => export_to_csv(result, &self.csv_options)?,
            ExportFormat::Json => export_to_json(result, &self.json_options)?,
        };

        let filename = generate_safe_filename(context, format);
        if !is_save_supported(&self.output_dir) {
            warn!(
                dir = %self.output_dir.display(),
                "Output directory is not usable, attempting save anyway"
            );
        }
        let saved = save_to_file(&content, &filename, &self.output_dir)?;

        Ok(ExportOutcome {
            filename: saved.filename,
            path: saved.path,
            // The declared count is what the success message reports; a
            // mismatch with rows.len() was already warned about above.
            rows_exported: result.row_count,
            file_size_bytes: saved.size_bytes,
            elapsed_ms: start.elapsed().as_millis() as u64,
            format,
        })
    }
}
