//! query-export - Main entry point.
//!
//! Reads a query result (JSON) from a file or stdin and exports it as a
//! CSV or JSON file into the output directory.

use clap::Parser;
use query_export::config::Config;
use query_export::error::{ExportError, ExportResult};
use query_export::export::{export_to_minimal_json, generate_safe_filename, save_to_file};
use query_export::models::{ExportOutcome, QueryResult};
use query_export::pipeline::ExportPipeline;
use query_export::preview::format_preview;
use std::io::Read;
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .init();
    }
}

/// Load the query result from the input file, or stdin when none is given.
fn read_input(config: &Config) -> ExportResult<QueryResult> {
    let text = match &config.input {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            ExportError::export_failed(format!("Cannot read {}: {e}", path.display()))
        })?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ExportError::export_failed(format!("Cannot read stdin: {e}")))?;
            buf
        }
    };
    serde_json::from_str(&text)
        .map_err(|e| ExportError::invalid_data(format!("Malformed query result: {e}")))
}

fn run(config: &Config) -> ExportResult<()> {
    let result = read_input(config)?;
    debug!(
        rows = result.rows.len(),
        columns = result.columns.len(),
        "Query result loaded"
    );

    if let Some(limit) = config.preview {
        println!("{}", format_preview(&result, limit));
    }

    let format = config.effective_format();
    let context = config.filename_context();
    let output_dir = config.resolve_output_dir();

    // The minimal form bypasses the pipeline's envelope handling but keeps
    // its filename and save behavior.
    if config.minimal {
        let start = Instant::now();
        let content = export_to_minimal_json(&result, !config.compact)?;
        let filename = generate_safe_filename(&context, format);
        let saved = save_to_file(&content, &filename, &output_dir)?;
        let outcome = ExportOutcome {
            filename: saved.filename,
            path: saved.path,
            rows_exported: result.row_count,
            file_size_bytes: saved.size_bytes,
            elapsed_ms: start.elapsed().as_millis() as u64,
            format,
        };
        info!(
            rows = outcome.rows_exported,
            filename = %outcome.filename,
            size_bytes = outcome.file_size_bytes,
            elapsed_ms = outcome.elapsed_ms,
            "Minimal export complete"
        );
        println!("{}", outcome.summary());
        return Ok(());
    }

    let csv_options = config.csv_options().map_err(ExportError::invalid_data)?;
    let pipeline = ExportPipeline::new(&output_dir)
        .with_csv_options(csv_options)
        .with_json_options(config.json_options());
    let outcome = pipeline.export(&result, format, &context)?;
    println!("{}", outcome.summary());
    Ok(())
}

fn main() {
    // Parse configuration from command line and environment
    let config = Config::parse();

    // Initialize logging
    init_tracing(&config);

    info!(
        format = %config.effective_format(),
        "Starting query-export v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = run(&config) {
        error!(code = e.code(), error = %e, "Export failed");
        eprintln!("Error: {e}");
        if let Some(suggestion) = e.suggestion() {
            eprintln!("Hint: {suggestion}");
        }
        std::process::exit(1);
    }
}
