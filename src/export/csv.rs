//! CSV generation.
//!
//! Serializes a query result as RFC 4180 CSV text. Field order follows the
//! column metadata, cells convert through the type converter, and quoting is
//! minimal unless `quote_all` is set.

use crate::convert::to_csv_string;
use crate::error::{ExportError, ExportResult};
use crate::models::{CsvOptions, LineEnding, QueryResult};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// Serialize a query result as CSV text.
///
/// The output has one record per row, each with exactly one field per
/// column, in column-metadata order. Rows missing a column key produce an
/// empty field there. With default options the text starts with a UTF-8
/// byte-order mark and records end with `\r\n`.
pub fn export_to_csv(result: &QueryResult, options: &CsvOptions) -> ExportResult<String> {
    let quote_style = if options.quote_all {
        QuoteStyle::Always
    } else {
        QuoteStyle::Necessary
    };
    let terminator = match options.line_ending {
        LineEnding::Crlf => Terminator::CRLF,
        LineEnding::Lf => Terminator::Any(b'\n'),
    };
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .quote_style(quote_style)
        .terminator(terminator)
        .from_writer(Vec::new());

    let names: Vec<&str> = result.columns.iter().map(|c| c.name.as_str()).collect();
    if options.include_headers {
        writer.write_record(&names)?;
    }
    for row in &result.rows {
        let record: Vec<String> = names
            .iter()
            .map(|name| to_csv_string(row.get(*name)))
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::export_failed(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| ExportError::export_failed(e.to_string()))?;

    if options.include_bom {
        Ok(format!("\u{feff}{text}"))
    } else {
        Ok(text)
    }
}
