//! JSON generation.
//!
//! Serializes a query result as a JSON document: either a `{metadata, data}`
//! envelope, a bare `{data}` object, or the minimal form, a top-level array
//! of row objects.

use crate::convert::{iso_timestamp, to_json_value};
use crate::error::{ExportError, ExportResult};
use crate::models::{
    CellValue, ColumnMetadata, DEFAULT_JSON_INDENT, JsonOptions, QueryResult, Row,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value as JsonValue};

#[derive(Serialize)]
struct Envelope<'a> {
    metadata: Metadata<'a>,
    data: Vec<JsonValue>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    columns: &'a [ColumnMetadata],
    exported_at: String,
    row_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    sql: Option<&'a str>,
}

#[derive(Serialize)]
struct DataOnly {
    data: Vec<JsonValue>,
}

/// Serialize a query result as a JSON document.
///
/// With `include_metadata` the document is
/// `{"metadata": {"columns", "exportedAt", "rowCount", "sql"?}, "data": [..]}`;
/// `sql` is omitted when the result carries none. Without metadata the
/// document is `{"data": [..]}`. Rows missing a column key omit that key
/// from their object; explicit nulls serialize as JSON `null`.
pub fn export_to_json(result: &QueryResult, options: &JsonOptions) -> ExportResult<String> {
    let data = convert_rows(&result.rows, options.stringify_dates);
    if options.include_metadata {
        let envelope = Envelope {
            metadata: Metadata {
                columns: &result.columns,
                exported_at: iso_timestamp(&Utc::now()),
                row_count: result.row_count,
                sql: result.sql.as_deref(),
            },
            data,
        };
        to_text(&envelope, options.pretty_print, options.indent)
    } else {
        to_text(&DataOnly { data }, options.pretty_print, options.indent)
    }
}

/// Serialize only the rows as a top-level JSON array, without any envelope.
pub fn export_to_minimal_json(result: &QueryResult, pretty_print: bool) -> ExportResult<String> {
    let rows = convert_rows(&result.rows, true);
    to_text(&rows, pretty_print, DEFAULT_JSON_INDENT)
}

fn convert_rows(rows: &[Row], stringify_dates: bool) -> Vec<JsonValue> {
    rows.iter()
        .map(|row| convert_row(row, stringify_dates))
        .collect()
}

fn convert_row(row: &Row, stringify_dates: bool) -> JsonValue {
    let map = row
        .iter()
        .map(|(key, cell)| (key.clone(), convert_cell(cell, stringify_dates)))
        .collect::<serde_json::Map<String, JsonValue>>();
    JsonValue::Object(map)
}

fn convert_cell(cell: &CellValue, stringify_dates: bool) -> JsonValue {
    match cell {
        // Native rendering drops the millisecond padding when it is zero
        CellValue::Timestamp(ts) if !stringify_dates => {
            JsonValue::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }
        other => to_json_value(Some(other)),
    }
}

fn to_text<T: Serialize>(value: &T, pretty: bool, indent: usize) -> ExportResult<String> {
    if !pretty {
        return Ok(serde_json::to_string(value)?);
    }
    let indent = vec![b' '; indent];
    let mut out = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| ExportError::export_failed(e.to_string()))
}
