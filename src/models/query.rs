//! Query result data model.
//!
//! This module defines the tabular payload consumed by the export pipeline:
//! column metadata, rows, and the cell value domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// A single cell value inside a query result row.
///
/// `undefined` cells have no variant: a row that lacks a column key is the
/// missing-value case, which is why converter entry points take
/// `Option<&CellValue>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (stored as i64 for maximum range)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Timestamp value. RFC 3339 strings deserialize into this variant;
    /// offsets are normalized to UTC.
    Timestamp(DateTime<Utc>),
    /// String value
    String(String),
    /// Nested array or object, e.g. from a JSON-typed column.
    Other(JsonValue),
}

impl CellValue {
    /// Check if this cell is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the variant name of this cell for debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Timestamp(_) => "timestamp",
            Self::String(_) => "string",
            Self::Other(_) => "other",
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Row data: column name to cell value. Keys are sorted, so serialization
/// order is deterministic.
pub type Row = BTreeMap<String, CellValue>;

/// Metadata for a single result column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    pub name: String,
    /// Database-reported type (e.g., "int8", "varchar", "TEXT")
    pub data_type: String,
}

impl ColumnMetadata {
    /// Create new column metadata.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// The tabular result of executing a SQL query.
///
/// Produced by an external collaborator (a query-execution service); this
/// crate only consumes it. `row_count` is the producer's count and is passed
/// through to export metadata as-is — see `export::validate_for_csv_export`
/// for the consistency warning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub columns: Vec<ColumnMetadata>,
    pub rows: Vec<Row>,
    pub row_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
}

impl QueryResult {
    /// Create a result from columns and rows, deriving the row count.
    pub fn new(columns: Vec<ColumnMetadata>, rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        Self {
            columns,
            rows,
            row_count,
            execution_time_ms: None,
            sql: None,
            truncated: None,
        }
    }

    /// Create an empty result with the given columns (header-only export).
    pub fn empty(columns: Vec<ColumnMetadata>) -> Self {
        Self::new(columns, Vec::new())
    }

    /// Attach the SQL text that produced this result.
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }

    /// Get the number of rows actually present.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in field order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cell_value_types() {
        assert!(CellValue::Null.is_null());
        assert!(!CellValue::Bool(true).is_null());
        assert_eq!(CellValue::Int(42).type_name(), "int");
        assert_eq!(CellValue::from("hello").type_name(), "string");
    }

    #[test]
    fn test_cell_value_deserialize_untagged() {
        let cases: Vec<(&str, CellValue)> = vec![
            ("null", CellValue::Null),
            ("true", CellValue::Bool(true)),
            ("42", CellValue::Int(42)),
            ("4.5", CellValue::Float(4.5)),
            ("\"hello\"", CellValue::String("hello".to_string())),
        ];
        for (json, expected) in cases {
            let value: CellValue = serde_json::from_str(json).unwrap();
            assert_eq!(value, expected, "input: {}", json);
        }
    }

    #[test]
    fn test_cell_value_rfc3339_string_becomes_timestamp() {
        let value: CellValue = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(value, CellValue::Timestamp(expected));
    }

    #[test]
    fn test_cell_value_plain_date_string_stays_string() {
        // No time component, so chrono's RFC 3339 parse rejects it.
        let value: CellValue = serde_json::from_str("\"2024-01-15\"").unwrap();
        assert_eq!(value, CellValue::String("2024-01-15".to_string()));
    }

    #[test]
    fn test_cell_value_offset_normalizes_to_utc() {
        let value: CellValue = serde_json::from_str("\"2024-01-15T10:30:00+02:00\"").unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        assert_eq!(value, CellValue::Timestamp(expected));
    }

    #[test]
    fn test_cell_value_nested_becomes_other() {
        let value: CellValue = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(value.type_name(), "other");

        let value: CellValue = serde_json::from_str("{\"a\":1}").unwrap();
        assert_eq!(value.type_name(), "other");
    }

    #[test]
    fn test_query_result_from_camel_case_json() {
        let json = r#"{
            "columns": [{"name": "id", "dataType": "int8"}],
            "rows": [{"id": 1}, {"id": 2}],
            "rowCount": 2,
            "executionTimeMs": 12,
            "sql": "SELECT id FROM users"
        }"#;
        let result: QueryResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.columns[0].data_type, "int8");
        assert_eq!(result.row_count, 2);
        assert_eq!(result.len(), 2);
        assert_eq!(result.execution_time_ms, Some(12));
        assert_eq!(result.sql.as_deref(), Some("SELECT id FROM users"));
        assert!(result.truncated.is_none());
    }

    #[test]
    fn test_query_result_new_derives_count() {
        let mut row = Row::new();
        row.insert("id".to_string(), CellValue::Int(1));
        let result = QueryResult::new(vec![ColumnMetadata::new("id", "int8")], vec![row]);
        assert_eq!(result.row_count, 1);
        assert!(!result.is_empty());
    }

    #[test]
    fn test_query_result_empty() {
        let result = QueryResult::empty(vec![ColumnMetadata::new("id", "int8")]);
        assert!(result.is_empty());
        assert_eq!(result.row_count, 0);
        assert_eq!(result.column_names().collect::<Vec<_>>(), vec!["id"]);
    }
}
