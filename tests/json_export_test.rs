//! Integration tests for JSON export.
//!
//! These tests parse the generated documents back with serde_json and check
//! the envelope shape, metadata fields, and value fidelity.

use chrono::{DateTime, TimeZone, Utc};
use query_export::export::{export_to_json, export_to_minimal_json};
use query_export::models::{CellValue, ColumnMetadata, JsonOptions, QueryResult, Row};
use serde_json::{Value, json};

fn row(cells: Vec<(&str, CellValue)>) -> Row {
    cells
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

fn sample_result() -> QueryResult {
    let columns = vec![
        ColumnMetadata::new("id", "int8"),
        ColumnMetadata::new("name", "text"),
    ];
    let rows = vec![
        row(vec![("id", CellValue::Int(1)), ("name", CellValue::from("Alice"))]),
        row(vec![("id", CellValue::Int(2)), ("name", CellValue::Null)]),
    ];
    QueryResult::new(columns, rows)
}

/// Test the envelope shape: metadata block plus data array.
#[test]
fn test_envelope_has_metadata_and_data() {
    let text = export_to_json(&sample_result(), &JsonOptions::default()).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();

    let metadata = &doc["metadata"];
    assert_eq!(metadata["rowCount"], json!(2));
    assert_eq!(metadata["columns"][0]["name"], json!("id"));
    assert_eq!(metadata["columns"][0]["dataType"], json!("int8"));
    assert_eq!(metadata["columns"][1]["name"], json!("name"));

    let data = doc["data"].as_array().expect("data should be an array");
    assert_eq!(data.len(), 2);
}

/// Test that the export timestamp is a parseable ISO-8601 instant near now.
#[test]
fn test_exported_at_is_current_iso_timestamp() {
    let text = export_to_json(&sample_result(), &JsonOptions::default()).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();

    let exported_at = doc["metadata"]["exportedAt"]
        .as_str()
        .expect("exportedAt should be a string");
    let parsed = DateTime::parse_from_rfc3339(exported_at)
        .expect("exportedAt should parse as RFC 3339")
        .with_timezone(&Utc);
    let age = (Utc::now() - parsed).num_seconds().abs();
    assert!(age < 300, "exportedAt should be recent, was {}s off", age);
}

/// Test that cell values keep their JSON types in the data array.
#[test]
fn test_values_keep_their_types() {
    let columns = vec![
        ColumnMetadata::new("count", "int8"),
        ColumnMetadata::new("ratio", "float8"),
        ColumnMetadata::new("ok", "bool"),
        ColumnMetadata::new("gone", "text"),
        ColumnMetadata::new("tags", "jsonb"),
    ];
    let rows = vec![row(vec![
        ("count", CellValue::Int(7)),
        ("ratio", CellValue::Float(0.25)),
        ("ok", CellValue::Bool(false)),
        ("gone", CellValue::Null),
        ("tags", CellValue::Other(json!({"nested": ["a", "b"]}))),
    ])];
    let result = QueryResult::new(columns, rows);

    let text = export_to_json(&result, &JsonOptions::default()).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    let r = &doc["data"][0];

    assert_eq!(r["count"], json!(7));
    assert_eq!(r["ratio"], json!(0.25));
    assert_eq!(r["ok"], json!(false));
    assert_eq!(r["gone"], Value::Null);
    assert_eq!(r["tags"], json!({"nested": ["a", "b"]}));
}

/// Test that timestamps serialize as millisecond-padded ISO strings.
#[test]
fn test_timestamps_serialize_as_iso_strings() {
    let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    let result = QueryResult::new(
        vec![ColumnMetadata::new("seen_at", "timestamptz")],
        vec![row(vec![("seen_at", CellValue::Timestamp(ts))])],
    );

    let text = export_to_json(&result, &JsonOptions::default()).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["data"][0]["seen_at"], json!("2024-01-15T10:30:00.000Z"));
}

/// Test that the originating SQL is carried into metadata when present.
#[test]
fn test_sql_carried_into_metadata() {
    let result = sample_result().with_sql("SELECT id, name FROM users");
    let text = export_to_json(&result, &JsonOptions::default()).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(doc["metadata"]["sql"], json!("SELECT id, name FROM users"));
}

/// Test that the sql key is omitted, not null, when no SQL is attached.
#[test]
fn test_sql_key_omitted_when_absent() {
    let text = export_to_json(&sample_result(), &JsonOptions::default()).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();
    let metadata = doc["metadata"].as_object().unwrap();
    assert!(!metadata.contains_key("sql"), "absent sql must be omitted");
}

/// Test that disabling metadata yields a bare data wrapper.
#[test]
fn test_metadata_free_document() {
    let options = JsonOptions {
        include_metadata: false,
        ..JsonOptions::default()
    };
    let text = export_to_json(&sample_result(), &options).unwrap();
    let doc: Value = serde_json::from_str(&text).unwrap();

    let object = doc.as_object().unwrap();
    assert_eq!(object.len(), 1, "only the data key should remain");
    assert_eq!(object["data"].as_array().unwrap().len(), 2);
}

/// Test the minimal export: a bare array of row objects.
#[test]
fn test_minimal_export_is_bare_array() {
    let text = export_to_minimal_json(&sample_result(), false).unwrap();
    assert_eq!(text, r#"[{"id":1,"name":"Alice"},{"id":2,"name":null}]"#);
}

/// Test that pretty minimal output is still the same document.
#[test]
fn test_minimal_pretty_parses_to_same_document() {
    let result = sample_result();
    let compact: Value =
        serde_json::from_str(&export_to_minimal_json(&result, false).unwrap()).unwrap();
    let pretty_text = export_to_minimal_json(&result, true).unwrap();
    let pretty: Value = serde_json::from_str(&pretty_text).unwrap();

    assert_eq!(compact, pretty);
    assert!(pretty_text.contains("\n  "), "pretty output should be indented");
}

/// Test that metadata-free exports of the same result are byte-identical.
#[test]
fn test_metadata_free_export_is_deterministic() {
    let result = sample_result();
    let options = JsonOptions {
        include_metadata: false,
        ..JsonOptions::default()
    };
    let first = export_to_json(&result, &options).unwrap();
    let second = export_to_json(&result, &options).unwrap();
    assert_eq!(first, second);
}
