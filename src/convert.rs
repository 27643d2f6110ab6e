//! Cell value conversion.
//!
//! Maps [`CellValue`] cells onto their CSV text and JSON forms, classifies
//! values for type reporting, and renders timestamps in the ISO-8601
//! millisecond form shared by both exporters.

use crate::models::CellValue;
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde_json::Value as JsonValue;

/// Classification of a cell value, as reported by [`infer_data_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    Null,
    Date,
    Boolean,
    Number,
    String,
    Unknown,
}

impl InferredType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for InferredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Convert a cell to its CSV text form.
///
/// `None` (a row missing the column key) and `Null` both become the empty
/// string, never the literal text `"null"` or `"undefined"`. Timestamps
/// render as ISO-8601 with milliseconds; nested arrays and objects render
/// as compact JSON.
pub fn to_csv_string(value: Option<&CellValue>) -> String {
    match value {
        None | Some(CellValue::Null) => String::new(),
        Some(CellValue::Bool(b)) => b.to_string(),
        Some(CellValue::Int(i)) => i.to_string(),
        Some(CellValue::Float(f)) => f.to_string(),
        Some(CellValue::Timestamp(ts)) => iso_timestamp(ts),
        Some(CellValue::String(s)) => s.clone(),
        Some(CellValue::Other(v)) => v.to_string(),
    }
}

/// Convert a cell to its JSON form.
///
/// Timestamps become ISO-8601 strings. Non-finite floats have no JSON
/// number representation and become `null`. Nested arrays and objects pass
/// through unchanged.
pub fn to_json_value(value: Option<&CellValue>) -> JsonValue {
    match value {
        None | Some(CellValue::Null) => JsonValue::Null,
        Some(CellValue::Bool(b)) => JsonValue::Bool(*b),
        Some(CellValue::Int(i)) => JsonValue::from(*i),
        Some(CellValue::Float(f)) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Some(CellValue::Timestamp(ts)) => JsonValue::String(iso_timestamp(ts)),
        Some(CellValue::String(s)) => JsonValue::String(s.clone()),
        Some(CellValue::Other(v)) => v.clone(),
    }
}

/// Classify a cell for type reporting.
///
/// Strings with the ISO-8601 shape classify as `Date`. This is a shape
/// heuristic, not a calendar check: `"2024-13-45"` classifies as a date.
pub fn infer_data_type(value: Option<&CellValue>) -> InferredType {
    match value {
        None | Some(CellValue::Null) => InferredType::Null,
        Some(CellValue::Timestamp(_)) => InferredType::Date,
        Some(CellValue::Bool(_)) => InferredType::Boolean,
        Some(CellValue::Int(_) | CellValue::Float(_)) => InferredType::Number,
        Some(CellValue::String(s)) if is_date_like(s) => InferredType::Date,
        Some(CellValue::String(_)) => InferredType::String,
        Some(CellValue::Other(_)) => InferredType::Unknown,
    }
}

/// Check whether a string has the shape of an ISO-8601 date or datetime:
/// `YYYY-MM-DD`, optionally followed by `Thh:mm:ss`, an optional `.mmm`
/// fraction, and an optional `Z` or `+hh:mm`/`-hh:mm` offset.
///
/// Shape only. Field ranges are not validated.
pub fn is_date_like(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() < 10 {
        return false;
    }
    let date_ok = all_digits(&bytes[0..4])
        && bytes[4] == b'-'
        && all_digits(&bytes[5..7])
        && bytes[7] == b'-'
        && all_digits(&bytes[8..10]);
    if !date_ok {
        return false;
    }
    let rest = &bytes[10..];
    if rest.is_empty() {
        return true;
    }

    // Time part: Thh:mm:ss
    if rest.len() < 9 || rest[0] != b'T' {
        return false;
    }
    let time_ok = all_digits(&rest[1..3])
        && rest[3] == b':'
        && all_digits(&rest[4..6])
        && rest[6] == b':'
        && all_digits(&rest[7..9]);
    if !time_ok {
        return false;
    }
    let mut rest = &rest[9..];

    // Optional millisecond fraction: exactly three digits
    if rest.first() == Some(&b'.') {
        if rest.len() < 4 || !all_digits(&rest[1..4]) {
            return false;
        }
        rest = &rest[4..];
    }

    // Optional zone designator
    match rest {
        [] | [b'Z'] => true,
        [sign, h1, h2, b':', m1, m2] => {
            (*sign == b'+' || *sign == b'-') && all_digits(&[*h1, *h2, *m1, *m2])
        }
        _ => false,
    }
}

fn all_digits(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_digit)
}

/// Parse an ISO-8601 string into a UTC timestamp.
///
/// Accepts RFC 3339 datetimes (offsets normalized to UTC) and bare
/// `YYYY-MM-DD` dates, which become midnight UTC. Unlike [`is_date_like`],
/// this validates the calendar, so `"2024-13-45"` returns `None`.
pub fn parse_iso_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// Render a timestamp as ISO-8601 with milliseconds and a `Z` suffix,
/// e.g. `2024-01-15T10:30:00.000Z`.
pub fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
