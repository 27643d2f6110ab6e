//! Terminal preview of query results.
//!
//! Renders the first rows of a result as an ASCII table (like the MySQL
//! CLI) so the content can be inspected before exporting.

use crate::convert::to_csv_string;
use crate::models::{CellValue, QueryResult};
use unicode_width::UnicodeWidthStr;

fn format_cell(value: Option<&CellValue>) -> String {
    match value {
        None | Some(CellValue::Null) => "NULL".to_string(),
        Some(other) => to_csv_string(Some(other)),
    }
}

/// Render up to `limit` rows as an aligned ASCII table.
///
/// Numeric cells right-align, null and missing cells render as `NULL`, and
/// a notice is appended when the preview shows fewer rows than the result
/// holds.
pub fn format_preview(result: &QueryResult, limit: usize) -> String {
    if result.columns.is_empty() {
        return "Empty set".to_string();
    }

    let total = result.rows.len();
    let shown = &result.rows[..limit.min(total)];

    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.name.width()).collect();
    for row in shown {
        for (i, col) in result.columns.iter().enumerate() {
            let val_width = format_cell(row.get(&col.name)).width();
            widths[i] = widths[i].max(val_width);
        }
    }

    let mut output = String::new();
    let separator: String = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .collect::<String>()
        + "+\n";

    output.push_str(&separator);
    let header: String = result
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("| {:^width$} ", col.name, width = w))
        .collect::<String>()
        + "|\n";
    output.push_str(&header);
    output.push_str(&separator);

    for row in shown {
        let row_str: String = result
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| {
                let value = row.get(&col.name);
                let formatted = format_cell(value);
                if matches!(value, Some(CellValue::Int(_) | CellValue::Float(_))) {
                    format!("| {:>width$} ", formatted, width = w)
                } else {
                    format!("| {:<width$} ", formatted, width = w)
                }
            })
            .collect::<String>()
            + "|\n";
        output.push_str(&row_str);
    }

    output.push_str(&separator);

    let row_word = if total == 1 { "row" } else { "rows" };
    match result.execution_time_ms {
        Some(ms) => output.push_str(&format!(
            "{} {} in set ({:.2} sec)\n",
            total,
            row_word,
            ms as f64 / 1000.0
        )),
        None => output.push_str(&format!("{} {} in set\n", total, row_word)),
    }
    if shown.len() < total {
        output.push_str(&format!("(showing first {} of {} rows)\n", shown.len(), total));
    }

    output
}
