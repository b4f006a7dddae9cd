//! Plain-text rendering of a comparison result.
//!
//! Produces the same summary the viewer shows, plus an aligned per-table
//! listing with row-status markers, for terminals and scripts that don't
//! want the interactive viewer.

use std::fmt::Write;

use serde_json::Value;

use crate::db::comparator::{ComparisonResult, TableDifference};
use crate::db::data_comparator::{diff_rows, RowComparison, RowStatus};
use crate::db::schema::Row;
use crate::security::sanitize_for_display;

/// Render one cell for display. Strings are single-quoted so `1` and `'1'`
/// stay distinguishable; NULL is spelled out; blobs already carry their
/// `x'..'` form.
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => format!("'{}'", sanitize_for_display(s)),
        other => other.to_string(),
    }
}

/// Render a whole row as a tuple: `(1, 'x')`. Absent rows render empty.
pub fn format_row(row: Option<&Row>) -> String {
    match row {
        Some(values) => {
            let cells: Vec<String> = values.iter().map(format_cell).collect();
            format!("({})", cells.join(", "))
        }
        None => String::new(),
    }
}

fn status_marker(status: RowStatus) -> &'static str {
    match status {
        RowStatus::Unchanged => "  ",
        RowStatus::LeftOnly => "< ",
        RowStatus::RightOnly => "> ",
        RowStatus::Changed => "~ ",
    }
}

fn write_table_section(out: &mut String, diff: &TableDifference) {
    let _ = writeln!(out, "\nTable: {}", diff.table);
    if diff.schema_changed {
        let _ = writeln!(out, "  (schema differs)");
    }

    let comparisons = diff_rows(&diff.left_rows, &diff.right_rows);
    let width = comparisons
        .iter()
        .map(|c| format_row(c.left.as_ref()).len())
        .max()
        .unwrap_or(0);

    for comparison in &comparisons {
        let RowComparison {
            left,
            right,
            status,
            ..
        } = comparison;
        let _ = writeln!(
            out,
            "  {}{:<width$} | {}",
            status_marker(*status),
            format_row(left.as_ref()),
            format_row(right.as_ref()),
            width = width
        );
    }
}

/// Render the full report: summary lines first, then one aligned
/// two-column section per differing table.
pub fn render_report(result: &ComparisonResult) -> String {
    let mut out = String::new();

    if result.is_identical() {
        out.push_str("No differences found. The databases are identical.\n");
        return out;
    }

    if !result.only_in_left.is_empty() {
        let _ = writeln!(
            out,
            "Tables only in DB1: {}",
            result.only_in_left.join(", ")
        );
    }
    if !result.only_in_right.is_empty() {
        let _ = writeln!(
            out,
            "Tables only in DB2: {}",
            result.only_in_right.join(", ")
        );
    }

    if result.differences.is_empty() {
        out.push_str("\nNo differences found in common tables.\n");
        return out;
    }

    out.push_str("\nDifferences found in the following tables:\n");
    for diff in &result.differences {
        let _ = writeln!(out, "- {}", diff.table);
    }

    let summary = &result.summary;
    let _ = writeln!(
        out,
        "\nRows: {} added, {} removed, {} changed, {} unchanged",
        summary.additions, summary.removals, summary.modifications, summary.unchanged
    );

    for diff in &result.differences {
        write_table_section(&mut out, diff);
    }

    out
}
