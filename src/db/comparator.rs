use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::connectors::sqlite::SqliteConnector;
use super::connectors::{ConnectionConfig, DatabaseConnector};
use super::data_comparator::{diff_rows, RowStatus};
use super::schema::{Row, TableInfo};
use super::DbError;

/// Result of comparing two databases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub left_database: String,
    pub right_database: String,
    pub only_in_left: Vec<String>,
    pub only_in_right: Vec<String>,
    pub differences: Vec<TableDifference>,
    pub summary: DiffSummary,
}

impl ComparisonResult {
    /// True when the two databases are identical: same table set, same
    /// schemas, same data.
    pub fn is_identical(&self) -> bool {
        self.only_in_left.is_empty()
            && self.only_in_right.is_empty()
            && self.differences.is_empty()
    }
}

/// Row-level summary counts across all common tables.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DiffSummary {
    pub additions: usize,
    pub removals: usize,
    pub modifications: usize,
    pub unchanged: usize,
}

/// A common table whose schema or data differs between the two sides.
///
/// Carries both schemas and both raw row sets; key alignment and
/// field-level highlighting are recomputed by the display layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDifference {
    pub table: String,
    pub left_schema: TableInfo,
    pub right_schema: TableInfo,
    pub left_rows: Vec<Row>,
    pub right_rows: Vec<Row>,
    pub schema_changed: bool,
    pub data_changed: bool,
}

/// Split two table-name sets into left-only, right-only, and common,
/// each sorted ascending. Pure set algebra.
pub fn diff_table_sets(
    left: &BTreeSet<String>,
    right: &BTreeSet<String>,
) -> (Vec<String>, Vec<String>, Vec<String>) {
    let only_in_left = left.difference(right).cloned().collect();
    let only_in_right = right.difference(left).cloned().collect();
    let common = left.intersection(right).cloned().collect();
    (only_in_left, only_in_right, common)
}

/// Compare two SQLite database files and aggregate the differences.
///
/// Opens both databases read-only, closes them when done. On any
/// underlying database error the whole comparison fails; there are no
/// partial results.
pub fn compare_databases(left_path: &Path, right_path: &Path) -> Result<ComparisonResult, DbError> {
    let left = SqliteConnector::open(ConnectionConfig::new(left_path))?;
    let right = SqliteConnector::open(ConnectionConfig::new(right_path))?;
    compare_connected(&left, &right)
}

/// Compare two already-opened databases.
///
/// For every table name common to both sides, fetches schema and data and
/// records the table as a difference when the column descriptor lists
/// differ or the key-aligned row diff reports any non-unchanged row. The
/// check is order-insensitive: two tables with equal rows in different
/// physical order compare equal.
pub fn compare_connected(
    left: &dyn DatabaseConnector,
    right: &dyn DatabaseConnector,
) -> Result<ComparisonResult, DbError> {
    let left_tables: BTreeSet<String> = left.list_tables()?.into_iter().collect();
    let right_tables: BTreeSet<String> = right.list_tables()?.into_iter().collect();

    let (only_in_left, only_in_right, common) = diff_table_sets(&left_tables, &right_tables);

    let mut differences = Vec::new();
    let mut summary = DiffSummary::default();

    for table in &common {
        let left_schema = left.table_info(table)?;
        let right_schema = right.table_info(table)?;

        let left_rows = left.fetch_rows(table)?;
        let right_rows = right.fetch_rows(table)?;

        let schema_changed = left_schema.columns != right_schema.columns;

        let mut data_changed = false;
        for comparison in diff_rows(&left_rows, &right_rows) {
            match comparison.status {
                RowStatus::Unchanged => summary.unchanged += 1,
                RowStatus::LeftOnly => {
                    summary.removals += 1;
                    data_changed = true;
                }
                RowStatus::RightOnly => {
                    summary.additions += 1;
                    data_changed = true;
                }
                RowStatus::Changed => {
                    summary.modifications += 1;
                    data_changed = true;
                }
            }
        }

        if schema_changed || data_changed {
            log::info!(
                "table '{}' differs (schema: {}, data: {})",
                table,
                schema_changed,
                data_changed
            );
            differences.push(TableDifference {
                table: table.clone(),
                left_schema,
                right_schema,
                left_rows,
                right_rows,
                schema_changed,
                data_changed,
            });
        }
    }

    Ok(ComparisonResult {
        left_database: left.label(),
        right_database: right.label(),
        only_in_left,
        only_in_right,
        differences,
        summary,
    })
}
