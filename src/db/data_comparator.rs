use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::schema::{compare_values, Row};

/// Alignment status of one key across the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowStatus {
    Unchanged,
    LeftOnly,
    RightOnly,
    Changed,
}

/// Comparison record for one identifying key, in ascending key order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowComparison {
    pub key: Value,
    pub left: Option<Row>,
    pub right: Option<Row>,
    pub status: RowStatus,
    /// Tuple positions that differ; populated only for `Changed` rows.
    pub changed_columns: Vec<usize>,
}

/// Wrapper giving `serde_json::Value` the total order of `compare_values`,
/// so key maps stay sorted ascending.
#[derive(Debug, Clone)]
struct SortKey(Value);

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        compare_values(&self.0, &other.0) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_values(&self.0, &other.0)
    }
}

/// The identifying key of a row: its first tuple element.
fn key_of(row: &Row) -> Value {
    row.first().cloned().unwrap_or(Value::Null)
}

/// Index rows by identifying key. On duplicate keys the first occurrence
/// wins, deterministically, and the duplicate is logged.
fn index_rows<'a>(rows: &'a [Row], side: &str) -> BTreeMap<SortKey, &'a Row> {
    let mut map = BTreeMap::new();
    for row in rows {
        match map.entry(SortKey(key_of(row))) {
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
            Entry::Occupied(slot) => {
                log::warn!(
                    "duplicate identifying key {} in {} rows; keeping the first occurrence",
                    slot.key().0,
                    side
                );
            }
        }
    }
    map
}

/// Positions at which two tuples differ, compared position by position with
/// strict equality (no type coercion: integer 1 and text "1" differ).
/// Positions past the shorter tuple count as changed.
pub fn changed_columns(left: &Row, right: &Row) -> Vec<usize> {
    let len = left.len().max(right.len());
    (0..len).filter(|&i| left.get(i) != right.get(i)).collect()
}

/// Align two row sets by identifying key and compare them.
///
/// Builds a key-to-row mapping for each side, walks the union of keys in
/// ascending order, and emits one `RowComparison` per key: one-sided keys
/// become `LeftOnly`/`RightOnly`, matched keys with equal tuples
/// `Unchanged`, and matched keys with differing tuples `Changed` together
/// with the differing positions.
pub fn diff_rows(left: &[Row], right: &[Row]) -> Vec<RowComparison> {
    let left_map = index_rows(left, "left");
    let right_map = index_rows(right, "right");

    let mut keys: Vec<&SortKey> = left_map.keys().collect();
    for key in right_map.keys() {
        if !left_map.contains_key(key) {
            keys.push(key);
        }
    }
    keys.sort();

    keys.into_iter()
        .map(|key| {
            let left_row = left_map.get(key).map(|r| (*r).clone());
            let right_row = right_map.get(key).map(|r| (*r).clone());

            let (status, changed) = match (&left_row, &right_row) {
                (Some(l), Some(r)) if l == r => (RowStatus::Unchanged, Vec::new()),
                (Some(l), Some(r)) => (RowStatus::Changed, changed_columns(l, r)),
                (Some(_), None) => (RowStatus::LeftOnly, Vec::new()),
                (None, Some(_)) => (RowStatus::RightOnly, Vec::new()),
                (None, None) => unreachable!("key came from one of the two maps"),
            };

            RowComparison {
                key: key.0.clone(),
                left: left_row,
                right: right_row,
                status,
                changed_columns: changed,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Helper to build a row from JSON values.
    fn row(values: &[Value]) -> Row {
        values.to_vec()
    }

    #[test]
    fn test_identical_rows_unchanged() {
        let left = vec![row(&[json!(1), json!("x")]), row(&[json!(2), json!("y")])];
        let right = left.clone();

        let diff = diff_rows(&left, &right);
        assert_eq!(diff.len(), 2);
        assert!(diff.iter().all(|c| c.status == RowStatus::Unchanged));
    }

    #[test]
    fn test_changed_row_reports_exact_positions() {
        let left = vec![row(&[json!(1), json!("x"), json!(10)])];
        let right = vec![row(&[json!(1), json!("y"), json!(10)])];

        let diff = diff_rows(&left, &right);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].status, RowStatus::Changed);
        assert_eq!(diff[0].changed_columns, vec![1]);
    }

    #[test]
    fn test_one_sided_rows() {
        let left = vec![row(&[json!(1), json!("x")])];
        let right = vec![row(&[json!(2), json!("y")])];

        let diff = diff_rows(&left, &right);
        assert_eq!(diff.len(), 2);
        assert_eq!(diff[0].status, RowStatus::LeftOnly);
        assert!(diff[0].right.is_none());
        assert_eq!(diff[1].status, RowStatus::RightOnly);
        assert!(diff[1].left.is_none());
    }

    #[test]
    fn test_keys_sorted_ascending() {
        let left = vec![row(&[json!(3)]), row(&[json!(1)])];
        let right = vec![row(&[json!(2)])];

        let diff = diff_rows(&left, &right);
        let keys: Vec<i64> = diff.iter().map(|c| c.key.as_i64().unwrap()).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_mixed_change_and_addition() {
        // DB A: (1,"x"),(2,"y"); DB B: (1,"x"),(2,"z"),(3,"w")
        let left = vec![row(&[json!(1), json!("x")]), row(&[json!(2), json!("y")])];
        let right = vec![
            row(&[json!(1), json!("x")]),
            row(&[json!(2), json!("z")]),
            row(&[json!(3), json!("w")]),
        ];

        let diff = diff_rows(&left, &right);
        assert_eq!(diff.len(), 3);
        assert_eq!(diff[0].status, RowStatus::Unchanged);
        assert_eq!(diff[1].status, RowStatus::Changed);
        assert_eq!(diff[1].changed_columns, vec![1]);
        assert_eq!(diff[2].status, RowStatus::RightOnly);
    }

    #[test]
    fn test_duplicate_keys_first_occurrence_wins() {
        let left = vec![row(&[json!(1), json!("first")]), row(&[json!(1), json!("second")])];
        let right = vec![row(&[json!(1), json!("first")])];

        let diff = diff_rows(&left, &right);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].status, RowStatus::Unchanged);
    }

    #[test]
    fn test_no_type_coercion_between_cells() {
        let left = vec![row(&[json!(1), json!(1)])];
        let right = vec![row(&[json!(1), json!("1")])];

        let diff = diff_rows(&left, &right);
        assert_eq!(diff[0].status, RowStatus::Changed);
        assert_eq!(diff[0].changed_columns, vec![1]);
    }

    #[test]
    fn test_numeric_keys_align_across_storage_class() {
        // Integer 2 on one side, real 2.0 on the other: same key.
        let left = vec![row(&[json!(2), json!("a")])];
        let right = vec![row(&[json!(2.0), json!("a")])];

        let diff = diff_rows(&left, &right);
        assert_eq!(diff.len(), 1);
        // The tuples still differ cell-for-cell (2 vs 2.0 is a storage
        // class change), so the row is reported as changed at position 0.
        assert_eq!(diff[0].status, RowStatus::Changed);
        assert_eq!(diff[0].changed_columns, vec![0]);
    }

    #[test]
    fn test_arity_mismatch_marks_tail_changed() {
        let left = vec![row(&[json!(1), json!("x")])];
        let right = vec![row(&[json!(1), json!("x"), json!(5)])];

        let diff = diff_rows(&left, &right);
        assert_eq!(diff[0].status, RowStatus::Changed);
        assert_eq!(diff[0].changed_columns, vec![2]);
    }

    #[test]
    fn test_mixed_key_types_sort_deterministically() {
        let left = vec![row(&[json!(null)]), row(&[json!("a")])];
        let right = vec![row(&[json!(1)])];

        let diff = diff_rows(&left, &right);
        assert_eq!(diff.len(), 3);
        assert!(diff[0].key.is_null());
        assert_eq!(diff[1].key, json!(1));
        assert_eq!(diff[2].key, json!("a"));
    }

    #[test]
    fn test_empty_sides() {
        assert!(diff_rows(&[], &[]).is_empty());

        let right = vec![row(&[json!(1)])];
        let diff = diff_rows(&[], &right);
        assert_eq!(diff.len(), 1);
        assert_eq!(diff[0].status, RowStatus::RightOnly);
    }
}
