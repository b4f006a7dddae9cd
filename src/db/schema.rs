use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Represents a single database table: its name plus the ordered column schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub table_name: String,
    pub columns: Vec<ColumnInfo>,
}

/// Represents a column in a table, in the shape reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub is_primary_key: bool,
    pub default_value: Option<String>,
    pub ordinal_position: i32,
}

/// Represents a database row as an ordered tuple of column values.
///
/// Column 0 is treated as the row's identifying key by convention of this
/// tool, not by schema knowledge.
pub type Row = Vec<serde_json::Value>;

/// Convert a SQLite value into its JSON representation.
///
/// NULL maps to null, INTEGER and REAL to numbers, TEXT to a string, and
/// BLOB to a `x'..'` hex literal string. REAL values that JSON cannot carry
/// (infinities) fall back to their string form.
pub fn value_from_sql(value: rusqlite::types::ValueRef<'_>) -> serde_json::Value {
    use rusqlite::types::ValueRef;

    match value {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Integer(i) => serde_json::Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
        ValueRef::Text(t) => serde_json::Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => serde_json::Value::String(format!("x'{}'", hex::encode(b))),
    }
}

/// Total ordering over cell values, used to sort the union of row keys.
///
/// Mirrors SQLite's cross-type ordering: NULL sorts before numbers, numbers
/// before text, text before everything else. Numbers compare numerically
/// (so integer 2 and real 2.0 are equal for alignment purposes), strings
/// lexicographically.
pub fn compare_values(a: &serde_json::Value, b: &serde_json::Value) -> Ordering {
    use serde_json::Value;

    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(i), Some(j)) => i.cmp(&j),
            _ => {
                let i = x.as_f64().unwrap_or(0.0);
                let j = y.as_f64().unwrap_or(0.0);
                i.partial_cmp(&j).unwrap_or(Ordering::Equal)
            }
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(v: &serde_json::Value) -> u8 {
    use serde_json::Value;

    match v {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
