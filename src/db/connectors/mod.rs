pub mod sqlite;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::db::schema::{Row, TableInfo};
use crate::db::DbError;

/// Connection configuration for a file-backed database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub file_path: PathBuf,
    pub read_only: bool,
}

impl ConnectionConfig {
    /// Read-only configuration for the given path. Comparison never writes.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            read_only: true,
        }
    }
}

/// The core trait a database reader must implement.
///
/// A connector is opened for a single comparison and dropped afterwards;
/// nothing is shared across invocations.
pub trait DatabaseConnector {
    /// List the table names declared in the database's catalog, sorted by
    /// name. Only objects with the catalog's `table` type marker are
    /// returned; no further filtering is applied.
    fn list_tables(&self) -> Result<Vec<String>, DbError>;

    /// Get the ordered column descriptor list for a table.
    fn table_info(&self, table_name: &str) -> Result<TableInfo, DbError>;

    /// Fetch the full row set of a table, in the storage engine's natural
    /// iteration order. Everything is loaded into memory; no streaming.
    fn fetch_rows(&self, table_name: &str) -> Result<Vec<Row>, DbError>;

    /// A human-readable label for this database (shown in results).
    fn label(&self) -> String;
}
