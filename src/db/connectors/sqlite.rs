use rusqlite::{Connection, OpenFlags};

use super::{ConnectionConfig, DatabaseConnector};
use crate::db::schema::{value_from_sql, ColumnInfo, Row, TableInfo};
use crate::db::DbError;
use crate::security::quote_identifier;

/// SQLite connector using rusqlite.
pub struct SqliteConnector {
    config: ConnectionConfig,
    conn: Connection,
}

impl SqliteConnector {
    /// Open the database file described by `config`.
    ///
    /// Opening read-only fails up front on a missing file, and the
    /// schema-version probe rejects files that are not SQLite databases
    /// before any comparison work starts.
    pub fn open(config: ConnectionConfig) -> Result<Self, DbError> {
        let flags = if config.read_only {
            OpenFlags::SQLITE_OPEN_READ_ONLY
        } else {
            OpenFlags::default()
        };

        let conn = Connection::open_with_flags(&config.file_path, flags).map_err(|source| {
            DbError::Open {
                path: config.file_path.clone(),
                source,
            }
        })?;

        conn.query_row("PRAGMA schema_version", [], |_| Ok(()))
            .map_err(|source| DbError::Open {
                path: config.file_path.clone(),
                source,
            })?;

        log::debug!("opened database {}", config.file_path.display());

        Ok(Self { config, conn })
    }
}

impl DatabaseConnector for SqliteConnector {
    fn list_tables(&self) -> Result<Vec<String>, DbError> {
        let catalog = |source| DbError::Catalog { source };

        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .map_err(catalog)?;

        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(catalog)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(catalog)?;

        log::debug!(
            "{} tables in {}",
            names.len(),
            self.config.file_path.display()
        );
        Ok(names)
    }

    fn table_info(&self, table_name: &str) -> Result<TableInfo, DbError> {
        let table_err = |source| DbError::Table {
            table: table_name.to_string(),
            source,
        };

        let sql = format!("PRAGMA table_info({})", quote_identifier(table_name));
        let mut stmt = self.conn.prepare(&sql).map_err(table_err)?;

        // PRAGMA table_info columns: cid, name, type, notnull, dflt_value, pk
        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    ordinal_position: row.get(0)?,
                    name: row.get(1)?,
                    data_type: row.get(2)?,
                    is_nullable: row.get::<_, i64>(3)? == 0,
                    default_value: row.get(4)?,
                    is_primary_key: row.get::<_, i64>(5)? > 0,
                })
            })
            .map_err(table_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(table_err)?;

        Ok(TableInfo {
            table_name: table_name.to_string(),
            columns,
        })
    }

    fn fetch_rows(&self, table_name: &str) -> Result<Vec<Row>, DbError> {
        let table_err = |source| DbError::Table {
            table: table_name.to_string(),
            source,
        };

        // No ORDER BY: rows arrive in the engine's natural iteration order.
        // The comparison downstream is key-aligned, so order does not matter.
        let sql = format!("SELECT * FROM {}", quote_identifier(table_name));
        let mut stmt = self.conn.prepare(&sql).map_err(table_err)?;
        let column_count = stmt.column_count();

        let rows = stmt
            .query_map([], |row| {
                let mut values = Row::with_capacity(column_count);
                for i in 0..column_count {
                    values.push(value_from_sql(row.get_ref(i)?));
                }
                Ok(values)
            })
            .map_err(table_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(table_err)?;

        Ok(rows)
    }

    fn label(&self) -> String {
        self.config.file_path.display().to_string()
    }
}
