pub mod comparator;
pub mod connectors;
pub mod data_comparator;
pub mod schema;

use std::path::PathBuf;

use thiserror::Error;

/// Database access failure: the single error kind this tool raises.
///
/// Everything the storage layer can do wrong (missing file, not a SQLite
/// database, locked file, failed query) surfaces through one of these
/// variants and is reported as a single descriptive message at the
/// comparison boundary. No retries, no partial results.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to open database '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to read the table catalog: {source}")]
    Catalog {
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to read table '{table}': {source}")]
    Table {
        table: String,
        #[source]
        source: rusqlite::Error,
    },
}
