use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures the ledger store can surface. Every store operation returns one of
/// these so callers decide what reaches the screen; nothing is swallowed
/// inside the persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file could not be opened or created.
    #[error("failed to open database at {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The per-user data directory could not be resolved.
    #[error("could not locate a home directory for the data folder")]
    DataDir,

    /// The data directory exists as something other than a writable folder,
    /// or could not be created.
    #[error("failed to create data directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The on-disk schema was written by a newer build than this one.
    #[error("database schema version {found} is newer than this build supports")]
    UnsupportedSchema { found: i64 },

    /// Any other SQLite-level failure while running a statement.
    #[error("database query failed")]
    Query(#[from] rusqlite::Error),

    /// The connection did not shut down cleanly.
    #[error("failed to close the database")]
    Close(#[source] rusqlite::Error),
}
