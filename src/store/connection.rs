//! Opening, migrating, and closing the embedded SQLite database. The store is
//! an explicitly constructed value with an open/close lifecycle rather than an
//! ambient process-wide handle, so ownership makes the "initialize before use"
//! contract impossible to violate.

use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use rusqlite::Connection;

use super::StoreError;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".debt-tracker";
/// SQLite file name stored inside the application data directory. The name
/// carries over from the original database so the domain stays recognizable.
const DB_FILE_NAME: &str = "DebtDB.sqlite";
/// Current schema version, tracked through `PRAGMA user_version`. Bumping it
/// requires adding a migration step in `migrate` that preserves existing rows.
const SCHEMA_VERSION: i64 = 1;

/// Handle to the ledger database. All persistence goes through methods on this
/// type; dropping or [`close`](DebtStore::close)-ing it ends the session.
pub struct DebtStore {
    pub(super) conn: Connection,
}

impl DebtStore {
    /// Open (creating if absent) the database at the conventional per-user
    /// location, `~/.debt-tracker/DebtDB.sqlite`.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(default_db_path()?)
    }

    /// Open (creating if absent) the database at an explicit path and bring
    /// the schema up to the current version.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        migrate(&conn)?;
        Ok(Self { conn })
    }

    /// Open a throwaway in-memory database. Used by tests and handy for
    /// tooling that wants the schema without touching disk.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        migrate(&conn)?;
        Ok(Self { conn })
    }

    /// Shut the connection down, surfacing any failure to flush. Dropping the
    /// store also closes it, but going through `close` keeps the error visible.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, err)| StoreError::Close(err))
    }
}

/// Walk the schema from whatever version is on disk up to [`SCHEMA_VERSION`].
/// A database written by a newer build is rejected instead of being mangled.
fn migrate(conn: &Connection) -> Result<(), StoreError> {
    let found: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    if found > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema { found });
    }

    if found < 1 {
        // AUTOINCREMENT keeps ids monotonic: a deleted id is never handed out
        // again, even after the highest row is removed.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS debts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                who TEXT NOT NULL,
                cost TEXT NOT NULL,
                why TEXT NOT NULL DEFAULT ''
            )",
            [],
        )?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    }

    Ok(())
}

/// Resolve the absolute path to the SQLite database inside the user's home.
fn default_db_path() -> Result<PathBuf, StoreError> {
    let base_dirs = BaseDirs::new().ok_or(StoreError::DataDir)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
