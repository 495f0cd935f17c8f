//! Connection bootstrap utilities for SQLite.
//!
//! # Invariants
//! - Returned connections have the `Users` table in place.
//! - Every open attempt emits one `event=db_open` start line and one outcome line.

use super::path::{db_path_in, default_db_path, StoreLocation};
use super::schema::ensure_schema;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (creating if absent) a database file and ensures the schema.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with("file", || {
        Connection::open(path).map_err(|source| DbError::Open {
            target: path.display().to_string(),
            source,
        })
    })
}

/// Opens a private in-memory database and ensures the schema.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", || {
        Connection::open_in_memory().map_err(|source| DbError::Open {
            target: ":memory:".to_string(),
            source,
        })
    })
}

/// Opens the connection described by `location`.
///
/// For [`StoreLocation::Default`] and [`StoreLocation::AppDir`] the app
/// folder is created when it does not exist yet.
pub fn open_location(location: &StoreLocation) -> DbResult<Connection> {
    match location {
        StoreLocation::Default => open_in_app_dir(default_db_path()?),
        StoreLocation::AppDir(base) => open_in_app_dir(db_path_in(base)),
        StoreLocation::File(path) => open_db(path),
        StoreLocation::InMemory => open_db_in_memory(),
    }
}

fn open_in_app_dir(path: PathBuf) -> DbResult<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    open_db(path)
}

fn open_with(mode: &str, connect: impl FnOnce() -> DbResult<Connection>) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let result = connect().and_then(|conn| {
        bootstrap_connection(&conn)?;
        Ok(conn)
    });

    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=db_open module=db status=ok mode={mode} duration_ms={duration_ms}"),
        Err(err) => {
            let error_code = match err {
                DbError::Configure(_) => "configure_failed",
                DbError::Schema(_) => "schema_failed",
                _ => "store_unavailable",
            };
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={duration_ms} error_code={error_code} error={err}"
            );
        }
    }
    result
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT).map_err(DbError::Configure)?;
    ensure_schema(conn).map_err(DbError::Schema)
}
