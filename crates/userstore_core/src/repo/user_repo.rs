//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert, update, list and delete rows of the `Users` table.
//! - Release the connection exactly once, on `close` or on drop.
//!
//! # Invariants
//! - Statements are parameterized; values are never spliced into SQL text.
//! - Prepared statements are finalized on every exit path (rusqlite drops them).
//! - Reads either decode every row or fail as a whole.
//! - Log lines carry ids and counts only, never names or emails.

use crate::db::{self, DbError, StoreLocation};
use crate::model::user::{UserId, UserRecord};
use log::{debug, error, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

const USER_SELECT_SQL: &str = "SELECT id, name, age, email FROM Users";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure kinds surfaced by the persistence access component.
#[derive(Debug)]
pub enum StoreError {
    /// No usable connection: opening failed or the store was closed.
    ///
    /// Carries the bootstrap error when the failure happened at open time.
    StoreUnavailable(Option<DbError>),
    /// A statement failed to prepare, execute or decode.
    QueryFailed(rusqlite::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreUnavailable(Some(err)) => write!(f, "store unavailable: {err}"),
            Self::StoreUnavailable(None) => write!(f, "store unavailable: connection closed"),
            Self::QueryFailed(err) => write!(f, "query failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StoreUnavailable(Some(err)) => Some(err),
            Self::StoreUnavailable(None) => None,
            Self::QueryFailed(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::QueryFailed(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        match value {
            DbError::Schema(err) => Self::QueryFailed(err),
            other => Self::StoreUnavailable(Some(other)),
        }
    }
}

/// CRUD contract the presentation layer programs against.
pub trait UserRepository {
    /// Inserts a new row and returns the id the store assigned to it.
    fn insert_user(&self, name: &str, age: i64, email: &str) -> StoreResult<UserId>;
    /// Replaces name, age and email of row `id`. Missing ids are a no-op.
    fn update_user(&self, id: UserId, name: &str, age: i64, email: &str) -> StoreResult<()>;
    /// Returns a fully materialized snapshot of every row, in store order.
    fn fetch_all_users(&self) -> StoreResult<Vec<UserRecord>>;
    /// Removes row `id`. Missing ids are a no-op.
    fn delete_user(&self, id: UserId) -> StoreResult<()>;
    /// Returns row `id`, or `None` when no such row exists.
    fn get_user(&self, id: UserId) -> StoreResult<Option<UserRecord>>;
}

/// SQLite-backed user store owning its connection.
#[derive(Debug)]
pub struct SqliteUserStore {
    conn: Option<Connection>,
}

impl SqliteUserStore {
    /// Opens the store at `location` and ensures the `Users` table.
    ///
    /// # Errors
    /// - `StoreUnavailable` when no connection can be opened.
    /// - `QueryFailed` when the schema statement fails.
    pub fn open(location: &StoreLocation) -> StoreResult<Self> {
        let conn = db::open_location(location)?;
        Ok(Self { conn: Some(conn) })
    }

    pub fn open_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = db::open_db(path)?;
        Ok(Self { conn: Some(conn) })
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(&StoreLocation::InMemory)
    }

    /// Wraps an already opened connection, creating the schema if needed.
    pub fn from_connection(conn: Connection) -> StoreResult<Self> {
        db::schema::ensure_schema(&conn)?;
        Ok(Self { conn: Some(conn) })
    }

    /// Returns whether the connection is still held.
    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Releases the connection. Later operations fail with `StoreUnavailable`.
    ///
    /// Closing an already closed store is a no-op. If SQLite refuses to close
    /// the handle it stays owned by the store and is retried on drop.
    pub fn close(&mut self) -> StoreResult<()> {
        let Some(conn) = self.conn.take() else {
            return Ok(());
        };

        match conn.close() {
            Ok(()) => {
                info!("event=store_close module=repo status=ok");
                Ok(())
            }
            Err((conn, err)) => {
                error!("event=store_close module=repo status=error error={err}");
                self.conn = Some(conn);
                Err(err.into())
            }
        }
    }

    fn conn(&self) -> StoreResult<&Connection> {
        self.conn.as_ref().ok_or(StoreError::StoreUnavailable(None))
    }
}

impl UserRepository for SqliteUserStore {
    fn insert_user(&self, name: &str, age: i64, email: &str) -> StoreResult<UserId> {
        observe("user_insert", || {
            let conn = self.conn()?;
            conn.execute(
                "INSERT INTO Users (name, age, email) VALUES (?1, ?2, ?3);",
                params![name, age, email],
            )?;
            let id = conn.last_insert_rowid();
            debug!("event=user_insert module=repo id={id}");
            Ok(id)
        })
    }

    fn update_user(&self, id: UserId, name: &str, age: i64, email: &str) -> StoreResult<()> {
        observe("user_update", || {
            let changed = self.conn()?.execute(
                "UPDATE Users SET name = ?1, age = ?2, email = ?3 WHERE id = ?4;",
                params![name, age, email, id],
            )?;
            debug!("event=user_update module=repo id={id} rows={changed}");
            Ok(())
        })
    }

    fn fetch_all_users(&self) -> StoreResult<Vec<UserRecord>> {
        observe("user_fetch_all", || {
            let mut stmt = self.conn()?.prepare(&format!("{USER_SELECT_SQL};"))?;
            let users = stmt
                .query_map([], parse_user_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            debug!("event=user_fetch_all module=repo rows={}", users.len());
            Ok(users)
        })
    }

    fn delete_user(&self, id: UserId) -> StoreResult<()> {
        observe("user_delete", || {
            let changed = self
                .conn()?
                .execute("DELETE FROM Users WHERE id = ?1;", [id])?;
            debug!("event=user_delete module=repo id={id} rows={changed}");
            Ok(())
        })
    }

    fn get_user(&self, id: UserId) -> StoreResult<Option<UserRecord>> {
        observe("user_get", || {
            let user = self
                .conn()?
                .query_row(
                    &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
                    [id],
                    parse_user_row,
                )
                .optional()?;
            Ok(user)
        })
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        age: row.get("age")?,
        email: row.get("email")?,
    })
}

fn observe<T>(event: &str, op: impl FnOnce() -> StoreResult<T>) -> StoreResult<T> {
    let started_at = Instant::now();
    let result = op();
    let duration_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event={event} module=repo status=ok duration_ms={duration_ms}"),
        Err(err) => error!(
            "event={event} module=repo status=error duration_ms={duration_ms} error={err}"
        ),
    }
    result
}
