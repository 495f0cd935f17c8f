//! SQLite store bootstrap.
//!
//! # Responsibility
//! - Resolve where the database file lives.
//! - Open connections and make sure the `Users` table exists.
//!
//! # Invariants
//! - A connection is never returned before the schema statement succeeded.
//! - The schema statement is create-if-not-exists and safe on every startup.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod open;
pub mod path;
pub mod schema;

pub use open::{open_db, open_db_in_memory, open_location};
pub use path::{db_path_in, default_db_path, StoreLocation, APP_DIR_NAME, DB_FILE_NAME};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// No per-user storage directory could be resolved on this platform.
    NoStorageDir,
    /// The app folder could not be created.
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// SQLite refused to open the file.
    Open {
        target: String,
        source: rusqlite::Error,
    },
    /// The connection opened but rejected its settings (busy timeout).
    Configure(rusqlite::Error),
    /// The connection opened but schema creation failed.
    Schema(rusqlite::Error),
}

impl DbError {
    /// Returns whether this error leaves the process without a usable store.
    ///
    /// Schema failures are reported as query failures instead.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, Self::Schema(_))
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoStorageDir => write!(f, "no per-user storage directory available"),
            Self::CreateDir { path, source } => {
                write!(f, "failed to create `{}`: {source}", path.display())
            }
            Self::Open { target, source } => write!(f, "failed to open `{target}`: {source}"),
            Self::Configure(err) => write!(f, "failed to configure connection: {err}"),
            Self::Schema(err) => write!(f, "failed to ensure schema: {err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoStorageDir => None,
            Self::CreateDir { source, .. } => Some(source),
            Self::Open { source, .. } => Some(source),
            Self::Configure(err) => Some(err),
            Self::Schema(err) => Some(err),
        }
    }
}
