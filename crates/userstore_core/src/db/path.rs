//! Database file location.
//!
//! # Invariants
//! - The default location is resolved from the per-user documents area only;
//!   environment variables and flags do not change it.
//! - The file always sits in an app-owned subfolder, never directly in a
//!   shared user folder.

use super::{DbError, DbResult};
use std::path::{Path, PathBuf};

/// Subfolder owned by this application inside the per-user storage area.
pub const APP_DIR_NAME: &str = "userstore";

/// File name of the store inside the app folder.
pub const DB_FILE_NAME: &str = "database.sqlite";

/// Where a store connection should point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StoreLocation {
    /// `<documents dir>/userstore/database.sqlite`.
    #[default]
    Default,
    /// App folder rooted at an explicit base instead of the documents dir.
    AppDir(PathBuf),
    /// Explicit file path, mainly for tests and tooling.
    File(PathBuf),
    /// Private in-memory database that disappears with the connection.
    InMemory,
}

/// Resolves the default database path.
///
/// Falls back to the local data directory on platforms that have no
/// documents folder (headless Linux, for example).
pub fn default_db_path() -> DbResult<PathBuf> {
    let base = dirs::document_dir()
        .or_else(dirs::data_local_dir)
        .ok_or(DbError::NoStorageDir)?;
    Ok(db_path_in(&base))
}

/// Returns `<base>/userstore/database.sqlite`.
pub fn db_path_in(base: &Path) -> PathBuf {
    base.join(APP_DIR_NAME).join(DB_FILE_NAME)
}
