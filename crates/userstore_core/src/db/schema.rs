//! `Users` table definition.

use rusqlite::Connection;

const USERS_TABLE_SQL: &str = include_str!("users.sql");

/// Creates the `Users` table when it is missing. Existing rows are untouched.
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(USERS_TABLE_SQL)
}

/// Returns whether the `Users` table is present on `conn`.
pub fn users_table_exists(conn: &Connection) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'Users'
        );",
        [],
        |row| row.get(0),
    )
}
