use rusqlite::Connection;
use userstore_core::db::schema::users_table_exists;
use userstore_core::db::{
    db_path_in, open_db, open_db_in_memory, open_location, DbError, StoreLocation, APP_DIR_NAME,
    DB_FILE_NAME,
};
use userstore_core::{SqliteUserStore, StoreError, UserRepository};

#[test]
fn open_db_in_memory_creates_users_table() {
    let conn = open_db_in_memory().unwrap();
    assert!(users_table_exists(&conn).unwrap());
}

#[test]
fn open_location_file_creates_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.sqlite");

    let conn = open_location(&StoreLocation::File(path.clone())).unwrap();
    assert!(users_table_exists(&conn).unwrap());
    assert!(path.exists());
}

#[test]
fn opening_same_file_twice_keeps_table_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.sqlite");

    let mut first = SqliteUserStore::open_path(&path).unwrap();
    first.insert_user("Alice", 30, "a@x.com").unwrap();
    first.close().unwrap();

    let second = SqliteUserStore::open_path(&path).unwrap();
    let users = second.fetch_all_users().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Alice");

    let conn = open_db(&path).unwrap();
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'Users';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 1);
}

#[test]
fn open_in_missing_directory_is_store_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("database.sqlite");

    let err = SqliteUserStore::open_path(&path).unwrap_err();
    assert!(matches!(
        err,
        StoreError::StoreUnavailable(Some(DbError::Open { .. }))
    ));
}

#[test]
fn schema_conflict_is_query_failed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.sqlite");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE other (x INTEGER);
         CREATE INDEX Users ON other (x);",
    )
    .unwrap();
    drop(conn);

    let err = SqliteUserStore::open_path(&path).unwrap_err();
    assert!(matches!(err, StoreError::QueryFailed(_)));
}

#[test]
fn from_connection_bootstraps_schema() {
    let conn = Connection::open_in_memory().unwrap();

    let store = SqliteUserStore::from_connection(conn).unwrap();
    store.insert_user("Alice", 30, "a@x.com").unwrap();
    assert_eq!(store.fetch_all_users().unwrap().len(), 1);
}

#[test]
fn undecodable_row_fails_whole_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.sqlite");
    let store = SqliteUserStore::open_path(&path).unwrap();
    store.insert_user("Alice", 30, "a@x.com").unwrap();

    let raw = Connection::open(&path).unwrap();
    raw.execute(
        "INSERT INTO Users (name, age, email) VALUES (NULL, 20, 'n@x.com');",
        [],
    )
    .unwrap();
    drop(raw);

    let err = store.fetch_all_users().unwrap_err();
    assert!(matches!(err, StoreError::QueryFailed(_)));
}

#[test]
fn missing_table_surfaces_query_failed_for_every_operation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("database.sqlite");
    let store = SqliteUserStore::open_path(&path).unwrap();

    let raw = Connection::open(&path).unwrap();
    raw.execute_batch("DROP TABLE Users;").unwrap();
    drop(raw);

    assert!(matches!(
        store.insert_user("Alice", 30, "a@x.com"),
        Err(StoreError::QueryFailed(_))
    ));
    assert!(matches!(
        store.update_user(1, "Alice", 30, "a@x.com"),
        Err(StoreError::QueryFailed(_))
    ));
    assert!(matches!(
        store.fetch_all_users(),
        Err(StoreError::QueryFailed(_))
    ));
    assert!(matches!(
        store.delete_user(1),
        Err(StoreError::QueryFailed(_))
    ));
}

#[test]
fn open_app_dir_creates_app_folder_and_database_file() {
    let base = tempfile::tempdir().unwrap();

    let conn = open_location(&StoreLocation::AppDir(base.path().to_path_buf())).unwrap();
    assert!(users_table_exists(&conn).unwrap());

    let app_dir = base.path().join(APP_DIR_NAME);
    assert!(app_dir.is_dir());
    assert!(app_dir.join(DB_FILE_NAME).is_file());
    assert!(!base.path().join(DB_FILE_NAME).exists());
}

#[test]
fn app_dir_store_keeps_rows_across_reopen() {
    let base = tempfile::tempdir().unwrap();
    let location = StoreLocation::AppDir(base.path().to_path_buf());

    let mut first = SqliteUserStore::open(&location).unwrap();
    first.insert_user("Alice", 30, "a@x.com").unwrap();
    first.close().unwrap();

    let second = SqliteUserStore::open_path(db_path_in(base.path())).unwrap();
    assert_eq!(second.fetch_all_users().unwrap().len(), 1);
}

#[test]
fn app_dir_under_regular_file_is_store_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"plain file").unwrap();

    let err = SqliteUserStore::open(&StoreLocation::AppDir(blocker.clone())).unwrap_err();
    match err {
        StoreError::StoreUnavailable(Some(DbError::CreateDir { path, .. })) => {
            assert_eq!(path, blocker.join(APP_DIR_NAME));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bootstrap_errors_map_to_store_error_kinds() {
    assert!(matches!(
        StoreError::from(DbError::NoStorageDir),
        StoreError::StoreUnavailable(Some(DbError::NoStorageDir))
    ));
    assert!(matches!(
        StoreError::from(DbError::Configure(rusqlite::Error::InvalidQuery)),
        StoreError::StoreUnavailable(Some(DbError::Configure(_)))
    ));
    assert!(matches!(
        StoreError::from(DbError::Schema(rusqlite::Error::InvalidQuery)),
        StoreError::QueryFailed(_)
    ));
}

#[test]
fn configure_failure_is_not_reported_as_schema_failure() {
    let err = DbError::Configure(rusqlite::Error::InvalidQuery);
    assert!(err.is_unavailable());
    assert!(err.to_string().starts_with("failed to configure connection"));
    assert!(!DbError::Schema(rusqlite::Error::InvalidQuery).is_unavailable());
}
