//! Tests for SQLite connections through `DbHandle`.

use modkit_db::{resolve_sqlite_dsn, ConnectOpts, DbEngine, DbError, DbHandle};
use sea_orm::{ConnectionTrait, DbBackend, Statement};
use tempfile::TempDir;

async fn scalar_string(db: &DbHandle, sql: &str) -> String {
    let row = db
        .sea()
        .query_one(Statement::from_string(DbBackend::Sqlite, sql.to_string()))
        .await
        .unwrap()
        .unwrap();
    row.try_get_by_index::<String>(0).unwrap()
}

#[tokio::test]
async fn test_in_memory_database_is_shared_across_queries() {
    let db = DbHandle::connect("sqlite::memory:", ConnectOpts::default())
        .await
        .unwrap();
    assert_eq!(db.engine(), DbEngine::Sqlite);

    let conn = db.sea();
    conn.execute_unprepared("CREATE TABLE t (id INTEGER PRIMARY KEY, name TEXT NOT NULL)")
        .await
        .unwrap();
    conn.execute_unprepared("INSERT INTO t (name) VALUES ('a')")
        .await
        .unwrap();

    // A second handle clone must see the same database.
    assert_eq!(scalar_string(&db, "SELECT name FROM t").await, "a");

    db.close().await;
}

#[tokio::test]
async fn test_file_database_creates_parent_dirs_and_file() {
    let temp_dir = TempDir::new().unwrap();
    let dsn = resolve_sqlite_dsn("sqlite://nested/dir/passports.db", temp_dir.path());
    let db_path = temp_dir.path().join("nested/dir/passports.db");

    let db = DbHandle::connect(&dsn, ConnectOpts::default()).await.unwrap();
    db.sea()
        .execute_unprepared("CREATE TABLE t (id INTEGER PRIMARY KEY)")
        .await
        .unwrap();

    assert!(db_path.exists(), "database file should exist at {db_path:?}");
    db.close().await;
}

#[tokio::test]
async fn test_dsn_pragmas_are_applied() {
    let temp_dir = TempDir::new().unwrap();
    let dsn = resolve_sqlite_dsn("sqlite://pragmas.db?journal_mode=DELETE", temp_dir.path());

    let db = DbHandle::connect(&dsn, ConnectOpts::default()).await.unwrap();
    let mode = scalar_string(&db, "PRAGMA journal_mode").await;
    assert_eq!(mode.to_lowercase(), "delete");
    db.close().await;
}

#[tokio::test]
async fn test_file_database_defaults_to_wal() {
    let temp_dir = TempDir::new().unwrap();
    let dsn = resolve_sqlite_dsn("sqlite://wal.db", temp_dir.path());

    let db = DbHandle::connect(&dsn, ConnectOpts::default()).await.unwrap();
    let mode = scalar_string(&db, "PRAGMA journal_mode").await;
    assert_eq!(mode.to_lowercase(), "wal");
    db.close().await;
}

#[tokio::test]
async fn test_missing_parent_without_create_dirs_fails() {
    let temp_dir = TempDir::new().unwrap();
    let dsn = resolve_sqlite_dsn("sqlite://absent/dir/db.sqlite", temp_dir.path());
    let opts = ConnectOpts {
        create_sqlite_dirs: false,
        ..Default::default()
    };

    let err = DbHandle::connect(&dsn, opts).await.unwrap_err();
    assert!(matches!(err, DbError::Sqlx(_)), "got {err:?}");
}

#[tokio::test]
async fn test_unknown_scheme_is_rejected() {
    let err = DbHandle::connect("mysql://localhost/db", ConnectOpts::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::UnknownDsn(_)));
}
