//! Tests for SQLite database connection and migrations.

use crate::db::{
    Database, DbError, PoolOptions, RecordRepository, SqliteDatabase, Transaction,
    TransactionFields,
};

#[tokio::test(flavor = "multi_thread")]
async fn migrate_creates_all_tables() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("Migration should succeed");

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .expect("Query should succeed");

    let expected = ["_sqlx_migrations", "attendance", "students", "transactions"];

    for table in &expected {
        assert!(
            tables.iter().any(|t| t == table),
            "Missing table: {}. Found tables: {:?}",
            table,
            tables
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn migrate_is_idempotent() {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");

    db.migrate().await.expect("First migration should succeed");
    db.migrate().await.expect("Second migration should succeed");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(db.pool())
        .await
        .expect("Query should succeed");

    assert_eq!(count, 1, "Migration should be recorded exactly once");
}

#[tokio::test(flavor = "multi_thread")]
async fn in_memory_database_keeps_data_between_queries() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();

    let fields = TransactionFields {
        description: "coffee".to_string(),
        amount: 3.5,
    };
    let id = db
        .records::<Transaction>()
        .insert(&fields)
        .await
        .expect("Insert should succeed");

    let fetched = db.records::<Transaction>().get(id).await.unwrap();
    assert_eq!(fetched.description, "coffee");
}

#[tokio::test(flavor = "multi_thread")]
async fn open_file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");

    {
        let db = SqliteDatabase::open(&path).await.expect("Open should succeed");
        db.migrate().await.unwrap();
        db.records::<Transaction>()
            .insert(&TransactionFields {
                description: "rent".to_string(),
                amount: 1200.0,
            })
            .await
            .unwrap();
        db.pool().close().await;
    }

    let db = SqliteDatabase::open(&path).await.unwrap();
    db.migrate().await.unwrap();
    let all = db.records::<Transaction>().list().await.unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "rent");
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_accepts_sqlite_url() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("url.db").display());

    let db = SqliteDatabase::connect(&url, &PoolOptions::default())
        .await
        .expect("Connect should succeed");
    db.migrate().await.expect("Migration should succeed");
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_fails_for_unopenable_database() {
    let result =
        SqliteDatabase::connect("sqlite:///missing/dir/tally.db", &PoolOptions::default()).await;
    assert!(matches!(result, Err(DbError::Connection { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn connect_rejects_zero_max_connections() {
    let options = PoolOptions {
        max_connections: 0,
        ..PoolOptions::default()
    };

    let result = SqliteDatabase::connect("sqlite::memory:", &options).await;
    assert!(matches!(result, Err(DbError::Connection { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn ping_fails_after_pool_is_closed() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.ping().await.expect("Open pool should answer");

    db.pool().close().await;
    assert!(matches!(db.ping().await, Err(DbError::Connection { .. })));
}
