//! test_utils 模块的集成测试
//!
//! 验证测试工具模块的功能正确性

use ledgerlab_shared::test_utils::*;

#[test]
fn test_memory_config_is_single_connection() {
    let config = test_database_config();
    assert!(config.is_in_memory());
    assert_eq!(config.max_connections, 1);
}

#[test]
fn test_file_config_points_to_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    let config = file_database_config(&path);

    assert!(!config.is_in_memory());
    assert!(config.url.starts_with("sqlite://"));
    assert!(config.url.ends_with("ledger.db"));
}

#[test]
fn test_unique_name() {
    let a = unique_name("user");
    let b = unique_name("user");
    assert!(a.starts_with("user-"));
    assert_ne!(a, b);
}

#[tokio::test]
async fn test_memory_database_runs_schema() {
    let db = memory_database("CREATE TABLE probe (id INTEGER PRIMARY KEY, name TEXT NOT NULL);")
        .await
        .unwrap();

    sqlx::query("INSERT INTO probe (name) VALUES (?)")
        .bind("x")
        .execute(db.pool())
        .await
        .unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM probe")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_memory_databases_are_isolated() {
    let schema = "CREATE TABLE probe (id INTEGER PRIMARY KEY);";
    let first = memory_database(schema).await.unwrap();
    let second = memory_database(schema).await.unwrap();

    sqlx::query("INSERT INTO probe (id) VALUES (1)")
        .execute(first.pool())
        .await
        .unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM probe")
        .fetch_one(second.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}
