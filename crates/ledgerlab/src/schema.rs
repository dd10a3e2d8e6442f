//! 建表脚本
//!
//! 所有表使用 `CREATE TABLE IF NOT EXISTS`，可重复执行

use ledgerlab_shared::database::Database;

use crate::error::Result;

/// 完整建表脚本
pub const SCHEMA: &str = include_str!("../sql/schema.sql");

/// 在给定数据库上创建所有表和索引
pub async fn init_schema(db: &Database) -> Result<()> {
    db.run_script(SCHEMA).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlab_shared::test_utils::test_database_config;

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let db = Database::connect(&test_database_config()).await.unwrap();
        init_schema(&db).await.unwrap();
        init_schema(&db).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();

        assert_eq!(
            tables,
            vec![
                "accounts", "books", "comments", "employees", "posts", "students", "transfers",
                "users"
            ]
        );
    }
}
