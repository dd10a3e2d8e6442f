//! 转账流水仓储
//!
//! 流水只追加不修改，提供写入与追溯查询

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::error::Result;
use crate::models::{Money, TransferRecord};

/// 转账流水仓储
pub struct TransferRepository {
    pool: SqlitePool,
}

impl TransferRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 在事务中追加一条流水
    ///
    /// 返回带自增 ID 的完整记录
    pub async fn create_in_tx(
        tx: &mut SqliteConnection,
        from_account_id: i64,
        to_account_id: i64,
        amount: Money,
        created_at: DateTime<Utc>,
    ) -> Result<TransferRecord> {
        let record = sqlx::query_as::<_, TransferRecord>(
            r#"
            INSERT INTO transfers (from_account_id, to_account_id, amount, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, from_account_id, to_account_id, amount, created_at
            "#,
        )
        .bind(from_account_id)
        .bind(to_account_id)
        .bind(amount)
        .bind(created_at)
        .fetch_one(tx)
        .await?;

        Ok(record)
    }

    /// 按创建顺序列出全部流水
    pub async fn list(&self) -> Result<Vec<TransferRecord>> {
        let records = sqlx::query_as::<_, TransferRecord>(
            r#"
            SELECT id, from_account_id, to_account_id, amount, created_at
            FROM transfers
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// 列出与某账户相关的流水（转出或转入），最新的在前
    pub async fn list_by_account(&self, account_id: i64, limit: i64) -> Result<Vec<TransferRecord>> {
        let records = sqlx::query_as::<_, TransferRecord>(
            r#"
            SELECT id, from_account_id, to_account_id, amount, created_at
            FROM transfers
            WHERE from_account_id = ? OR to_account_id = ?
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(account_id)
        .bind(account_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transfers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SCHEMA;
    use ledgerlab_shared::test_utils::memory_database;

    #[tokio::test]
    async fn test_ids_increase_in_creation_order() {
        let db = memory_database(SCHEMA).await.unwrap();
        let repo = TransferRepository::new(db.pool().clone());

        let mut tx = db.pool().begin().await.unwrap();
        let first =
            TransferRepository::create_in_tx(&mut tx, 1, 2, Money::from_major(5), Utc::now())
                .await
                .unwrap();
        let second =
            TransferRepository::create_in_tx(&mut tx, 2, 1, Money::from_major(3), Utc::now())
                .await
                .unwrap();
        tx.commit().await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(repo.count().await.unwrap(), 2);

        let by_account = repo.list_by_account(1, 10).await.unwrap();
        assert_eq!(by_account.len(), 2);
        assert_eq!(by_account[0].id, second.id);
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected_by_schema() {
        let db = memory_database(SCHEMA).await.unwrap();

        let mut tx = db.pool().begin().await.unwrap();
        let result =
            TransferRepository::create_in_tx(&mut tx, 1, 2, Money::ZERO, Utc::now()).await;
        assert!(result.is_err());
    }
}
