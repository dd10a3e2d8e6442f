//! 账户仓储
//!
//! 提供账户的数据访问，支持事务内的排他锁定

use sqlx::{SqliteConnection, SqlitePool};

use crate::error::Result;
use crate::models::{Account, Money};

/// 账户仓储
pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== 查询操作 ====================

    /// 根据 ID 获取账户
    pub async fn get(&self, id: i64) -> Result<Option<Account>> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, balance
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// 列出所有账户
    pub async fn list(&self) -> Result<Vec<Account>> {
        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, balance
            FROM accounts
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    /// 所有账户余额之和
    pub async fn total_balance(&self) -> Result<Money> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(balance), 0) FROM accounts")
            .fetch_one(&self.pool)
            .await?;

        Ok(Money::from_minor(total))
    }

    // ==================== 写入操作 ====================

    /// 以指定 ID 创建账户（种子数据 / 管理操作）
    pub async fn create(&self, account: &Account) -> Result<()> {
        sqlx::query("INSERT INTO accounts (id, balance) VALUES (?, ?)")
            .bind(account.id)
            .bind(account.balance)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// 直接设置账户余额（管理操作，不产生流水）
    pub async fn set_balance(&self, id: i64, balance: Money) -> Result<u64> {
        let result = sqlx::query("UPDATE accounts SET balance = ? WHERE id = ?")
            .bind(balance)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // ==================== 事务操作 ====================

    /// 在事务中锁定两个账户并读取
    ///
    /// SQLite 没有 `SELECT ... FOR UPDATE`，事务的第一条语句改为对两行的空写入，
    /// 借此拿到数据库写锁，效果等同于行级排他锁：其他转账的锁定语句会在此阻塞，
    /// 直到本事务提交或回滚，等待上限为连接的 busy_timeout。
    /// 该语句必须是事务内第一条语句，先读后写在 WAL 模式下会因快照过期直接失败。
    ///
    /// 返回按 ID 升序排列的已存在账户，不存在的账户不在结果中
    pub async fn lock_pair_in_tx(
        tx: &mut SqliteConnection,
        first: i64,
        second: i64,
    ) -> Result<Vec<Account>> {
        let (low, high) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };

        sqlx::query("UPDATE accounts SET balance = balance WHERE id IN (?, ?)")
            .bind(low)
            .bind(high)
            .execute(&mut *tx)
            .await?;

        let accounts = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, balance
            FROM accounts
            WHERE id IN (?, ?)
            ORDER BY id
            "#,
        )
        .bind(low)
        .bind(high)
        .fetch_all(&mut *tx)
        .await?;

        Ok(accounts)
    }

    /// 在事务中写入账户新余额
    pub async fn update_balance_in_tx(
        tx: &mut SqliteConnection,
        id: i64,
        balance: Money,
    ) -> Result<()> {
        sqlx::query("UPDATE accounts SET balance = ? WHERE id = ?")
            .bind(balance)
            .bind(id)
            .execute(tx)
            .await?;

        Ok(())
    }

    /// 在事务中清空账户和转账流水（演示数据重置）
    pub async fn reset_in_tx(tx: &mut SqliteConnection) -> Result<()> {
        sqlx::query("DELETE FROM transfers")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM accounts")
            .execute(&mut *tx)
            .await?;

        Ok(())
    }

    /// 在事务中创建账户
    pub async fn create_in_tx(tx: &mut SqliteConnection, account: &Account) -> Result<()> {
        sqlx::query("INSERT INTO accounts (id, balance) VALUES (?, ?)")
            .bind(account.id)
            .bind(account.balance)
            .execute(tx)
            .await?;

        Ok(())
    }
}
