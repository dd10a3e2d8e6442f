//! 转账服务
//!
//! 在单个事务内完成账户间资金划转：
//! - 金额与账户参数校验
//! - 按 ID 升序锁定两个账户
//! - 余额检查
//! - 扣减转出账户、增加转入账户
//! - 追加转账流水
//!
//! ## 转账流程
//!
//! 1. 参数校验 -> 2. 开启事务 -> 3. 锁定账户 -> 4. 存在性检查 -> 5. 余额检查
//!    -> 6. 双向记账 -> 7. 写入流水 -> 8. 提交
//!
//! 任一步失败时事务被丢弃并回滚，其他读者看不到任何中间状态。

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use ledgerlab_shared::observability::metrics::{TRANSFER_DURATION_SECONDS, TRANSFERS_TOTAL};

use crate::error::{LedgerError, Result};
use crate::models::{Account, Money, TransferRecord};
use crate::repository::{AccountRepository, TransferRepository};

/// 转账服务
///
/// 账户余额只允许通过本服务修改
pub struct TransferService {
    pool: SqlitePool,
}

impl TransferService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 从 `source` 向 `destination` 转账 `amount`
    ///
    /// 成功时返回新追加的流水；失败时数据库状态不变，错误携带具体原因：
    /// - `InvalidAmount`：金额不为正或超过两位小数
    /// - `InvalidTransfer`：转出与转入为同一账户
    /// - `AccountNotFound`：任一账户不存在
    /// - `InsufficientBalance`：转出账户余额不足
    /// - `LockTimeout`：等待账户锁超时，可作为新事务重试
    /// - `BalanceOverflow`：入账后余额超出可表示范围
    /// - `Persistence`：其他数据库错误
    #[instrument(skip(self), fields(from = source, to = destination, amount = %amount))]
    pub async fn transfer(
        &self,
        source: i64,
        destination: i64,
        amount: Decimal,
    ) -> Result<TransferRecord> {
        let started = Instant::now();
        let result = self.try_transfer(source, destination, amount).await;

        let outcome = match &result {
            Ok(record) => {
                info!(transfer_id = record.id, "转账成功");
                "success"
            }
            Err(e) => {
                warn!(error_code = e.error_code(), error = %e, "转账失败，事务已回滚");
                e.error_code()
            }
        };
        metrics::counter!(TRANSFERS_TOTAL, "outcome" => outcome).increment(1);
        metrics::histogram!(TRANSFER_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        result
    }

    /// 查询账户
    pub async fn get_account(&self, id: i64) -> Result<Account> {
        AccountRepository::new(self.pool.clone())
            .get(id)
            .await?
            .ok_or(LedgerError::AccountNotFound(id))
    }

    /// 查询与账户相关的最近流水
    pub async fn history(&self, account_id: i64, limit: i64) -> Result<Vec<TransferRecord>> {
        TransferRepository::new(self.pool.clone())
            .list_by_account(account_id, limit)
            .await
    }

    // ==================== 私有方法 ====================

    async fn try_transfer(
        &self,
        source: i64,
        destination: i64,
        amount: Decimal,
    ) -> Result<TransferRecord> {
        let amount = validate_amount(amount)?;
        if source == destination {
            return Err(LedgerError::InvalidTransfer(source));
        }

        self.execute_transfer(source, destination, amount).await
    }

    /// 执行转账事务
    ///
    /// `tx` 在任何 `?` 提前返回时被 drop，sqlx 会自动回滚
    async fn execute_transfer(
        &self,
        source: i64,
        destination: i64,
        amount: Money,
    ) -> Result<TransferRecord> {
        let mut tx = self.pool.begin().await?;

        // 1. 锁定两个账户（按 ID 升序）
        let locked = AccountRepository::lock_pair_in_tx(&mut tx, source, destination).await?;

        // 2. 存在性检查，先转出后转入
        let from = find_account(&locked, source)?;
        let to = find_account(&locked, destination)?;

        // 3. 余额检查
        if from.balance < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount.to_decimal(),
                available: from.balance.to_decimal(),
            });
        }

        // 4. 双向记账
        let from_balance = from
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::BalanceOverflow(source))?;
        let to_balance = to
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow(destination))?;

        AccountRepository::update_balance_in_tx(&mut tx, source, from_balance).await?;
        AccountRepository::update_balance_in_tx(&mut tx, destination, to_balance).await?;

        // 5. 追加流水
        let record =
            TransferRepository::create_in_tx(&mut tx, source, destination, amount, Utc::now())
                .await?;

        // 6. 提交事务
        tx.commit().await?;

        Ok(record)
    }
}

/// 校验转账金额：必须为正，且能用两位小数精确表示
fn validate_amount(amount: Decimal) -> Result<Money> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount));
    }
    Money::from_decimal(amount).ok_or(LedgerError::InvalidAmount(amount))
}

fn find_account(accounts: &[Account], id: i64) -> Result<&Account> {
    accounts
        .iter()
        .find(|a| a.id == id)
        .ok_or(LedgerError::AccountNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_amount() {
        assert_eq!(
            validate_amount(Decimal::from_str("100.00").unwrap()).unwrap(),
            Money::from_major(100)
        );
        assert_eq!(
            validate_amount(Decimal::from_str("0.01").unwrap()).unwrap(),
            Money::from_minor(1)
        );

        assert!(matches!(
            validate_amount(Decimal::ZERO),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_amount(Decimal::from_str("-5").unwrap()),
            Err(LedgerError::InvalidAmount(_))
        ));
        assert!(matches!(
            validate_amount(Decimal::from_str("1.005").unwrap()),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_find_account() {
        let accounts = vec![
            Account::new(1, Money::from_major(1)),
            Account::new(2, Money::from_major(2)),
        ];
        assert_eq!(find_account(&accounts, 2).unwrap().balance, Money::from_major(2));
        assert!(matches!(
            find_account(&accounts, 3),
            Err(LedgerError::AccountNotFound(3))
        ));
    }
}
