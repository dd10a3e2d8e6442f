//! 练习服务错误类型
//!
//! 定义服务层的业务错误和系统错误

use ledgerlab_shared::error::SharedError;
use rust_decimal::Decimal;
use thiserror::Error;

/// SQLite 主结果码：数据库被占用
const SQLITE_BUSY: i32 = 5;
/// SQLite 主结果码：表被锁定
const SQLITE_LOCKED: i32 = 6;

/// 服务错误类型
#[derive(Debug, Error)]
pub enum LedgerError {
    // === 转账相关错误 ===
    #[error("转账金额必须为正数且最多两位小数: {0}")]
    InvalidAmount(Decimal),

    #[error("转出账户与转入账户不能相同: account_id={0}")]
    InvalidTransfer(i64),

    #[error("账户不存在: {0}")]
    AccountNotFound(i64),

    #[error("余额不足: 需要 {required}, 可用 {available}")]
    InsufficientBalance {
        required: Decimal,
        available: Decimal,
    },

    #[error("等待账户锁超时，请重试")]
    LockTimeout,

    #[error("账户余额超出可表示范围: account_id={0}")]
    BalanceOverflow(i64),

    // === 博客相关错误 ===
    #[error("用户不存在: {0}")]
    UserNotFound(i64),

    #[error("文章不存在: {0}")]
    PostNotFound(i64),

    #[error("评论不存在: {0}")]
    CommentNotFound(i64),

    // === 系统错误 ===
    #[error("持久化失败: {0}")]
    Persistence(sqlx::Error),

    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("基础设施错误: {0}")]
    Infrastructure(SharedError),
}

/// 服务 Result 类型别名
pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<sqlx::Error> for LedgerError {
    /// 锁竞争类错误（SQLITE_BUSY / SQLITE_LOCKED、连接池等待超时）归为 `LockTimeout`，
    /// 其余原样包装为 `Persistence`
    fn from(err: sqlx::Error) -> Self {
        if is_lock_contention(&err) {
            Self::LockTimeout
        } else {
            Self::Persistence(err)
        }
    }
}

impl From<SharedError> for LedgerError {
    /// 数据库错误按 `sqlx::Error` 的规则分类，其余归为 `Infrastructure`
    fn from(err: SharedError) -> Self {
        match err {
            SharedError::Database(db_err) => db_err.into(),
            other => Self::Infrastructure(other),
        }
    }
}

fn is_lock_contention(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db_err) => {
            // 扩展结果码的低 8 位是主结果码，如 SQLITE_BUSY_SNAPSHOT(517) -> SQLITE_BUSY(5)
            let primary = db_err
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map(|code| code & 0xff);
            matches!(primary, Some(SQLITE_BUSY) | Some(SQLITE_LOCKED))
                || db_err.message().contains("database is locked")
        }
        _ => false,
    }
}

impl LedgerError {
    /// 检查是否为可重试的错误
    ///
    /// 只有锁等待超时可以作为一个全新的事务重试，失败的事务不会留下部分状态
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LockTimeout)
    }

    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(
            self,
            Self::Persistence(_)
                | Self::LockTimeout
                | Self::BalanceOverflow(_)
                | Self::Infrastructure(_)
        )
    }

    /// 获取错误码（用于日志和指标标签）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::InvalidTransfer(_) => "INVALID_TRANSFER",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::LockTimeout => "LOCK_TIMEOUT",
            Self::BalanceOverflow(_) => "BALANCE_OVERFLOW",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::PostNotFound(_) => "POST_NOT_FOUND",
            Self::CommentNotFound(_) => "COMMENT_NOT_FOUND",
            Self::Persistence(_) => "PERSISTENCE_FAILURE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Infrastructure(_) => "INFRASTRUCTURE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        assert!(LedgerError::LockTimeout.is_retryable());
        assert!(!LedgerError::AccountNotFound(1).is_retryable());
        assert!(
            !LedgerError::InsufficientBalance {
                required: Decimal::new(70000, 2),
                available: Decimal::new(60000, 2),
            }
            .is_retryable()
        );
        assert!(!LedgerError::Persistence(sqlx::Error::RowNotFound).is_retryable());
    }

    #[test]
    fn test_pool_timeout_maps_to_lock_timeout() {
        let err: LedgerError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, LedgerError::LockTimeout));

        let err: LedgerError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, LedgerError::Persistence(_)));
    }

    #[test]
    fn test_shared_error_conversion() {
        let err: LedgerError = SharedError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, LedgerError::LockTimeout));

        let err: LedgerError = SharedError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, LedgerError::Persistence(_)));

        let err: LedgerError = SharedError::Internal("boom".to_string()).into();
        assert!(matches!(err, LedgerError::Infrastructure(_)));
        assert_eq!(err.error_code(), "INFRASTRUCTURE_ERROR");
    }

    #[test]
    fn test_error_is_business_error() {
        assert!(LedgerError::InvalidAmount(Decimal::ZERO).is_business_error());
        assert!(LedgerError::CommentNotFound(3).is_business_error());
        assert!(!LedgerError::LockTimeout.is_business_error());
        assert!(!LedgerError::BalanceOverflow(2).is_business_error());
        assert!(!LedgerError::BalanceOverflow(2).is_retryable());
        assert!(!LedgerError::Persistence(sqlx::Error::PoolClosed).is_business_error());
    }

    #[test]
    fn test_error_code() {
        assert_eq!(LedgerError::AccountNotFound(1).error_code(), "ACCOUNT_NOT_FOUND");
        assert_eq!(LedgerError::LockTimeout.error_code(), "LOCK_TIMEOUT");
        assert_eq!(
            LedgerError::Persistence(sqlx::Error::PoolClosed).error_code(),
            "PERSISTENCE_FAILURE"
        );
    }

    #[test]
    fn test_error_display() {
        let err = LedgerError::InsufficientBalance {
            required: Decimal::new(70000, 2),
            available: Decimal::new(60000, 2),
        };
        assert!(err.to_string().contains("700.00"));
        assert!(err.to_string().contains("600.00"));
    }
}
