//! 统一错误处理模块
//!
//! 定义基础设施层共享的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 基础设施错误类型
#[derive(Debug, Error)]
pub enum SharedError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, SharedError>;

impl SharedError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为可重试错误
    ///
    /// 只有连接池获取超时这类瞬时错误可重试
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Database(sqlx::Error::PoolTimedOut) | Self::Database(sqlx::Error::Io(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = SharedError::Internal("boom".to_string());
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert_eq!(SharedError::Database(sqlx::Error::RowNotFound).code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_is_retryable() {
        assert!(SharedError::Database(sqlx::Error::PoolTimedOut).is_retryable());
        assert!(!SharedError::Database(sqlx::Error::RowNotFound).is_retryable());
        assert!(!SharedError::Internal("boom".to_string()).is_retryable());
    }
}
