//! 数据库连接管理模块
//!
//! 提供 SQLite 连接池管理，支持健康检查、脚本执行和连接配置。

use crate::config::DatabaseConfig;
use crate::error::{Result, SharedError};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, instrument};

/// 数据库连接池包装
///
/// 在进程启动时创建，显式传递给各仓储和服务，关闭时调用 [`Database::close`]
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    /// 创建数据库连接池
    ///
    /// - busy_timeout 取自 `lock_timeout_ms`，写锁等待超过该时长返回 SQLITE_BUSY
    /// - 文件数据库启用 WAL 日志模式
    /// - 内存数据库固定单连接且不回收，否则数据会随连接一起消失
    /// - 文件数据库的父目录不存在时先创建
    #[instrument(skip(config), fields(url = %config.url))]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        info!("Connecting to database...");

        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(config.lock_timeout_ms));

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));

        if config.is_in_memory() {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            ensure_parent_dir(options.get_filename()).await?;
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
            pool_options = pool_options.max_connections(config.max_connections.max(1));
        }

        let pool = pool_options.connect_with(options).await?;

        info!("Database connection pool created");

        Ok(Self { pool })
    }

    /// 获取连接池引用
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 健康检查
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(SharedError::from)
    }

    /// 执行多语句 SQL 脚本（建表等）
    #[instrument(skip(self, script))]
    pub async fn run_script(&self, script: &str) -> Result<()> {
        sqlx::raw_sql(script).execute(&self.pool).await?;
        Ok(())
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

/// 创建数据库文件所在目录（SQLite 只创建文件，不创建目录）
async fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}
