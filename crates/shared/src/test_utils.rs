//! 测试工具模块
//!
//! 提供集成测试所需的数据库配置和连接辅助函数，
//! 用于简化测试代码编写，提高测试的可重复性。

use std::path::Path;

use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::database::Database;
use crate::error::Result;

/// 创建测试用内存数据库配置
pub fn test_database_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connect_timeout_seconds: 5,
        lock_timeout_ms: 1_000,
    }
}

/// 创建指向文件的数据库配置，用于需要多连接并发的测试
pub fn file_database_config(path: &Path) -> DatabaseConfig {
    DatabaseConfig {
        url: format!("sqlite://{}", path.display()),
        max_connections: 8,
        connect_timeout_seconds: 10,
        lock_timeout_ms: 5_000,
    }
}

/// 连接一个全新的内存数据库，并执行给定的建表脚本
pub async fn memory_database(schema: &str) -> Result<Database> {
    let db = Database::connect(&test_database_config()).await?;
    db.run_script(schema).await?;
    Ok(db)
}

/// 生成唯一的测试名称（如用户名、书名），避免测试间数据冲突
pub fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}
