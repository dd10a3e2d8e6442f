//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite 连接串，如 `sqlite::memory:` 或 `sqlite://data/ledgerlab.db`
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_seconds: u64,
    /// 等待写锁的最长时间（毫秒），超时后返回锁等待超时错误
    pub lock_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 5,
            connect_timeout_seconds: 30,
            lock_timeout_ms: 5_000,
        }
    }
}

impl DatabaseConfig {
    /// 是否为内存数据库
    ///
    /// 内存数据库随连接存在，连接池必须固定为单连接
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
        }
    }
}

impl ObservabilityConfig {
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从默认配置目录和环境变量加载配置
    ///
    /// 配置目录取自 `CONFIG_DIR`，未设置时为 `config`
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
        Self::load_from(Path::new(&config_dir), service_name)
    }

    /// 从指定目录加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. {dir}/default.toml（默认配置）
    /// 2. {dir}/{environment}.toml（环境特定配置）
    /// 3. 环境变量（LEDGERLAB_ 前缀，层级用双下划线，如 LEDGERLAB_DATABASE__URL -> database.url）
    pub fn load_from(config_dir: &Path, service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("LEDGERLAB_ENV").unwrap_or_else(|_| "development".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                Environment::with_prefix("LEDGERLAB")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}
