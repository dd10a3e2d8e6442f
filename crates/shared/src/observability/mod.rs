//! 统一可观测性模块
//!
//! 提供 logging、metrics 的统一初始化。
//! 所有入口通过单一入口点配置可观测性，确保一致的日志格式和指标命名。

pub mod metrics;
pub mod tracing;

use ::tracing::info;
use anyhow::Result;

use crate::config::ObservabilityConfig;

/// 可观测性资源守卫
///
/// 持有指标 recorder 的句柄，drop 时输出关闭日志。
pub struct ObservabilityGuard {
    metrics_handle: Option<metrics::MetricsHandle>,
}

impl ObservabilityGuard {
    /// 创建一个空的 Guard（用于测试或禁用可观测性时）
    pub fn empty() -> Self {
        Self {
            metrics_handle: None,
        }
    }

    /// 渲染当前指标快照（Prometheus 文本格式），未启用指标时返回 None
    pub fn render_metrics(&self) -> Option<String> {
        self.metrics_handle.as_ref().map(|h| h.render())
    }
}

impl Drop for ObservabilityGuard {
    fn drop(&mut self) {
        info!("Shutting down observability...");
    }
}

/// 统一初始化可观测性
///
/// 初始化顺序：
/// 1. Tracing（日志）
/// 2. Metrics（仅在 `metrics_enabled` 时安装 recorder）
///
/// # Example
///
/// ```ignore
/// use ledgerlab_shared::{config::AppConfig, observability};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = AppConfig::load("ledgerlab")?;
///     let _guard = observability::init(&config.service_name, &config.observability)?;
///     Ok(())
/// }
/// ```
pub fn init(service_name: &str, config: &ObservabilityConfig) -> Result<ObservabilityGuard> {
    tracing::init(config)?;

    let metrics_handle = if config.metrics_enabled {
        Some(metrics::init(service_name)?)
    } else {
        None
    };

    info!(
        service = %service_name,
        log_format = %config.log_format,
        metrics_enabled = config.metrics_enabled,
        "Observability initialized"
    );

    Ok(ObservabilityGuard { metrics_handle })
}
