//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 收集指标。
//! 命令行演示不开放 HTTP 端口，通过 [`MetricsHandle::render`] 输出快照。

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// 转账次数（按结果打标签）
pub const TRANSFERS_TOTAL: &str = "ledger_transfers_total";
/// 转账事务耗时
pub const TRANSFER_DURATION_SECONDS: &str = "ledger_transfer_duration_seconds";
/// 博客写操作中执行的后置步骤次数
pub const BLOG_SIDE_EFFECTS_TOTAL: &str = "blog_side_effects_total";

/// Metrics 资源句柄
pub struct MetricsHandle {
    handle: PrometheusHandle,
}

impl MetricsHandle {
    /// 以 Prometheus 文本格式渲染当前指标
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 安装全局 Prometheus recorder 并注册指标描述
pub fn init(service_name: &str) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new()
        .add_global_label("service", service_name)
        .install_recorder()?;

    register_common_metrics();

    Ok(MetricsHandle { handle })
}

fn register_common_metrics() {
    metrics::describe_counter!(TRANSFERS_TOTAL, "Total number of transfer attempts by outcome");
    metrics::describe_histogram!(
        TRANSFER_DURATION_SECONDS,
        "Transfer unit-of-work duration in seconds"
    );
    metrics::describe_counter!(
        BLOG_SIDE_EFFECTS_TOTAL,
        "Post-write side effects applied inside blog transactions"
    );
}
