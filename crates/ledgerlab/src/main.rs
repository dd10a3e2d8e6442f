//! ledgerlab 命令行入口
//!
//! 加载配置、初始化可观测性后执行子命令。

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ledgerlab::cli::{Cli, CommandRunner};
use ledgerlab_shared::{config::AppConfig, observability};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(dir) => AppConfig::load_from(dir, "ledgerlab"),
        None => AppConfig::load("ledgerlab"),
    }
    .context("加载配置失败")?;
    if let Some(level) = &cli.log_level {
        config.observability.log_level = level.clone();
    }
    if cli.print_metrics {
        config.observability.metrics_enabled = true;
    }

    let guard = observability::init(&config.service_name, &config.observability)?;

    info!(
        environment = %config.environment,
        database = %config.database.url,
        command = ?cli.command,
        "Starting ledgerlab"
    );

    CommandRunner::new(config.database.clone())
        .run(&cli.command)
        .await?;

    if cli.print_metrics {
        if let Some(rendered) = guard.render_metrics() {
            println!("\n--- 指标 ---");
            print!("{rendered}");
        }
    }

    Ok(())
}
