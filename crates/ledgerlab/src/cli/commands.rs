//! CLI 命令定义
//!
//! 使用 clap derive 宏定义命令行接口结构，每个子命令对应一组数据库访问演示。

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// 数据库访问练习命令行工具
#[derive(Parser, Debug)]
#[command(name = "ledgerlab")]
#[command(version, about = "SQLite 数据库访问练习集")]
#[command(propagate_version = true)]
pub struct Cli {
    /// 配置目录（包含 default.toml 等文件），未指定时取 `CONFIG_DIR` 或 `config`
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 日志级别，覆盖配置文件 (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// 结束时输出 Prometheus 格式的指标
    #[arg(long)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 子命令枚举
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// 学生表的基本增删改查
    Crud,

    /// 账户转账事务（成功与余额不足回滚两个场景）
    Transfer,

    /// 员工查询：部门员工与最高工资
    Employees {
        /// 部门名称
        #[arg(short, long, default_value = "技术部")]
        department: String,
    },

    /// 书籍查询：价格高于阈值的书籍
    Books {
        /// 价格阈值
        #[arg(short, long, default_value = "50")]
        threshold: f64,
    },

    /// 博客模型：关联查询与写入后的派生更新
    Blog,

    /// 依次运行全部演示
    All,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::try_parse_from(["ledgerlab", "transfer"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
        assert!(!cli.print_metrics);
        assert_eq!(cli.command, Commands::Transfer);
    }

    #[test]
    fn test_cli_parse_employees() {
        let cli = Cli::try_parse_from(["ledgerlab", "employees"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Employees {
                department: "技术部".to_string()
            }
        );

        let cli = Cli::try_parse_from(["ledgerlab", "employees", "-d", "市场部"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Employees {
                department: "市场部".to_string()
            }
        );
    }

    #[test]
    fn test_cli_parse_books_and_global_options() {
        let cli = Cli::try_parse_from([
            "ledgerlab",
            "--config",
            "/etc/ledgerlab",
            "-l",
            "debug",
            "--print-metrics",
            "books",
            "--threshold",
            "100",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/etc/ledgerlab")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.print_metrics);
        assert_eq!(cli.command, Commands::Books { threshold: 100.0 });
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["ledgerlab"]).is_err());
        assert!(Cli::try_parse_from(["ledgerlab", "unknown"]).is_err());
    }
}
