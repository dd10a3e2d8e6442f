//! CLI 模块
//!
//! 提供命令行接口，支持以下演示：
//!
//! - `crud` - 学生表增删改查
//! - `transfer` - 账户转账事务
//! - `employees` - 员工查询映射
//! - `books` - 书籍查询映射
//! - `blog` - 博客关联查询与派生更新
//! - `all` - 全部演示
//!
//! # 使用示例
//!
//! ```bash
//! ledgerlab transfer
//! ledgerlab --config ./config employees -d 市场部
//! LEDGERLAB_DATABASE__URL=sqlite://demo.db ledgerlab all
//! ```

pub mod commands;
pub mod runner;

pub use commands::{Cli, Commands};
pub use runner::CommandRunner;
