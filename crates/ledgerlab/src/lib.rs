//! 数据库访问练习集
//!
//! 以嵌入式 SQLite 为存储，演示常见的关系型数据库访问模式。
//!
//! ## 核心功能
//!
//! - **基本 CRUD**：学生表的插入、条件查询、更新、删除
//! - **转账事务**：加锁读取两个账户、校验余额、双向记账并写入审计流水，整体原子提交
//! - **结构体映射**：员工、书籍查询结果映射为强类型结构体
//! - **博客模型**：用户/文章/评论一对多关联，预加载查询，写入后的派生更新在同一事务内显式执行
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `schema`: 建表脚本
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层
//! - `seed`: 演示用样例数据
//! - `cli`: 命令行演示入口

pub mod cli;
pub mod error;
pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;
pub mod service;

pub use error::{LedgerError, Result};
pub use models::*;
pub use repository::{
    AccountRepository, BlogRepository, BookRepository, EmployeeRepository, StudentRepository,
    TransferRepository,
};
pub use service::{BlogService, CatalogQueryService, TransferService};
