//! 服务层
//!
//! 实现业务逻辑，协调仓储层并控制事务边界。
//!
//! ## 模块结构
//!
//! - `transfer_service`: 账户转账（写操作，单事务）
//! - `blog_service`: 博客写入与关联查询
//! - `catalog_service`: 员工与书籍查询（只读操作）

pub mod blog_service;
pub mod catalog_service;
pub mod transfer_service;

pub use blog_service::BlogService;
pub use catalog_service::{CatalogQueryService, DepartmentSummary};
pub use transfer_service::TransferService;
