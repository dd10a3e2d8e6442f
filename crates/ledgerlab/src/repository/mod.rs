//! 数据库仓储层
//!
//! 提供所有实体的数据访问接口，封装 SQL 操作细节。
//!
//! ## 设计原则
//!
//! - 仓储只负责数据持久化，不包含业务逻辑
//! - 使用 SQLx 进行类型安全的数据库操作
//! - 事务控制由调用方（服务层）决定，事务内操作以 `_in_tx` 结尾并接收连接
//! - 只读查询定义 trait 接口以支持 mock 测试

mod account_repo;
mod blog_repo;
mod book_repo;
mod employee_repo;
mod student_repo;
mod traits;
mod transfer_repo;

pub use account_repo::AccountRepository;
pub use blog_repo::BlogRepository;
pub use book_repo::BookRepository;
pub use employee_repo::EmployeeRepository;
pub use student_repo::StudentRepository;
pub use traits::*;
pub use transfer_repo::TransferRepository;
