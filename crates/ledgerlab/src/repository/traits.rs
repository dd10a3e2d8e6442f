//! 仓储 Trait 定义
//!
//! 定义只读查询接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Book, Employee};

/// 员工仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepositoryTrait: Send + Sync {
    async fn list_by_department(&self, department: &str) -> Result<Vec<Employee>>;
    async fn highest_paid(&self) -> Result<Option<Employee>>;
}

/// 书籍仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepositoryTrait: Send + Sync {
    async fn list_priced_above(&self, threshold: f64) -> Result<Vec<Book>>;
}
