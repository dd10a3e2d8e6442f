//! 员工与书籍查询服务
//!
//! 组合员工、书籍仓储提供只读查询，并生成演示输出所用的文本行

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::{LedgerError, Result};
use crate::models::{Book, Employee};
use crate::repository::{BookRepositoryTrait, EmployeeRepositoryTrait};

/// 部门汇总
#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentSummary {
    pub department: String,
    pub employees: Vec<Employee>,
    pub total_salary: f64,
}

impl DepartmentSummary {
    pub fn headcount(&self) -> usize {
        self.employees.len()
    }

    /// 平均工资，部门无人时为 None
    pub fn average_salary(&self) -> Option<f64> {
        if self.employees.is_empty() {
            None
        } else {
            Some(self.total_salary / self.employees.len() as f64)
        }
    }
}

/// 员工与书籍查询服务
pub struct CatalogQueryService<ER, BR>
where
    ER: EmployeeRepositoryTrait,
    BR: BookRepositoryTrait,
{
    employee_repo: Arc<ER>,
    book_repo: Arc<BR>,
}

impl<ER, BR> CatalogQueryService<ER, BR>
where
    ER: EmployeeRepositoryTrait,
    BR: BookRepositoryTrait,
{
    pub fn new(employee_repo: Arc<ER>, book_repo: Arc<BR>) -> Self {
        Self {
            employee_repo,
            book_repo,
        }
    }

    /// 查询部门全部员工并汇总工资
    #[instrument(skip(self))]
    pub async fn department_summary(&self, department: &str) -> Result<DepartmentSummary> {
        let department = department.trim();
        if department.is_empty() {
            return Err(LedgerError::Validation("部门名称不能为空".to_string()));
        }

        let employees = self.employee_repo.list_by_department(department).await?;
        let total_salary = employees.iter().map(|e| e.salary).sum();
        debug!(count = employees.len(), "部门员工查询完成");

        Ok(DepartmentSummary {
            department: department.to_string(),
            employees,
            total_salary,
        })
    }

    /// 工资最高的员工
    #[instrument(skip(self))]
    pub async fn top_earner(&self) -> Result<Option<Employee>> {
        self.employee_repo.highest_paid().await
    }

    /// 价格高于阈值的书籍，按价格升序
    #[instrument(skip(self))]
    pub async fn books_above(&self, threshold: f64) -> Result<Vec<Book>> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(LedgerError::Validation(format!(
                "价格阈值必须为非负数: {threshold}"
            )));
        }

        self.book_repo.list_priced_above(threshold).await
    }

    /// 部门员工的展示行
    pub async fn department_lines(&self, department: &str) -> Result<Vec<String>> {
        let summary = self.department_summary(department).await?;
        Ok(summary.employees.iter().map(ToString::to_string).collect())
    }

    /// 高价书籍的展示行
    pub async fn book_lines(&self, threshold: f64) -> Result<Vec<String>> {
        let books = self.books_above(threshold).await?;
        Ok(books.iter().map(ToString::to_string).collect())
    }
}
