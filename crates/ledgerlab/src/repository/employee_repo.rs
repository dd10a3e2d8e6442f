//! 员工仓储
//!
//! 演示查询结果到结构体的映射：多行映射为 Vec，单行映射为 Option

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::traits::EmployeeRepositoryTrait;
use crate::error::Result;
use crate::models::{Employee, NewEmployee};

/// 员工仓储
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 批量插入员工（单个事务）
    ///
    /// 返回插入条数
    pub async fn insert_many(&self, employees: &[NewEmployee]) -> Result<u64> {
        if employees.is_empty() {
            return Ok(0);
        }

        let mut builder =
            sqlx::QueryBuilder::new("INSERT INTO employees (name, department, salary) ");
        builder.push_values(employees.iter(), |mut b, e| {
            b.push_bind(&e.name)
                .push_bind(&e.department)
                .push_bind(e.salary);
        });

        let mut tx = self.pool.begin().await?;
        let result = builder.build().execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }

    /// 查询某部门的全部员工
    pub async fn list_by_department(&self, department: &str) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, department, salary
            FROM employees
            WHERE department = ?
            ORDER BY id
            "#,
        )
        .bind(department)
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    /// 查询工资最高的员工，工资相同时取 ID 最小者
    pub async fn highest_paid(&self) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, name, department, salary
            FROM employees
            ORDER BY salary DESC, id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }
}

#[async_trait]
impl EmployeeRepositoryTrait for EmployeeRepository {
    async fn list_by_department(&self, department: &str) -> Result<Vec<Employee>> {
        self.list_by_department(department).await
    }

    async fn highest_paid(&self) -> Result<Option<Employee>> {
        self.highest_paid().await
    }
}
