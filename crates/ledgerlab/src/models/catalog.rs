//! 员工与书籍实体定义
//!
//! 查询结果通过 `sqlx::FromRow` 按列名映射到结构体字段，列类型与字段类型不兼容时解码报错

use std::fmt;

use serde::{Deserialize, Serialize};

/// 员工
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub salary: f64,
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, 姓名: {}, 部门: {}, 工资: {:.2}",
            self.id, self.name, self.department, self.salary
        )
    }
}

/// 新建员工请求
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub name: String,
    pub department: String,
    pub salary: f64,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, department: impl Into<String>, salary: f64) -> Self {
        Self {
            name: name.into(),
            department: department.into(),
            salary,
        }
    }
}

/// 书籍
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, 书名: {}, 作者: {}, 价格: {:.2}",
            self.id, self.title, self.author, self.price
        )
    }
}

/// 新建书籍请求
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub price: f64,
}

impl NewBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, price: f64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_display() {
        let employee = Employee {
            id: 2,
            name: "Bob".to_string(),
            department: "技术部".to_string(),
            salary: 9500.0,
        };
        assert_eq!(employee.to_string(), "ID: 2, 姓名: Bob, 部门: 技术部, 工资: 9500.00");
    }

    #[test]
    fn test_book_display() {
        let book = Book {
            id: 3,
            title: "代码整洁之道".to_string(),
            author: "Robert C. Martin".to_string(),
            price: 45.5,
        };
        assert_eq!(
            book.to_string(),
            "ID: 3, 书名: 代码整洁之道, 作者: Robert C. Martin, 价格: 45.50"
        );
    }
}
