//! 学生实体定义

use serde::{Deserialize, Serialize};

/// 学生
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub age: i32,
    /// 年级，如 "三年级"
    pub grade: String,
}

/// 新建学生请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub age: i32,
    pub grade: String,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, age: i32, grade: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            grade: grade.into(),
        }
    }
}
