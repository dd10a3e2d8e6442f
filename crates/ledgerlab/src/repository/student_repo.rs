//! 学生仓储
//!
//! 基本 CRUD：插入、条件查询、更新、删除

use sqlx::{Row, SqlitePool};

use crate::error::Result;
use crate::models::{NewStudent, Student};

/// 学生仓储
pub struct StudentRepository {
    pool: SqlitePool,
}

impl StudentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 插入学生记录
    ///
    /// 返回新记录的 ID
    pub async fn create(&self, student: &NewStudent) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO students (name, age, grade)
            VALUES (?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&student.name)
        .bind(student.age)
        .bind(&student.grade)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    pub async fn get(&self, id: i64) -> Result<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, name, age, grade FROM students WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// 查询年龄大于 `age` 的学生
    pub async fn list_older_than(&self, age: i32) -> Result<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT id, name, age, grade
            FROM students
            WHERE age > ?
            ORDER BY id
            "#,
        )
        .bind(age)
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    pub async fn list(&self) -> Result<Vec<Student>> {
        let students =
            sqlx::query_as::<_, Student>("SELECT id, name, age, grade FROM students ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(students)
    }

    /// 更新指定学生的年级，返回受影响行数
    pub async fn update_grade(&self, id: i64, grade: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE students SET grade = ? WHERE id = ?")
            .bind(grade)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// 按姓名更新年级，返回受影响行数
    pub async fn update_grade_by_name(&self, name: &str, grade: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE students SET grade = ? WHERE name = ?")
            .bind(grade)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// 删除年龄小于 `age` 的学生，返回删除行数
    pub async fn delete_younger_than(&self, age: i32) -> Result<u64> {
        let result = sqlx::query("DELETE FROM students WHERE age < ?")
            .bind(age)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
