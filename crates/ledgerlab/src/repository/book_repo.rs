//! 书籍仓储

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::traits::BookRepositoryTrait;
use crate::error::Result;
use crate::models::{Book, NewBook};

/// 书籍仓储
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 批量插入书籍（单个事务），返回插入条数
    pub async fn insert_many(&self, books: &[NewBook]) -> Result<u64> {
        if books.is_empty() {
            return Ok(0);
        }

        let mut builder = sqlx::QueryBuilder::new("INSERT INTO books (title, author, price) ");
        builder.push_values(books.iter(), |mut b, book| {
            b.push_bind(&book.title)
                .push_bind(&book.author)
                .push_bind(book.price);
        });

        let mut tx = self.pool.begin().await?;
        let result = builder.build().execute(&mut *tx).await?;
        tx.commit().await?;

        Ok(result.rows_affected())
    }

    /// 查询价格高于阈值的书籍，按价格升序
    pub async fn list_priced_above(&self, threshold: f64) -> Result<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, price
            FROM books
            WHERE price > ?
            ORDER BY price ASC, id ASC
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn list_priced_above(&self, threshold: f64) -> Result<Vec<Book>> {
        self.list_priced_above(threshold).await
    }
}
