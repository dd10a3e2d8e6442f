//! 博客仓储
//!
//! 提供用户、文章、评论的数据访问。所有读取都排除软删除的行

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use crate::error::Result;
use crate::models::{Comment, CommentStatus, Post, PostCommentCount, User};

/// 博客仓储
pub struct BlogRepository {
    pool: SqlitePool,
}

impl BlogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== 用户 ====================

    /// 创建用户，文章数从 0 开始
    pub async fn create_user(&self, name: &str, now: DateTime<Utc>) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, post_count, created_at, updated_at)
            VALUES (?, 0, ?, ?)
            RETURNING id, name, post_count, created_at, updated_at, deleted_at
            "#,
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, post_count, created_at, updated_at, deleted_at
            FROM users
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// 按姓名查找用户，重名时取 ID 最小者
    pub async fn find_user_by_name(&self, name: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, post_count, created_at, updated_at, deleted_at
            FROM users
            WHERE name = ? AND deleted_at IS NULL
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// 在事务中将用户文章数加一
    ///
    /// 返回受影响行数，0 表示用户不存在或已删除
    pub async fn increment_post_count_in_tx(
        tx: &mut SqliteConnection,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET post_count = post_count + 1, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(now)
        .bind(user_id)
        .execute(tx)
        .await?;

        Ok(result.rows_affected())
    }

    // ==================== 文章 ====================

    /// 在事务中创建文章
    pub async fn create_post_in_tx(
        tx: &mut SqliteConnection,
        user_id: i64,
        title: &str,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, title, content, comment_status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, title, content, comment_status, created_at, updated_at, deleted_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(content)
        .bind(CommentStatus::default())
        .bind(now)
        .bind(now)
        .fetch_one(tx)
        .await?;

        Ok(post)
    }

    pub async fn get_post(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, title, content, comment_status, created_at, updated_at, deleted_at
            FROM posts
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    pub async fn find_post_by_title(&self, title: &str) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, title, content, comment_status, created_at, updated_at, deleted_at
            FROM posts
            WHERE title = ? AND deleted_at IS NULL
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// 列出用户的全部文章，按创建顺序
    pub async fn list_posts_by_user(&self, user_id: i64) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, title, content, comment_status, created_at, updated_at, deleted_at
            FROM posts
            WHERE user_id = ? AND deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// 在事务中设置文章评论状态
    ///
    /// 返回匹配行数，0 表示文章不存在或已删除
    pub async fn set_comment_status_in_tx(
        tx: &mut SqliteConnection,
        post_id: i64,
        status: CommentStatus,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE posts SET comment_status = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(status)
        .bind(post_id)
        .execute(tx)
        .await?;

        Ok(result.rows_affected())
    }

    /// 评论数最多的文章
    ///
    /// 用相关子查询统计每篇文章的有效评论数，评论数相同时取 ID 最小者
    pub async fn most_commented_post(&self) -> Result<Option<PostCommentCount>> {
        let post = sqlx::query_as::<_, PostCommentCount>(
            r#"
            SELECT p.id, p.user_id, p.title, p.content, p.comment_status,
                   p.created_at, p.updated_at, p.deleted_at,
                   (SELECT COUNT(*) FROM comments c
                    WHERE c.post_id = p.id AND c.deleted_at IS NULL) AS comment_count
            FROM posts p
            WHERE p.deleted_at IS NULL
            ORDER BY comment_count DESC, p.id ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    // ==================== 评论 ====================

    /// 在事务中创建评论
    pub async fn create_comment_in_tx(
        tx: &mut SqliteConnection,
        post_id: i64,
        content: &str,
        now: DateTime<Utc>,
    ) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, content, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, post_id, content, created_at, updated_at, deleted_at
            "#,
        )
        .bind(post_id)
        .bind(content)
        .bind(now)
        .bind(now)
        .fetch_one(tx)
        .await?;

        Ok(comment)
    }

    /// 批量获取多篇文章的有效评论，按文章、评论 ID 排序
    pub async fn list_comments_by_posts(&self, post_ids: &[i64]) -> Result<Vec<Comment>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            r#"
            SELECT id, post_id, content, created_at, updated_at, deleted_at
            FROM comments
            WHERE deleted_at IS NULL AND post_id IN (
            "#,
        );
        let mut separated = builder.separated(", ");
        for id in post_ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY post_id, id");

        let comments = builder
            .build_query_as::<Comment>()
            .fetch_all(&self.pool)
            .await?;

        Ok(comments)
    }

    /// 在事务中软删除评论
    ///
    /// 返回评论所属文章 ID，评论不存在或已删除时返回 None
    pub async fn soft_delete_comment_in_tx(
        tx: &mut SqliteConnection,
        comment_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>> {
        let post_id = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE comments
            SET deleted_at = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            RETURNING post_id
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(comment_id)
        .fetch_optional(tx)
        .await?;

        Ok(post_id)
    }

    /// 在事务中统计文章的有效评论数
    pub async fn count_comments_in_tx(tx: &mut SqliteConnection, post_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM comments WHERE post_id = ? AND deleted_at IS NULL",
        )
        .bind(post_id)
        .fetch_one(tx)
        .await?;

        Ok(count)
    }
}
