//! 博客实体定义
//!
//! 用户 1:N 文章 1:N 评论。`deleted_at` 非空表示已软删除，所有查询和计数都排除软删除的行

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 文章评论状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentStatus {
    /// 有评论（新文章的默认状态）
    #[default]
    HasComments,
    /// 无评论 - 最后一条评论被删除后设置
    NoComments,
}

impl CommentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::HasComments => "有评论",
            Self::NoComments => "无评论",
        }
    }
}

/// 用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    /// 文章数量统计，创建文章时在同一事务内加一
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 文章
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub comment_status: CommentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 评论
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// 文章及其评论（预加载结果）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostWithComments {
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// 用户及其全部文章和评论（预加载结果）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithPosts {
    pub user: User,
    pub posts: Vec<PostWithComments>,
}

impl UserWithPosts {
    pub fn total_comments(&self) -> usize {
        self.posts.iter().map(|p| p.comments.len()).sum()
    }
}

/// 文章及其有效评论数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PostCommentCount {
    #[sqlx(flatten)]
    pub post: Post,
    pub comment_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_status_serialization() {
        assert_eq!(
            serde_json::to_value(CommentStatus::NoComments).unwrap(),
            "NO_COMMENTS"
        );
        assert_eq!(CommentStatus::default(), CommentStatus::HasComments);
        assert_eq!(CommentStatus::NoComments.label(), "无评论");
    }
}
