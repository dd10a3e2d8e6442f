//! 博客服务
//!
//! 用户、文章、评论的写入与关联查询。
//!
//! 写入后的派生更新（用户文章数、文章评论状态）作为显式步骤与主写入放在同一事务内，
//! 任一步失败整体回滚。每个写事务的第一条语句都是写操作，尽早取得写锁。

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use ledgerlab_shared::observability::metrics::BLOG_SIDE_EFFECTS_TOTAL;

use crate::error::{LedgerError, Result};
use crate::models::{
    Comment, CommentStatus, Post, PostCommentCount, PostWithComments, User, UserWithPosts,
};
use crate::repository::BlogRepository;

/// 博客服务
pub struct BlogService {
    pool: SqlitePool,
    repo: BlogRepository,
}

impl BlogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            repo: BlogRepository::new(pool.clone()),
            pool,
        }
    }

    /// 创建用户
    #[instrument(skip(self))]
    pub async fn create_user(&self, name: &str) -> Result<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("用户名不能为空".to_string()));
        }

        let user = self.repo.create_user(name, Utc::now()).await?;
        info!(user_id = user.id, "用户已创建");
        Ok(user)
    }

    /// 创建文章
    ///
    /// 同一事务内：用户文章数加一，然后写入文章。用户不存在时不写入任何数据
    #[instrument(skip(self, content))]
    pub async fn create_post(&self, user_id: i64, title: &str, content: &str) -> Result<Post> {
        if title.trim().is_empty() {
            return Err(LedgerError::Validation("文章标题不能为空".to_string()));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        if BlogRepository::increment_post_count_in_tx(&mut tx, user_id, now).await? == 0 {
            return Err(LedgerError::UserNotFound(user_id));
        }
        metrics::counter!(BLOG_SIDE_EFFECTS_TOTAL, "effect" => "post_count_incremented")
            .increment(1);

        let post = BlogRepository::create_post_in_tx(&mut tx, user_id, title, content, now).await?;

        tx.commit().await?;

        info!(post_id = post.id, "文章已创建");
        Ok(post)
    }

    /// 创建评论
    ///
    /// 同一事务内：文章评论状态置为有评论，然后写入评论
    #[instrument(skip(self, content))]
    pub async fn create_comment(&self, post_id: i64, content: &str) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(LedgerError::Validation("评论内容不能为空".to_string()));
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        if BlogRepository::set_comment_status_in_tx(&mut tx, post_id, CommentStatus::HasComments)
            .await?
            == 0
        {
            return Err(LedgerError::PostNotFound(post_id));
        }

        let comment = BlogRepository::create_comment_in_tx(&mut tx, post_id, content, now).await?;

        tx.commit().await?;

        info!(comment_id = comment.id, "评论已创建");
        Ok(comment)
    }

    /// 删除评论（软删除）
    ///
    /// 同一事务内：软删除评论，统计文章剩余有效评论，为 0 时文章评论状态置为无评论。
    /// 返回删除后文章的评论状态
    #[instrument(skip(self))]
    pub async fn delete_comment(&self, comment_id: i64) -> Result<CommentStatus> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let post_id = BlogRepository::soft_delete_comment_in_tx(&mut tx, comment_id, now)
            .await?
            .ok_or(LedgerError::CommentNotFound(comment_id))?;

        let remaining = BlogRepository::count_comments_in_tx(&mut tx, post_id).await?;
        let status = if remaining == 0 {
            BlogRepository::set_comment_status_in_tx(&mut tx, post_id, CommentStatus::NoComments)
                .await?;
            metrics::counter!(BLOG_SIDE_EFFECTS_TOTAL, "effect" => "comment_status_cleared")
                .increment(1);
            CommentStatus::NoComments
        } else {
            CommentStatus::HasComments
        };

        tx.commit().await?;

        info!(post_id, remaining, status = status.label(), "评论已删除");
        Ok(status)
    }

    /// 按姓名预加载用户的全部文章及评论
    ///
    /// 文章和评论各一次查询，评论按文章分组
    #[instrument(skip(self))]
    pub async fn user_with_posts(&self, name: &str) -> Result<Option<UserWithPosts>> {
        let Some(user) = self.repo.find_user_by_name(name).await? else {
            return Ok(None);
        };

        let posts = self.repo.list_posts_by_user(user.id).await?;
        let post_ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
        let comments = self.repo.list_comments_by_posts(&post_ids).await?;

        let mut grouped: HashMap<i64, Vec<Comment>> = HashMap::new();
        for comment in comments {
            grouped.entry(comment.post_id).or_default().push(comment);
        }

        let posts = posts
            .into_iter()
            .map(|post| PostWithComments {
                comments: grouped.remove(&post.id).unwrap_or_default(),
                post,
            })
            .collect();

        Ok(Some(UserWithPosts { user, posts }))
    }

    /// 评论数最多的文章
    #[instrument(skip(self))]
    pub async fn most_commented_post(&self) -> Result<Option<PostCommentCount>> {
        self.repo.most_commented_post().await
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.repo
            .get_user(id)
            .await?
            .ok_or(LedgerError::UserNotFound(id))
    }

    pub async fn get_post(&self, id: i64) -> Result<Post> {
        self.repo
            .get_post(id)
            .await?
            .ok_or(LedgerError::PostNotFound(id))
    }

    /// 按标题查找文章并加载其有效评论，重名时取 ID 最小者
    #[instrument(skip(self))]
    pub async fn post_with_comments(&self, title: &str) -> Result<Option<PostWithComments>> {
        let Some(post) = self.repo.find_post_by_title(title).await? else {
            return Ok(None);
        };

        let comments = self.repo.list_comments_by_posts(&[post.id]).await?;
        Ok(Some(PostWithComments { post, comments }))
    }
}
