//! BlogService 集成测试
//!
//! 验证写入后的派生更新与主写入在同一事务内完成，以及预加载与统计查询

use ledgerlab::error::LedgerError;
use ledgerlab::models::CommentStatus;
use ledgerlab::schema::SCHEMA;
use ledgerlab::seed;
use ledgerlab::service::BlogService;
use ledgerlab_shared::database::Database;
use ledgerlab_shared::test_utils::memory_database;

async fn setup() -> (Database, BlogService) {
    let db = memory_database(SCHEMA).await.unwrap();
    let blog = BlogService::new(db.pool().clone());
    (db, blog)
}

async fn count(db: &Database, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&sql)
        .fetch_one(db.pool())
        .await
        .unwrap()
}

// ==================== 文章数 ====================

#[tokio::test]
async fn test_create_post_increments_post_count() {
    let (_db, blog) = setup().await;
    let user = blog.create_user("Charlie").await.unwrap();
    assert_eq!(user.post_count, 0);

    let post = blog.create_post(user.id, "第一篇", "...").await.unwrap();
    assert_eq!(post.user_id, user.id);
    assert_eq!(post.comment_status, CommentStatus::HasComments);

    blog.create_post(user.id, "第二篇", "...").await.unwrap();

    let user = blog.get_user(user.id).await.unwrap();
    assert_eq!(user.post_count, 2);
}

#[tokio::test]
async fn test_create_post_for_unknown_user_writes_nothing() {
    let (db, blog) = setup().await;

    let err = blog.create_post(404, "孤儿文章", "...").await.unwrap_err();

    assert!(matches!(err, LedgerError::UserNotFound(404)));
    assert_eq!(count(&db, "posts").await, 0);
}

#[tokio::test]
async fn test_create_post_rejects_blank_title() {
    let (db, blog) = setup().await;
    let user = blog.create_user("Alice").await.unwrap();

    let err = blog.create_post(user.id, "  ", "...").await.unwrap_err();

    assert!(matches!(err, LedgerError::Validation(_)));
    assert_eq!(blog.get_user(user.id).await.unwrap().post_count, 0);
    assert_eq!(count(&db, "posts").await, 0);
}

// ==================== 评论状态 ====================

#[tokio::test]
async fn test_deleting_last_comment_clears_status() {
    let (_db, blog) = setup().await;
    let user = blog.create_user("Bob").await.unwrap();
    let post = blog.create_post(user.id, "SQLx 基础", "...").await.unwrap();
    let first = blog.create_comment(post.id, "入门好文。").await.unwrap();
    let second = blog.create_comment(post.id, "收藏了。").await.unwrap();

    let status = blog.delete_comment(first.id).await.unwrap();
    assert_eq!(status, CommentStatus::HasComments);
    assert_eq!(
        blog.get_post(post.id).await.unwrap().comment_status,
        CommentStatus::HasComments
    );

    let status = blog.delete_comment(second.id).await.unwrap();
    assert_eq!(status, CommentStatus::NoComments);
    assert_eq!(
        blog.get_post(post.id).await.unwrap().comment_status,
        CommentStatus::NoComments
    );

    // 再次评论后恢复为有评论
    blog.create_comment(post.id, "又来了。").await.unwrap();
    assert_eq!(
        blog.get_post(post.id).await.unwrap().comment_status,
        CommentStatus::HasComments
    );
}

#[tokio::test]
async fn test_delete_comment_twice() {
    let (_db, blog) = setup().await;
    let user = blog.create_user("Bob").await.unwrap();
    let post = blog.create_post(user.id, "标题", "...").await.unwrap();
    let comment = blog.create_comment(post.id, "内容").await.unwrap();

    blog.delete_comment(comment.id).await.unwrap();
    let err = blog.delete_comment(comment.id).await.unwrap_err();

    assert!(matches!(err, LedgerError::CommentNotFound(id) if id == comment.id));
}

#[tokio::test]
async fn test_comment_on_unknown_post() {
    let (db, blog) = setup().await;

    let err = blog.create_comment(12, "内容").await.unwrap_err();

    assert!(matches!(err, LedgerError::PostNotFound(12)));
    assert_eq!(count(&db, "comments").await, 0);
}

// ==================== 查询 ====================

#[tokio::test]
async fn test_user_with_posts_eager_loads_comments() {
    let (_db, blog) = setup().await;
    seed::seed_blog(&blog).await.unwrap();

    let alice = blog.user_with_posts("Alice").await.unwrap().unwrap();

    assert_eq!(alice.user.post_count, 2);
    assert_eq!(alice.posts.len(), 2);
    assert_eq!(alice.posts[0].post.title, "SQLx 探索");
    assert_eq!(
        alice.posts[0]
            .comments
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>(),
        vec!["写得好！", "学习了。", "期待续集。"]
    );
    assert_eq!(alice.posts[1].comments.len(), 1);
    assert_eq!(alice.total_comments(), 4);

    let charlie = blog.user_with_posts("Charlie").await.unwrap().unwrap();
    assert!(charlie.posts.is_empty());

    assert!(blog.user_with_posts("Nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_soft_deleted_comments_are_hidden() {
    let (_db, blog) = setup().await;
    seed::seed_blog(&blog).await.unwrap();

    let alice = blog.user_with_posts("Alice").await.unwrap().unwrap();
    let target = alice.posts[0].comments[1].id;
    blog.delete_comment(target).await.unwrap();

    let alice = blog.user_with_posts("Alice").await.unwrap().unwrap();
    assert_eq!(alice.posts[0].comments.len(), 2);
    assert!(alice.posts[0].comments.iter().all(|c| c.id != target));
}

#[tokio::test]
async fn test_most_commented_post() {
    let (_db, blog) = setup().await;
    assert!(blog.most_commented_post().await.unwrap().is_none());

    seed::seed_blog(&blog).await.unwrap();

    let top = blog.most_commented_post().await.unwrap().unwrap();
    assert_eq!(top.post.title, "SQLx 探索");
    assert_eq!(top.comment_count, 3);
}

#[tokio::test]
async fn test_most_commented_post_tie_breaks_by_lowest_id() {
    let (_db, blog) = setup().await;
    let user = blog.create_user("Dave").await.unwrap();
    let first = blog.create_post(user.id, "A", "...").await.unwrap();
    let second = blog.create_post(user.id, "B", "...").await.unwrap();
    blog.create_comment(second.id, "x").await.unwrap();
    blog.create_comment(first.id, "y").await.unwrap();

    let top = blog.most_commented_post().await.unwrap().unwrap();
    assert_eq!(top.post.id, first.id);
    assert_eq!(top.comment_count, 1);
}

#[tokio::test]
async fn test_post_with_comments_by_title() {
    let (_db, blog) = setup().await;
    seed::seed_blog(&blog).await.unwrap();

    let basics = blog.post_with_comments("SQLx 基础").await.unwrap().unwrap();
    assert_eq!(basics.post.title, "SQLx 基础");
    assert_eq!(basics.comments.len(), 1);
    assert_eq!(basics.comments[0].content, "入门好文。");

    let bob = blog.user_with_posts("Bob").await.unwrap().unwrap();
    assert_eq!(basics.post.user_id, bob.user.id);

    blog.delete_comment(basics.comments[0].id).await.unwrap();
    let basics = blog.post_with_comments("SQLx 基础").await.unwrap().unwrap();
    assert!(basics.comments.is_empty());
    assert_eq!(basics.post.comment_status, CommentStatus::NoComments);

    assert!(blog.post_with_comments("不存在的文章").await.unwrap().is_none());
}
