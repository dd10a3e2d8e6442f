//! 演示用样例数据
//!
//! 每个函数写入一组固定数据，供命令行演示和集成测试使用

use ledgerlab_shared::database::Database;
use tracing::info;

use crate::error::Result;
use crate::models::{Account, Money, NewBook, NewEmployee, NewStudent};
use crate::repository::{AccountRepository, BookRepository, EmployeeRepository, StudentRepository};
use crate::service::BlogService;

/// 学生样例：第一条为基本 CRUD 演示对象，最后一条年龄小于 15 岁，供删除演示
pub fn sample_students() -> Vec<NewStudent> {
    vec![
        NewStudent::new("张三", 20, "三年级"),
        NewStudent::new("李四", 17, "二年级"),
        NewStudent::new("王五", 19, "三年级"),
        NewStudent::new("赵六", 14, "一年级"),
    ]
}

pub fn sample_employees() -> Vec<NewEmployee> {
    vec![
        NewEmployee::new("Alice", "技术部", 8000.0),
        NewEmployee::new("Bob", "技术部", 9500.0),
        NewEmployee::new("Charlie", "市场部", 6000.0),
        NewEmployee::new("David", "技术部", 8500.0),
        NewEmployee::new("Eve", "财务部", 7000.0),
    ]
}

pub fn sample_books() -> Vec<NewBook> {
    vec![
        NewBook::new("Go 语言编程", "Alan A. A. Donovan", 89.0),
        NewBook::new("深入理解计算机系统", "Randal E. Bryant", 128.0),
        NewBook::new("代码整洁之道", "Robert C. Martin", 45.5),
        NewBook::new("算法导论", "Thomas H. Cormen", 150.0),
        NewBook::new("Effective Java", "Joshua Bloch", 49.9),
    ]
}

/// 转账演示的初始账户：1 号 1000.00，2 号 500.00
pub fn sample_accounts() -> Vec<Account> {
    vec![
        Account::new(1, Money::from_major(1000)),
        Account::new(2, Money::from_major(500)),
    ]
}

/// 写入学生样例，返回各自 ID
pub async fn seed_students(db: &Database) -> Result<Vec<i64>> {
    let repo = StudentRepository::new(db.pool().clone());
    let mut ids = Vec::new();
    for student in sample_students() {
        ids.push(repo.create(&student).await?);
    }
    Ok(ids)
}

/// 清空账户与流水后写入初始账户（单事务）
pub async fn seed_accounts(db: &Database) -> Result<()> {
    let mut tx = db.pool().begin().await?;
    AccountRepository::reset_in_tx(&mut tx).await?;
    for account in sample_accounts() {
        AccountRepository::create_in_tx(&mut tx, &account).await?;
    }
    tx.commit().await?;

    info!("Accounts seeded");
    Ok(())
}

pub async fn seed_employees(db: &Database) -> Result<u64> {
    EmployeeRepository::new(db.pool().clone())
        .insert_many(&sample_employees())
        .await
}

pub async fn seed_books(db: &Database) -> Result<u64> {
    BookRepository::new(db.pool().clone())
        .insert_many(&sample_books())
        .await
}

/// 博客样例
///
/// - Alice：「SQLx 探索」3 条评论，「Rust 语言技巧」1 条评论
/// - Bob：「SQLx 基础」1 条评论，用于演示删除最后一条评论
/// - Charlie：暂无文章
pub async fn seed_blog(blog: &BlogService) -> Result<()> {
    let alice = blog.create_user("Alice").await?;
    let bob = blog.create_user("Bob").await?;
    blog.create_user("Charlie").await?;

    let explore = blog.create_post(alice.id, "SQLx 探索", "...").await?;
    for content in ["写得好！", "学习了。", "期待续集。"] {
        blog.create_comment(explore.id, content).await?;
    }

    let tips = blog.create_post(alice.id, "Rust 语言技巧", "...").await?;
    blog.create_comment(tips.id, "非常实用！").await?;

    let basics = blog.create_post(bob.id, "SQLx 基础", "...").await?;
    blog.create_comment(basics.id, "入门好文。").await?;

    info!("Blog data seeded");
    Ok(())
}
