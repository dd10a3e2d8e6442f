//! 命令执行器
//!
//! 负责执行各 CLI 子命令的具体逻辑：打开数据库、建表、写入样例数据、打印结果、关闭连接。

use std::sync::Arc;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::info;

use ledgerlab_shared::config::DatabaseConfig;
use ledgerlab_shared::database::Database;

use crate::cli::Commands;
use crate::repository::{BookRepository, EmployeeRepository, StudentRepository};
use crate::schema::init_schema;
use crate::seed;
use crate::service::{BlogService, CatalogQueryService, TransferService};

/// 命令执行器
///
/// 每个子命令使用独立的数据库句柄，结束时显式关闭
pub struct CommandRunner {
    database: DatabaseConfig,
}

impl CommandRunner {
    pub fn new(database: DatabaseConfig) -> Self {
        Self { database }
    }

    /// 执行子命令
    pub async fn run(&self, command: &Commands) -> Result<()> {
        match command {
            Commands::Crud => self.with_database(run_crud).await,
            Commands::Transfer => self.with_database(run_transfer).await,
            Commands::Employees { department } => {
                let department = department.clone();
                self.with_database(|db| run_employees(db, department)).await
            }
            Commands::Books { threshold } => {
                let threshold = *threshold;
                self.with_database(|db| run_books(db, threshold)).await
            }
            Commands::Blog => self.with_database(run_blog).await,
            Commands::All => {
                self.with_database(run_crud).await?;
                self.with_database(run_transfer).await?;
                self.with_database(|db| run_employees(db, "技术部".to_string()))
                    .await?;
                self.with_database(|db| run_books(db, 50.0)).await?;
                self.with_database(run_blog).await
            }
        }
    }

    /// 打开数据库并建表，执行演示后关闭连接（无论成功与否）
    async fn with_database<F, Fut>(&self, demo: F) -> Result<()>
    where
        F: FnOnce(Database) -> Fut,
        Fut: std::future::Future<Output = Result<()>>,
    {
        let db = Database::connect(&self.database)
            .await
            .context("连接数据库失败")?;

        let result = match init_schema(&db).await {
            Ok(()) => demo(db.clone()).await,
            Err(e) => Err(anyhow::Error::new(e).context("建表失败")),
        };

        db.close().await;
        result
    }
}

// ==================== 学生 CRUD ====================

async fn run_crud(db: Database) -> Result<()> {
    println!("--- 学生表 CRUD ---");
    let repo = StudentRepository::new(db.pool().clone());

    let ids = seed::seed_students(&db).await?;
    println!("已插入 {} 名学生", ids.len());

    let adults = repo.list_older_than(18).await?;
    println!("所有年龄大于 18 岁的学生：");
    for student in &adults {
        println!("  {student:?}");
    }

    let updated = repo.update_grade_by_name("张三", "四年级").await?;
    println!("将张三的年级更新为四年级，影响 {updated} 行");

    let deleted = repo.delete_younger_than(15).await?;
    println!("删除年龄小于 15 岁的学生，影响 {deleted} 行");

    println!("剩余学生：");
    for student in repo.list().await? {
        println!("  {student:?}");
    }

    Ok(())
}

// ==================== 转账 ====================

async fn run_transfer(db: Database) -> Result<()> {
    seed::seed_accounts(&db).await?;
    let service = TransferService::new(db.pool().clone());

    print_balances(&service, "初始状态").await?;

    println!("\n>>> 尝试从账户1向账户2转账 100 元...");
    match service.transfer(1, 2, Decimal::from(100)).await {
        Ok(record) => println!("转账成功! 流水 ID: {}", record.id),
        Err(e) => println!("转账失败: {e}"),
    }
    print_balances(&service, "转账后状态").await?;

    println!("\n>>> 尝试从账户2向账户1转账 700 元 (余额不足)...");
    match service.transfer(2, 1, Decimal::from(700)).await {
        Ok(record) => println!("转账成功! 流水 ID: {}", record.id),
        Err(e) => println!("转账失败，事务已回滚: {e}"),
    }
    print_balances(&service, "回滚后状态").await?;

    let history = service.history(1, 10).await?;
    println!("\n账户1相关流水 {} 条", history.len());
    for record in &history {
        println!(
            "  #{} {} -> {}: {}",
            record.id, record.from_account_id, record.to_account_id, record.amount
        );
    }

    Ok(())
}

async fn print_balances(service: &TransferService, title: &str) -> Result<()> {
    let first = service.get_account(1).await?;
    let second = service.get_account(2).await?;

    println!("--- {title} ---");
    println!("账户1余额: {}", first.balance);
    println!("账户2余额: {}", second.balance);
    println!("-----------------");
    Ok(())
}

// ==================== 员工与书籍 ====================

fn catalog(db: &Database) -> CatalogQueryService<EmployeeRepository, BookRepository> {
    CatalogQueryService::new(
        Arc::new(EmployeeRepository::new(db.pool().clone())),
        Arc::new(BookRepository::new(db.pool().clone())),
    )
}

async fn run_employees(db: Database, department: String) -> Result<()> {
    seed::seed_employees(&db).await?;
    let service = catalog(&db);

    println!("--- 查询所有'{department}'的员工 ---");
    let summary = service.department_summary(&department).await?;
    if summary.employees.is_empty() {
        println!("没有找到该部门的员工。");
    } else {
        println!("查询结果:");
        for employee in &summary.employees {
            println!("{employee}");
        }
        println!(
            "共 {} 人，工资合计 {:.2}",
            summary.headcount(),
            summary.total_salary
        );
    }

    println!("\n--- 查询工资最高的员工 ---");
    match service.top_earner().await? {
        Some(employee) => {
            println!("查询结果:");
            println!("{employee}");
        }
        None => println!("没有员工数据。"),
    }

    Ok(())
}

async fn run_books(db: Database, threshold: f64) -> Result<()> {
    let inserted = seed::seed_books(&db).await?;
    info!(inserted, "Books seeded");
    let service = catalog(&db);

    println!("--- 查询价格大于 {threshold} 元的书籍 ---");
    let lines = service.book_lines(threshold).await?;
    if lines.is_empty() {
        println!("没有找到价格大于 {threshold} 元的书籍。");
    } else {
        println!("查询结果:");
        for line in lines {
            println!("{line}");
        }
    }

    Ok(())
}

// ==================== 博客 ====================

async fn run_blog(db: Database) -> Result<()> {
    let blog = BlogService::new(db.pool().clone());

    println!("--- 准备测试数据 ---");
    seed::seed_blog(&blog).await?;
    println!("测试数据创建完成！");

    println!("\n--- 查询用户 'Alice' 的所有文章和评论 ---");
    match blog.user_with_posts("Alice").await? {
        Some(loaded) => {
            println!(
                "查询到用户: {} (文章数: {})",
                loaded.user.name,
                loaded.posts.len()
            );
            for item in &loaded.posts {
                println!(
                    "  - 文章: '{}' (评论数: {})",
                    item.post.title,
                    item.comments.len()
                );
                for comment in &item.comments {
                    println!("    - 评论: '{}'", comment.content);
                }
            }
        }
        None => println!("未找到用户 'Alice'"),
    }

    println!("\n--- 查询评论数量最多的文章 ---");
    if let Some(top) = blog.most_commented_post().await? {
        println!(
            "评论最多的文章是: '{}' (ID: {}, 评论数: {})",
            top.post.title, top.post.id, top.comment_count
        );
    }

    println!("\n--- 创建文章时更新用户文章数 ---");
    let charlie = blog
        .user_with_posts("Charlie")
        .await?
        .context("缺少用户 Charlie")?
        .user;
    println!(
        "创建文章前, 用户 '{}' 的 PostCount: {}",
        charlie.name, charlie.post_count
    );
    blog.create_post(charlie.id, "Charlie 的新文章", "...").await?;
    let charlie = blog.get_user(charlie.id).await?;
    println!(
        "创建文章后, 用户 '{}' 的 PostCount: {}",
        charlie.name, charlie.post_count
    );

    println!("\n--- 删除最后一条评论时更新文章状态 ---");
    let target = blog
        .post_with_comments("SQLx 基础")
        .await?
        .context("缺少文章 'SQLx 基础'")?;
    println!(
        "删除评论前, 文章 '{}' 的状态是: '{}', 评论数: {}",
        target.post.title,
        target.post.comment_status.label(),
        target.comments.len()
    );
    for comment in &target.comments {
        blog.delete_comment(comment.id).await?;
    }
    let post = blog.get_post(target.post.id).await?;
    println!(
        "删除评论后, 文章 '{}' 的状态是: '{}'",
        post.title,
        post.comment_status.label()
    );

    Ok(())
}
