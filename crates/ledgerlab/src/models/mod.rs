//! 领域模型
//!
//! 包含各练习任务的实体定义

pub mod account;
pub mod blog;
pub mod catalog;
pub mod student;

// 重新导出常用类型
pub use account::{Account, Money, TransferRecord};
pub use blog::{
    Comment, CommentStatus, Post, PostCommentCount, PostWithComments, User, UserWithPosts,
};
pub use catalog::{Book, Employee, NewBook, NewEmployee};
pub use student::{NewStudent, Student};
