/// 数据库文档模型
pub mod user;

pub use user::User;
