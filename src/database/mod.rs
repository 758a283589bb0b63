// 数据库模块
// 包含 MongoDB 文档模型和存储库

pub mod models;
pub mod repositories;

pub use models::User;
pub use repositories::{MemoryUserRepository, MongoUserRepository, UserRepository};
