/// 用户存储库
pub mod memory;
pub mod user;

use async_trait::async_trait;

use crate::database::models::User;

pub use memory::MemoryUserRepository;
pub use user::MongoUserRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 按 id 保存，已存在则整体替换
    async fn save_user(&self, user: &User) -> Result<(), mongodb::error::Error>;

    async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<User>, mongodb::error::Error>;

    /// 更新用户名和密码，返回被修改的文档数
    async fn update_user(&self, user: &User) -> Result<u64, mongodb::error::Error>;

    /// 返回被删除的文档数
    async fn delete_user_by_id(&self, id: i64) -> Result<u64, mongodb::error::Error>;

    async fn find_all(&self) -> Result<Vec<User>, mongodb::error::Error>;
}
