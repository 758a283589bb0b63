//! 内存中的用户存储库，行为与 MongoDB 实现一致

use async_trait::async_trait;
use dashmap::DashMap;

use super::UserRepository;
use crate::database::models::User;

#[derive(Default)]
pub struct MemoryUserRepository {
    users: DashMap<i64, User>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn save_user(&self, user: &User) -> Result<(), mongodb::error::Error> {
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<User>, mongodb::error::Error> {
        Ok(self
            .users
            .iter()
            .filter(|entry| entry.user_name == user_name)
            .min_by_key(|entry| entry.id)
            .map(|entry| entry.value().clone()))
    }

    async fn update_user(&self, user: &User) -> Result<u64, mongodb::error::Error> {
        match self.users.get_mut(&user.id) {
            Some(mut existing) if *existing != *user => {
                existing.user_name = user.user_name.clone();
                existing.pass_word = user.pass_word.clone();
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete_user_by_id(&self, id: i64) -> Result<u64, mongodb::error::Error> {
        Ok(self.users.remove(&id).map_or(0, |_| 1))
    }

    async fn find_all(&self) -> Result<Vec<User>, mongodb::error::Error> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by_key(|user| user.id);
        Ok(users)
    }
}
