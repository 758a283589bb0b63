use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{Client, Collection, bson::doc};

use super::UserRepository;
use crate::database::models::User;

/// 用户集合名
pub const USER_COLLECTION: &str = "user";

/// MongoDB 用户存储库
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(collection: Collection<User>) -> Self {
        Self { collection }
    }

    pub async fn connect(url: &str, database: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(url).await?;
        tracing::debug!("Connected to MongoDB, database: {}", database);
        Ok(Self::new(client.database(database).collection(USER_COLLECTION)))
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn save_user(&self, user: &User) -> Result<(), mongodb::error::Error> {
        self.collection
            .replace_one(doc! { "_id": user.id }, user)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn find_user_by_user_name(&self, user_name: &str) -> Result<Option<User>, mongodb::error::Error> {
        self.collection.find_one(doc! { "userName": user_name }).await
    }

    async fn update_user(&self, user: &User) -> Result<u64, mongodb::error::Error> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": user.id },
                doc! { "$set": { "userName": user.user_name.as_str(), "passWord": user.pass_word.as_str() } },
            )
            .await?;
        Ok(result.modified_count)
    }

    async fn delete_user_by_id(&self, id: i64) -> Result<u64, mongodb::error::Error> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count)
    }

    async fn find_all(&self) -> Result<Vec<User>, mongodb::error::Error> {
        let cursor = self.collection.find(doc! {}).await?;
        cursor.try_collect().await
    }
}
