use std::time::Duration;

use redis::AsyncCommands;
use serde::{Serialize, de::DeserializeOwned};

use super::{RedisCache, decode_opt, encode};
use crate::cache::CacheError;

/// 基本对象、过期时间、计数器和消息发布
impl RedisCache {
    /// 缓存基本的对象，Integer、String、实体类等
    pub async fn set_object<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: () = conn.set(key, encode(value)?).await?;
        Ok(())
    }

    /// 缓存对象并设置有效时间
    pub async fn set_object_ex<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: () = conn.set_ex(key, encode(value)?, ttl.as_secs()).await?;
        Ok(())
    }

    pub async fn get_object<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let mut conn = self.connection().await?;
        let json: Option<String> = conn.get(key).await?;
        decode_opt(json)
    }

    /// 删除单个对象，返回键是否存在
    pub async fn delete_object(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.connection().await?;
        let removed: usize = conn.del(key).await?;
        Ok(removed > 0)
    }

    /// 删除多个对象，返回实际删除的数量
    pub async fn delete_objects(&self, keys: &[String]) -> Result<usize, CacheError> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection().await?;
        Ok(conn.del(keys).await?)
    }

    pub async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.connection().await?;
        Ok(conn.exists(key).await?)
    }

    /// 设置有效时间，键不存在时返回 false
    pub async fn expire(&self, key: &str, ttl: Duration) -> Result<bool, CacheError> {
        let mut conn = self.connection().await?;
        let seconds = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Ok(conn.expire(key, seconds).await?)
    }

    /// 剩余有效时间（秒），-1 表示永不过期，-2 表示键不存在
    pub async fn get_expire(&self, key: &str) -> Result<i64, CacheError> {
        let mut conn = self.connection().await?;
        Ok(conn.ttl(key).await?)
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, CacheError> {
        let mut conn = self.connection().await?;
        Ok(conn.keys(pattern).await?)
    }

    /// 自增，返回自增前的值
    pub async fn generate(&self, key: &str) -> Result<i64, CacheError> {
        let mut conn = self.connection().await?;
        let next: i64 = conn.incr(key, 1).await?;
        Ok(next - 1)
    }

    /// 读取计数器，不存在时为 0
    pub async fn get_long(&self, key: &str) -> Result<i64, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<i64> = conn.get(key).await?;
        Ok(value.unwrap_or(0))
    }

    /// 向频道发布消息，返回收到消息的订阅者数量
    pub async fn convert_and_send<T: Serialize>(
        &self,
        channel: &str,
        message: &T,
    ) -> Result<usize, CacheError> {
        let mut conn = self.connection().await?;
        Ok(conn.publish(channel, encode(message)?).await?)
    }
}
