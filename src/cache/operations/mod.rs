/// 缓存操作
/// 对 redis 客户端原生命令的一层薄封装，值统一以 JSON 存储
pub mod collections;
pub mod rate_limit;
pub mod value;
pub mod window_store;

use std::sync::Arc;

use redis::{Client as RedisClient, aio::MultiplexedConnection};
use serde::{Serialize, de::DeserializeOwned};

use crate::cache::CacheError;

pub use rate_limit::RateLimiter;
pub use window_store::{MemoryWindowStore, RedisWindowStore, WindowStore};

/// 通用缓存操作，错误原样透传，不做重试
#[derive(Clone)]
pub struct RedisCache {
    redis: Arc<RedisClient>,
}

impl RedisCache {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }

    async fn connection(&self) -> Result<MultiplexedConnection, CacheError> {
        Ok(self.redis.get_multiplexed_async_connection().await?)
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, CacheError> {
    Ok(serde_json::to_string(value)?)
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T, CacheError> {
    Ok(serde_json::from_str(json)?)
}

fn decode_opt<T: DeserializeOwned>(json: Option<String>) -> Result<Option<T>, CacheError> {
    json.as_deref().map(decode).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::models::CachedUser;

    #[test]
    fn values_are_stored_as_json() {
        let user = CachedUser::new("aa@126.com", "aa", "aa123456", "aa", "123");
        let json = encode(&user).unwrap();
        assert!(json.contains("\"email\":\"aa@126.com\""));

        let back: CachedUser = decode(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn missing_value_decodes_to_none() {
        let value: Option<CachedUser> = decode_opt(None).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn malformed_value_is_a_serialization_error() {
        let result: Result<Option<u32>, _> = decode_opt(Some("{not json".into()));
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }
}
