use thiserror::Error;

/// 缓存操作错误，后端错误原样透传
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
