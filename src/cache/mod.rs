// 缓存模块
// 包含缓存数据结构、键和操作逻辑

pub mod error;
pub mod keys;
pub mod models;
pub mod operations;

// 重新导出常用类型，方便其他模块使用
pub use error::CacheError;
pub use models::{CachedUser, RateLimitRule};
pub use operations::{MemoryWindowStore, RateLimiter, RedisCache, RedisWindowStore, WindowStore};
