/// 缓存数据模型
pub mod rate_limit;
pub mod user;

pub use rate_limit::RateLimitRule;
pub use user::CachedUser;
