/// 演示用户缓存键前缀
const USER_CACHE_PREFIX: &str = "user:cache:";

/// 生成演示用户缓存键
pub fn user_cache_key(email: &str) -> String {
    format!("{}{}", USER_CACHE_PREFIX, email)
}
