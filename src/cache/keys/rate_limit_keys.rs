/// 限流有序集合键前缀
const RATE_LIMIT_PREFIX: &str = "rate_limit:";

/// 生成限流键，`identity` 通常是客户端 IP
pub fn rate_limit_key(identity: &str) -> String {
    format!("{}{}", RATE_LIMIT_PREFIX, identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_prefixed() {
        assert_eq!(rate_limit_key("1.2.3.4"), "rate_limit:1.2.3.4");
        assert_eq!(super::super::user_cache_key("aa@126.com"), "user:cache:aa@126.com");
    }
}
