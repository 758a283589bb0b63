use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub redis_url: String,
    pub mongodb_url: String,
    pub mongodb_database: String,
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub rate_limit_window_secs: u64,
    pub rate_limit_requests: u64,
    pub demo_user_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key))
    }

    /// 从任意变量来源加载配置，缺失的变量使用默认值，数值无法解析时同样回退到默认值
    pub fn from_lookup<F>(lookup: F) -> Result<Self, env::VarError>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let optional = |key: &str| match lookup(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(e),
        };
        let or = |value: Option<String>, default: &str| value.unwrap_or_else(|| default.to_string());

        Ok(Config {
            redis_url: or(optional("REDIS_URL")?, "redis://127.0.0.1:6379/"),
            mongodb_url: or(optional("MONGODB_URL")?, "mongodb://localhost:27017"),
            mongodb_database: or(optional("MONGODB_DATABASE")?, "test"),
            server_host: or(optional("SERVER_HOST")?, "0.0.0.0"),
            server_port: optional("SERVER_PORT")?
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_base_uri: or(optional("API_BASE_URI")?, "/api"),
            rate_limit_window_secs: optional("RATE_LIMIT_WINDOW")?
                .and_then(|v| v.trim_end_matches('s').parse().ok())
                .unwrap_or(60),
            rate_limit_requests: optional("RATE_LIMIT_REQUESTS")?
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            demo_user_ttl_secs: optional("DEMO_USER_TTL")?
                .and_then(|v| v.trim_end_matches('s').parse().ok())
                .unwrap_or(1000),
        })
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn demo_user_ttl(&self) -> Duration {
        Duration::from_secs(self.demo_user_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, env::VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.redis_url, "redis://127.0.0.1:6379/");
        assert_eq!(config.mongodb_url, "mongodb://localhost:27017");
        assert_eq!(config.mongodb_database, "test");
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.api_base_uri, "/api");
        assert_eq!(config.rate_limit_window(), Duration::from_secs(60));
        assert_eq!(config.rate_limit_requests, 100);
        assert_eq!(config.demo_user_ttl(), Duration::from_secs(1000));
    }

    #[test]
    fn non_unicode_value_is_an_error() {
        let result = Config::from_lookup(|key| match key {
            "REDIS_URL" => Err(env::VarError::NotUnicode("\u{fffd}".into())),
            _ => Err(env::VarError::NotPresent),
        });
        assert!(matches!(result, Err(env::VarError::NotUnicode(_))));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("REDIS_URL", "redis://cache:6379/"),
            ("SERVER_PORT", "8080"),
            ("RATE_LIMIT_WINDOW", "10s"),
            ("RATE_LIMIT_REQUESTS", "3"),
            ("MONGODB_DATABASE", "neo"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.rate_limit_window_secs, 10);
        assert_eq!(config.rate_limit_requests, 3);
        assert_eq!(config.mongodb_database, "neo");
    }

    #[test]
    fn unparseable_numbers_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("REDIS_URL", "redis://cache:6379/"),
            ("SERVER_PORT", "not-a-port"),
            ("RATE_LIMIT_REQUESTS", "-1"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.rate_limit_requests, 100);
    }
}
