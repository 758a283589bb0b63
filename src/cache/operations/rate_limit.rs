//! 基于有序集合的滑动窗口限流。
//!
//! 每次检查先在一个原子管道中裁剪过期记录、统计窗口内次数并刷新键的过期时间，
//! 放行后再单独写入本次记录。窗口是左开右闭区间 `(now - period, now]`。
//!
//! 统计与写入不在同一个原子单元里：同一个键在高并发下，多个请求可能读到相同的计数
//! 并同时放行，窗口内的实际次数最多会超过 `max_count` 并发请求数那么多。这是接受的近似。
//!
//! 后端不可用时放行请求（fail open），可用性优先于严格限流。

use std::sync::Arc;

use redis::Client as RedisClient;
use uuid::Uuid;

use crate::cache::models::RateLimitRule;
use crate::cache::operations::window_store::{RedisWindowStore, WindowStore};
use crate::utils::now_millis;

/// 滑动窗口限流器，本身无状态，可在任意多个任务间共享
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn WindowStore>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn WindowStore>) -> Self {
        Self { store }
    }

    pub fn redis(redis: Arc<RedisClient>) -> Self {
        Self::new(Arc::new(RedisWindowStore::new(redis)))
    }

    /// `period` 秒内 `key` 最多允许 `max_count` 次，返回本次是否放行
    pub async fn rate_limit(&self, key: &str, period: u64, max_count: u64) -> bool {
        self.rate_limit_at(key, period, max_count, now_millis()).await
    }

    pub async fn rate_limit_at(&self, key: &str, period: u64, max_count: u64, now_ms: i64) -> bool {
        let rule = RateLimitRule::new(period, max_count);

        let count = match self
            .store
            .prune_and_count(key, rule.cutoff(now_ms), rule.ttl_secs(), now_ms)
            .await
        {
            Ok(Some(count)) => count,
            Ok(None) => {
                tracing::warn!(key, "rate limit pipeline returned no result, allowing request");
                return true;
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "rate limit backend unavailable, allowing request");
                return true;
            }
        };

        if !rule.admits(count) {
            tracing::debug!(key, count, max_count, "rate limit exceeded");
            return false;
        }

        // 同一毫秒内的多次请求需要不同的成员，否则会被合并成一条
        let member = format!("{}-{}", now_ms, Uuid::new_v4().simple());
        if let Err(e) = self
            .store
            .record(key, &member, now_ms, rule.ttl_secs(), now_ms)
            .await
        {
            tracing::warn!(key, error = %e, "failed to record rate limit attempt");
        }

        true
    }
}
