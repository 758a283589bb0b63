//! 滑动窗口的存储后端。
//!
//! 限流器本身不持有状态，所有窗口数据都放在这里的存储中。Redis 实现使用有序集合，
//! 内存实现按相同语义模拟，供单机调试和测试使用。

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use redis::Client as RedisClient;

use crate::cache::CacheError;

#[async_trait]
pub trait WindowStore: Send + Sync {
    /// 原子地删除分数在 `[0, cutoff_ms]` 内的成员、统计剩余成员数并把键的过期时间刷新为 `ttl_secs`。
    ///
    /// 返回 `Ok(None)` 表示后端没有给出结果（例如事务被放弃）。
    async fn prune_and_count(
        &self,
        key: &str,
        cutoff_ms: i64,
        ttl_secs: u64,
        now_ms: i64,
    ) -> Result<Option<u64>, CacheError>;

    /// 写入一条尝试记录并刷新过期时间
    async fn record(
        &self,
        key: &str,
        member: &str,
        score_ms: i64,
        ttl_secs: u64,
        now_ms: i64,
    ) -> Result<(), CacheError>;
}

/// Redis 会把过期秒数换算成毫秒再加上当前时间，超出 `i64` 时 EXPIRE 报 invalid expire time
const MAX_EXPIRE_SECS: i64 = i64::MAX / 2000;

fn expire_secs(ttl_secs: u64) -> i64 {
    i64::try_from(ttl_secs).map_or(MAX_EXPIRE_SECS, |secs| secs.min(MAX_EXPIRE_SECS))
}

/// 基于 Redis 有序集合的窗口存储
#[derive(Clone)]
pub struct RedisWindowStore {
    redis: Arc<RedisClient>,
}

impl RedisWindowStore {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl WindowStore for RedisWindowStore {
    async fn prune_and_count(
        &self,
        key: &str,
        cutoff_ms: i64,
        ttl_secs: u64,
        _now_ms: i64,
    ) -> Result<Option<u64>, CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        // MULTI/EXEC 包裹，放弃的事务返回 nil，解析为空列表
        let counts: Vec<u64> = redis::pipe()
            .atomic()
            .zrembyscore(key, 0, cutoff_ms)
            .ignore()
            .zcard(key)
            .expire(key, expire_secs(ttl_secs))
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(counts.first().copied())
    }

    async fn record(
        &self,
        key: &str,
        member: &str,
        score_ms: i64,
        ttl_secs: u64,
        _now_ms: i64,
    ) -> Result<(), CacheError> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;

        // 首次写入时键还不存在，前面的 EXPIRE 不生效，这里需要再设置一次
        let _: () = redis::pipe()
            .zadd(key, member, score_ms)
            .ignore()
            .expire(key, expire_secs(ttl_secs))
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(())
    }
}

struct Window {
    members: Vec<(String, i64)>,
    expires_at_ms: Option<i64>,
}

impl Window {
    fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at_ms.is_some_and(|at| at <= now_ms)
    }

    fn touch(&mut self, ttl_secs: u64, now_ms: i64) {
        let ttl_ms = expire_secs(ttl_secs).saturating_mul(1000);
        self.expires_at_ms = Some(now_ms.saturating_add(ttl_ms));
    }
}

/// 内存中的窗口存储，语义与 Redis 实现一致
#[derive(Default)]
pub struct MemoryWindowStore {
    windows: DashMap<String, Window>,
}

impl MemoryWindowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 键在 `now_ms` 时刻是否还存在
    pub fn contains_key(&self, key: &str, now_ms: i64) -> bool {
        self.windows
            .get(key)
            .is_some_and(|window| !window.is_expired(now_ms))
    }

    /// 键当前的成员数，不做窗口裁剪
    pub fn member_count(&self, key: &str, now_ms: i64) -> usize {
        self.windows
            .get(key)
            .filter(|window| !window.is_expired(now_ms))
            .map_or(0, |window| window.members.len())
    }

    fn evict_expired(&self, key: &str, now_ms: i64) {
        self.windows.remove_if(key, |_, window| window.is_expired(now_ms));
    }
}

#[async_trait]
impl WindowStore for MemoryWindowStore {
    async fn prune_and_count(
        &self,
        key: &str,
        cutoff_ms: i64,
        ttl_secs: u64,
        now_ms: i64,
    ) -> Result<Option<u64>, CacheError> {
        self.evict_expired(key, now_ms);

        let count = match self.windows.get_mut(key) {
            Some(mut window) => {
                window
                    .members
                    .retain(|(_, score)| !(0..=cutoff_ms).contains(score));
                window.touch(ttl_secs, now_ms);
                window.members.len() as u64
            }
            None => 0,
        };

        // Redis 会删除空的有序集合
        self.windows.remove_if(key, |_, window| window.members.is_empty());

        Ok(Some(count))
    }

    async fn record(
        &self,
        key: &str,
        member: &str,
        score_ms: i64,
        ttl_secs: u64,
        now_ms: i64,
    ) -> Result<(), CacheError> {
        self.evict_expired(key, now_ms);

        let mut window = self.windows.entry(key.to_string()).or_insert_with(|| Window {
            members: Vec::new(),
            expires_at_ms: None,
        });

        match window.members.iter_mut().find(|(m, _)| m == member) {
            Some(existing) => existing.1 = score_ms,
            None => window.members.push((member.to_string(), score_ms)),
        }
        window.touch(ttl_secs, now_ms);

        Ok(())
    }
}
