use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::time::Duration;

use redis::AsyncCommands;
use serde::{Serialize, de::DeserializeOwned};

use super::{RedisCache, decode, decode_opt, encode};
use crate::cache::CacheError;

fn encode_all<'a, T, I>(values: I) -> Result<Vec<String>, CacheError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    values.into_iter().map(|v| encode(v)).collect()
}

fn ttl_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}

/// 列表
impl RedisCache {
    /// 追加整个列表并设置有效时间，返回列表长度
    pub async fn set_cache_list<T: Serialize>(
        &self,
        key: &str,
        data: &[T],
        ttl: Duration,
    ) -> Result<usize, CacheError> {
        if data.is_empty() {
            return Ok(0);
        }
        let values = encode_all(data)?;
        let mut conn = self.connection().await?;
        let len: usize = conn.rpush(key, values).await?;
        let _: bool = conn.expire(key, ttl_secs(ttl)).await?;
        Ok(len)
    }

    /// 入队列
    pub async fn right_push<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        ttl: Duration,
    ) -> Result<usize, CacheError> {
        let mut conn = self.connection().await?;
        let len: usize = conn.rpush(key, encode(data)?).await?;
        let _: bool = conn.expire(key, ttl_secs(ttl)).await?;
        Ok(len)
    }

    /// 出队列
    pub async fn left_pop<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let mut conn = self.connection().await?;
        let json: Option<String> = conn.lpop(key, None).await?;
        decode_opt(json)
    }

    /// 删除旧列表后重新写入
    pub async fn replace_cache_list<T: Serialize>(&self, key: &str, data: &[T]) -> Result<usize, CacheError> {
        let values = encode_all(data)?;
        let mut conn = self.connection().await?;
        let _: usize = conn.del(key).await?;
        if values.is_empty() {
            return Ok(0);
        }
        Ok(conn.rpush(key, values).await?)
    }

    /// 追加一个元素，不改变有效时间
    pub async fn put_cache_list<T: Serialize>(&self, key: &str, data: &T) -> Result<usize, CacheError> {
        let mut conn = self.connection().await?;
        Ok(conn.rpush(key, encode(data)?).await?)
    }

    pub async fn get_cache_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, CacheError> {
        let mut conn = self.connection().await?;
        let values: Vec<String> = conn.lrange(key, 0, -1).await?;
        values.iter().map(|v| decode(v)).collect()
    }

    pub async fn get_cache_from_list<T: DeserializeOwned>(
        &self,
        key: &str,
        index: isize,
    ) -> Result<Option<T>, CacheError> {
        let mut conn = self.connection().await?;
        let json: Option<String> = conn.lindex(key, index).await?;
        decode_opt(json)
    }
}

/// 集合
impl RedisCache {
    /// 写入整个集合，返回新增成员数
    pub async fn set_cache_set<T: Serialize>(&self, key: &str, data: &HashSet<T>) -> Result<usize, CacheError> {
        if data.is_empty() {
            return Ok(0);
        }
        let members = encode_all(data)?;
        let mut conn = self.connection().await?;
        Ok(conn.sadd(key, members).await?)
    }

    pub async fn put_cache_set<T: Serialize>(&self, key: &str, data: &T) -> Result<usize, CacheError> {
        let mut conn = self.connection().await?;
        Ok(conn.sadd(key, encode(data)?).await?)
    }

    pub async fn get_cache_set<T>(&self, key: &str) -> Result<HashSet<T>, CacheError>
    where
        T: DeserializeOwned + Eq + Hash,
    {
        let mut conn = self.connection().await?;
        let members: Vec<String> = conn.smembers(key).await?;
        members.iter().map(|m| decode(m)).collect()
    }
}

/// 哈希
impl RedisCache {
    pub async fn set_cache_map<T: Serialize>(&self, key: &str, data: &HashMap<String, T>) -> Result<(), CacheError> {
        if data.is_empty() {
            return Ok(());
        }
        let fields = data
            .iter()
            .map(|(field, value)| encode(value).map(|json| (field.clone(), json)))
            .collect::<Result<Vec<_>, _>>()?;
        let mut conn = self.connection().await?;
        let _: () = conn.hset_multiple(key, fields.as_slice()).await?;
        Ok(())
    }

    pub async fn get_cache_map<T: DeserializeOwned>(&self, key: &str) -> Result<HashMap<String, T>, CacheError> {
        let mut conn = self.connection().await?;
        let entries: HashMap<String, String> = conn.hgetall(key).await?;
        entries
            .into_iter()
            .map(|(field, json)| decode(&json).map(|value| (field, value)))
            .collect()
    }

    /// 往哈希中存入一个字段并刷新整个键的有效时间
    pub async fn set_cache_map_value<T: Serialize>(
        &self,
        key: &str,
        field: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: () = conn.hset(key, field, encode(value)?).await?;
        let _: bool = conn.expire(key, ttl_secs(ttl)).await?;
        Ok(())
    }

    pub async fn get_cache_map_value<T: DeserializeOwned>(
        &self,
        key: &str,
        field: &str,
    ) -> Result<Option<T>, CacheError> {
        let mut conn = self.connection().await?;
        let json: Option<String> = conn.hget(key, field).await?;
        decode_opt(json)
    }

    /// 一次读取多个字段，缺失的字段对应 `None`
    pub async fn get_multi_cache_map_value<T: DeserializeOwned>(
        &self,
        key: &str,
        fields: &[String],
    ) -> Result<Vec<Option<T>>, CacheError> {
        if fields.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.connection().await?;
        let values: Vec<Option<String>> = redis::cmd("HMGET")
            .arg(key)
            .arg(fields)
            .query_async(&mut conn)
            .await?;
        values.into_iter().map(decode_opt::<T>).collect()
    }
}
