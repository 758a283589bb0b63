use std::sync::Arc;

use config::Config;
use redis::Client as RedisClient;

use cache::RedisCache;
use database::UserRepository;

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod result;
pub mod routes;
pub mod utils;

/// Redis 演示应用状态
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub cache: RedisCache,
}

impl AppState {
    pub fn new(config: Config, redis: Arc<RedisClient>) -> Self {
        Self {
            config,
            cache: RedisCache::new(redis),
        }
    }
}

/// MongoDB 演示应用状态
#[derive(Clone)]
pub struct MongoState {
    pub config: Config,
    pub users: Arc<dyn UserRepository>,
}
