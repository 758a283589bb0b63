use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    cache::{RateLimitRule, RateLimiter, keys::rate_limit_key},
    config::Config,
    error::AppError,
};

/// 按客户端 IP 限流的中间件状态
#[derive(Clone)]
pub struct IpRateLimiter {
    limiter: RateLimiter,
    rule: RateLimitRule,
}

impl IpRateLimiter {
    pub fn new(limiter: RateLimiter, rule: RateLimitRule) -> Self {
        Self { limiter, rule }
    }

    pub fn from_config(limiter: RateLimiter, config: &Config) -> Self {
        Self::new(
            limiter,
            RateLimitRule::new(config.rate_limit_window_secs, config.rate_limit_requests),
        )
    }

    pub async fn check_rate_limit(self: Arc<Self>, req: Request<Body>, next: Next) -> Response {
        let ip = client_ip(&req);
        tracing::debug!("rate limit check for ip: {}", ip);

        let key = rate_limit_key(&ip);
        if !self
            .limiter
            .rate_limit(&key, self.rule.period_secs, self.rule.max_count)
            .await
        {
            tracing::info!("rate limit exceeded for ip: {}", ip);
            return AppError::RateLimited(self.rule.period_secs).into_response();
        }

        next.run(req).await
    }
}

/// 依次取 `x-real-ip`、`x-forwarded-for` 第一个非空地址、连接地址
fn client_ip(req: &Request<Body>) -> String {
    let remote_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string());

    req.headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .filter(|ip| !ip.trim().is_empty())
        .or_else(|| {
            req.headers()
                .get("x-forwarded-for")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.split(',').find(|ip| !ip.trim().is_empty()))
        })
        .or(remote_ip.as_deref())
        .unwrap_or("unknown")
        .trim()
        .to_string()
}

pub async fn rate_limit(
    State(limiter): State<Arc<IpRateLimiter>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    limiter.check_rate_limit(req, next).await
}
