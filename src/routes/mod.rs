use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::{
    AppState, MongoState,
    middleware::{IpRateLimiter, log_errors, rate_limit},
};

pub mod cache;
pub mod user;

/// Redis 演示路由，挂在 `api_base_uri` 下，所有请求按 IP 限流
pub fn redis_router(state: AppState, limiter: Arc<IpRateLimiter>) -> Router {
    let cache_routes = Router::new()
        .route("/getUser", get(cache::get_user))
        .route("/uid", get(cache::uid));

    Router::new()
        .nest(&state.config.api_base_uri, cache_routes)
        .layer(axum::middleware::from_fn(log_errors))
        .layer(axum::middleware::from_fn_with_state(limiter, rate_limit))
        .with_state(state)
}

/// MongoDB 演示路由
pub fn mongo_router(state: MongoState) -> Router {
    let user_routes = Router::new()
        .route("/users", get(user::find_all).post(user::save_user).put(user::update_user))
        .route("/users/by-name", get(user::find_by_name))
        .route("/users/{id}", delete(user::delete_user));

    Router::new()
        .nest(&state.config.api_base_uri, user_routes)
        .layer(axum::middleware::from_fn(log_errors))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cache::{MemoryWindowStore, RateLimitRule, RateLimiter},
        config::Config,
        database::{MemoryUserRepository, User, UserRepository},
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn config() -> Config {
        Config::from_lookup(|key| match key {
            // 没有服务监听的端口，连接会被拒绝
            "REDIS_URL" => Ok("redis://127.0.0.1:1/".into()),
            _ => Err(std::env::VarError::NotPresent),
        })
        .unwrap()
    }

    fn mongo_app() -> Router {
        mongo_router(MongoState {
            config: config(),
            users: Arc::new(MemoryUserRepository::new()),
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn user_crud_round() {
        let app = mongo_app();
        let neo = json!({ "_id": 2, "userName": "neo", "passWord": "123456" });

        let (status, body) = send(&app, "POST", "/api/users", Some(neo)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["code"], 0);

        let (status, body) = send(&app, "GET", "/api/users/by-name?user_name=neo", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resp_data"]["_id"], 2);

        let updated = json!({ "_id": 2, "userName": "neo", "passWord": "654321" });
        let (_, body) = send(&app, "PUT", "/api/users", Some(updated)).await;
        assert_eq!(body["resp_data"]["modified"], 1);

        let (_, body) = send(&app, "GET", "/api/users", None).await;
        assert_eq!(body["resp_data"][0]["passWord"], "654321");

        let (_, body) = send(&app, "DELETE", "/api/users/2", None).await;
        assert_eq!(body["resp_data"]["deleted"], 1);

        let (status, body) = send(&app, "GET", "/api/users/by-name?user_name=neo", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 1004);
    }

    #[tokio::test]
    async fn blank_user_name_is_rejected() {
        let app = mongo_app();
        let user = json!({ "_id": 1, "userName": "  ", "passWord": "x" });

        let (status, body) = send(&app, "POST", "/api/users", Some(user)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 1000);
    }

    #[tokio::test]
    async fn saved_user_matches_repository_record() {
        let repo = Arc::new(MemoryUserRepository::new());
        let app = mongo_router(MongoState {
            config: config(),
            users: repo.clone(),
        });

        let user = json!({ "_id": 7, "userName": "trinity", "passWord": "pw" });
        send(&app, "POST", "/api/users", Some(user)).await;

        assert_eq!(
            repo.find_user_by_user_name("trinity").await.unwrap(),
            Some(User::new(7, "trinity", "pw"))
        );
    }

    #[tokio::test]
    async fn cache_outage_surfaces_as_internal_error() {
        let config = config();
        let redis = Arc::new(redis::Client::open(config.redis_url.clone()).unwrap());
        let limiter = Arc::new(IpRateLimiter::new(
            RateLimiter::new(Arc::new(MemoryWindowStore::new())),
            RateLimitRule::new(60, 10),
        ));
        let app = redis_router(AppState::new(config, redis), limiter);

        let (status, body) = send(&app, "GET", "/api/getUser", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], 5000);
    }

    #[tokio::test]
    async fn redis_routes_are_rate_limited() {
        let config = config();
        let redis = Arc::new(redis::Client::open(config.redis_url.clone()).unwrap());
        let limiter = Arc::new(IpRateLimiter::new(
            RateLimiter::new(Arc::new(MemoryWindowStore::new())),
            RateLimitRule::new(60, 1),
        ));
        let app = redis_router(AppState::new(config, redis), limiter);

        send(&app, "GET", "/api/uid", None).await;
        let (status, body) = send(&app, "GET", "/api/uid", None).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["code"], 1005);
    }
}
