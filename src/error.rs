use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::cache::CacheError;
use crate::utils::{error_codes, error_to_api_response};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limit exceeded, retry within {0}s")]
    RateLimited(u64),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, i32) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
            AppError::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, error_codes::RATE_LIMIT),
            AppError::Cache(_) | AppError::Database(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::Cache(_) => "缓存服务错误".to_string(),
            AppError::Database(_) => "数据库错误".to_string(),
            AppError::Validation(reason) => reason.clone(),
            AppError::NotFound(what) => format!("{}不存在", what),
            AppError::RateLimited(window) => format!("请求过于频繁，请在{}秒后重试", window),
        };

        // 内部错误的细节只写日志，不返回给客户端
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, error_to_api_response::<()>(code, message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let resp = AppError::NotFound("用户".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn rate_limited_maps_to_429() {
        let resp = AppError::RateLimited(10).into_response();
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn serialization_failure_is_internal() {
        let err = serde_json::from_str::<u32>("oops").unwrap_err();
        let resp = AppError::Cache(CacheError::from(err)).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
