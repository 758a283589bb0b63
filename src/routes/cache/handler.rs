use axum::{Json, extract::State};

use crate::{
    AppState,
    cache::{CachedUser, keys::user_cache_key},
    error::AppError,
    result::ApiResponse,
    utils::success_to_api_response,
};

pub const DEMO_USER_EMAIL: &str = "aa@126.com";

pub fn demo_user() -> CachedUser {
    CachedUser::new(DEMO_USER_EMAIL, "aa", "aa123456", "aa", "123")
}

/// 生成演示用户并写入缓存
#[axum::debug_handler]
pub async fn get_user(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CachedUser>>, AppError> {
    let user = demo_user();
    let ttl = state.config.demo_user_ttl();

    state
        .cache
        .set_object_ex(&user_cache_key(&user.email), &user, ttl)
        .await?;
    tracing::info!("cached user {} for {}s", user.email, ttl.as_secs());

    Ok(success_to_api_response(user))
}

/// 从缓存读回演示用户
#[axum::debug_handler]
pub async fn uid(State(state): State<AppState>) -> Result<Json<ApiResponse<CachedUser>>, AppError> {
    let user = state
        .cache
        .get_object::<CachedUser>(&user_cache_key(DEMO_USER_EMAIL))
        .await?
        .ok_or_else(|| AppError::NotFound("缓存用户".into()))?;

    Ok(success_to_api_response(user))
}
