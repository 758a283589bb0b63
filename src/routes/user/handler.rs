use axum::{
    Json,
    extract::{Path, Query, State},
};

use super::model::{DeleteUserResponse, FindByNameQuery, UpdateUserResponse};
use crate::{
    MongoState, database::User, error::AppError, result::ApiResponse,
    utils::success_to_api_response,
};

fn validate(user: &User) -> Result<(), AppError> {
    if user.user_name.trim().is_empty() {
        return Err(AppError::Validation("用户名不能为空".into()));
    }
    Ok(())
}

pub async fn save_user(
    State(state): State<MongoState>,
    Json(user): Json<User>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    validate(&user)?;
    state.users.save_user(&user).await?;
    tracing::info!("saved user {}", user.id);
    Ok(success_to_api_response(user))
}

pub async fn find_all(State(state): State<MongoState>) -> Result<Json<ApiResponse<Vec<User>>>, AppError> {
    Ok(success_to_api_response(state.users.find_all().await?))
}

pub async fn find_by_name(
    State(state): State<MongoState>,
    Query(query): Query<FindByNameQuery>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = state
        .users
        .find_user_by_user_name(&query.user_name)
        .await?
        .ok_or_else(|| AppError::NotFound("用户".into()))?;
    Ok(success_to_api_response(user))
}

pub async fn update_user(
    State(state): State<MongoState>,
    Json(user): Json<User>,
) -> Result<Json<ApiResponse<UpdateUserResponse>>, AppError> {
    validate(&user)?;
    let modified = state.users.update_user(&user).await?;
    Ok(success_to_api_response(UpdateUserResponse { modified }))
}

pub async fn delete_user(
    State(state): State<MongoState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<DeleteUserResponse>>, AppError> {
    let deleted = state.users.delete_user_by_id(id).await?;
    Ok(success_to_api_response(DeleteUserResponse { deleted }))
}
