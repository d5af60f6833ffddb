use axum::extract::{Path, State};
use serde_json::{json, Value};

use super::extract::ValidJson;
use crate::app::AppState;
use crate::auth::create_token;
use crate::database::models::{NewUser, User, UserUpdate};
use crate::middleware::{AdminUser, ApiResponse, ApiResult, AuthUser};

/// POST /users (admin) - may create other admins; returns the user and a token
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidJson(data): ValidJson<NewUser>,
) -> ApiResult<Value> {
    let user = User::register(&state.db, data).await?;
    let token = create_token(&user)?;
    Ok(ApiResponse::created(json!({ "user": user, "token": token })))
}

/// GET /users (admin)
pub async fn list(State(state): State<AppState>, _admin: AdminUser) -> ApiResult<Vec<User>> {
    let users = User::find_all(&state.db).await?;
    Ok(ApiResponse::success(users))
}

/// GET /users/:username (admin or same user)
pub async fn get(State(state): State<AppState>, auth: AuthUser, Path(username): Path<String>) -> ApiResult<User> {
    auth.ensure_correct_user_or_admin(&username)?;
    let user = User::get(&state.db, &username).await?;
    Ok(ApiResponse::success(user))
}

/// PATCH /users/:username (admin or same user)
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(username): Path<String>,
    ValidJson(data): ValidJson<UserUpdate>,
) -> ApiResult<User> {
    auth.ensure_correct_user_or_admin(&username)?;
    if data.is_admin.is_some() && !auth.is_admin {
        return Err(crate::error::ApiError::unauthorized("Only admins may change isAdmin"));
    }
    let user = User::update(&state.db, &username, data).await?;
    Ok(ApiResponse::success(user))
}

/// DELETE /users/:username (admin or same user)
pub async fn remove(State(state): State<AppState>, auth: AuthUser, Path(username): Path<String>) -> ApiResult<Value> {
    auth.ensure_correct_user_or_admin(&username)?;
    User::remove(&state.db, &username).await?;
    Ok(ApiResponse::success(json!({ "deleted": username })))
}
