use axum::extract::State;
use serde::Deserialize;
use serde_json::{json, Value};

use super::extract::ValidJson;
use crate::app::AppState;
use crate::auth::create_token;
use crate::database::models::{NewUser, User};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /auth/token - exchange credentials for a JWT
pub async fn token(
    State(state): State<AppState>,
    ValidJson(login): ValidJson<LoginRequest>,
) -> ApiResult<Value> {
    let user = User::authenticate(&state.db, &login.username, &login.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid username/password"))?;

    let token = create_token(&user)?;
    Ok(ApiResponse::success(json!({ "token": token })))
}

/// POST /auth/register - self-service signup, never grants admin
pub async fn register(
    State(state): State<AppState>,
    ValidJson(mut data): ValidJson<NewUser>,
) -> ApiResult<Value> {
    data.is_admin = false;
    let user = User::register(&state.db, data).await?;

    let token = create_token(&user)?;
    Ok(ApiResponse::created(json!({ "token": token })))
}
