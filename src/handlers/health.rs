use axum::extract::State;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /health - liveness plus a database ping; 503 when the ping fails
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    DatabaseManager::health_check(&state.db).await?;
    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "database": "ok"
    })))
}
