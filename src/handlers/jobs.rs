use axum::extract::{Path, State};
use serde_json::{json, Value};

use super::extract::{ValidJson, ValidQuery};
use crate::app::AppState;
use crate::database::models::{Job, JobDetail, JobFilter, JobUpdate, NewJob};
use crate::middleware::{AdminUser, ApiResponse, ApiResult};

/// GET /jobs?title=&minSalary=&hasEquity=
pub async fn list(State(state): State<AppState>, ValidQuery(filter): ValidQuery<JobFilter>) -> ApiResult<Vec<Job>> {
    let jobs = Job::find_all(&state.db, &filter).await?;
    Ok(ApiResponse::success(jobs))
}

/// GET /jobs/:id - the job with its company nested
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<JobDetail> {
    let job = Job::get(&state.db, id).await?;
    Ok(ApiResponse::success(job))
}

/// POST /jobs (admin)
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidJson(data): ValidJson<NewJob>,
) -> ApiResult<Job> {
    let job = Job::create(&state.db, data).await?;
    Ok(ApiResponse::created(job))
}

/// PATCH /jobs/:id (admin). `companyHandle` is rejected as an unknown key.
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<i32>,
    ValidJson(data): ValidJson<JobUpdate>,
) -> ApiResult<Job> {
    let job = Job::update(&state.db, id, data).await?;
    Ok(ApiResponse::success(job))
}

/// DELETE /jobs/:id (admin)
pub async fn remove(State(state): State<AppState>, _admin: AdminUser, Path(id): Path<i32>) -> ApiResult<Value> {
    Job::remove(&state.db, id).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
