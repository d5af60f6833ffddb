use axum::extract::{Path, State};

use super::extract::{ValidJson, ValidQuery};
use crate::app::AppState;
use crate::database::models::{Company, CompanyDetail, CompanyFilter, CompanyUpdate, NewCompany};
use crate::middleware::{AdminUser, ApiResponse, ApiResult};

/// GET /companies?nameLike=&minEmployees=&maxEmployees=
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<CompanyFilter>,
) -> ApiResult<Vec<Company>> {
    let companies = Company::find_all(&state.db, &filter).await?;
    Ok(ApiResponse::success(companies))
}

/// GET /companies/:handle
pub async fn get(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<CompanyDetail> {
    let company = Company::get(&state.db, &handle).await?;
    Ok(ApiResponse::success(company))
}

/// POST /companies (admin)
pub async fn create(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidJson(data): ValidJson<NewCompany>,
) -> ApiResult<Company> {
    let company = Company::create(&state.db, data).await?;
    Ok(ApiResponse::created(company))
}

/// PATCH /companies/:handle (admin)
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(handle): Path<String>,
    ValidJson(data): ValidJson<CompanyUpdate>,
) -> ApiResult<Company> {
    let company = Company::update(&state.db, &handle, data).await?;
    Ok(ApiResponse::success(company))
}

/// DELETE /companies/:handle (admin)
pub async fn remove(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(handle): Path<String>,
) -> ApiResult<serde_json::Value> {
    Company::remove(&state.db, &handle).await?;
    Ok(ApiResponse::success(serde_json::json!({ "deleted": handle })))
}
