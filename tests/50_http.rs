mod common;

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jobly_api::app::{app, AppState};
use jobly_api::auth::create_token;
use jobly_api::database::models::{NewUser, User};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(router: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?,
        None => request.body(Body::empty())?,
    };

    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

#[tokio::test]
async fn register_login_and_browse_jobs() -> Result<()> {
    let Some(db) = common::test_db().await? else { return Ok(()) };
    let router = app(AppState { db: db.pool.clone() });

    let signup = json!({
        "username": "u1",
        "password": "password1",
        "firstName": "U",
        "lastName": "One",
        "email": "u1@example.com"
    });
    let (status, body) = send(&router, Method::POST, "/auth/register", None, Some(signup)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"]["token"].is_string());

    let login = json!({ "username": "u1", "password": "password1" });
    let (status, body) = send(&router, Method::POST, "/auth/token", None, Some(login)).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());

    let (status, body) = send(&router, Method::GET, "/jobs?title=dev&minSalary=115000&hasEquity=true", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    let jobs = body["data"].as_array().cloned().unwrap_or_default();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["title"], "Senior Developer");
    assert_eq!(jobs[0]["companyHandle"], "c2");

    let bad_login = json!({ "username": "u1", "password": "nope" });
    let (status, _) = send(&router, Method::POST, "/auth/token", None, Some(bad_login)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    db.cleanup().await
}

#[tokio::test]
async fn company_mutations_require_admin() -> Result<()> {
    let Some(db) = common::test_db().await? else { return Ok(()) };
    let router = app(AppState { db: db.pool.clone() });

    let plain = User::register(
        &db.pool,
        NewUser {
            username: "plain".into(),
            password: "password1".into(),
            first_name: "P".into(),
            last_name: "L".into(),
            email: "plain@example.com".into(),
            is_admin: false,
        },
    )
    .await?;
    let admin = User::register(
        &db.pool,
        NewUser {
            username: "boss".into(),
            password: "password1".into(),
            first_name: "B".into(),
            last_name: "S".into(),
            email: "boss@example.com".into(),
            is_admin: true,
        },
    )
    .await?;
    let plain_token = create_token(&plain)?;
    let admin_token = create_token(&admin)?;

    let company = json!({ "handle": "new", "name": "New", "description": "D", "numEmployees": 5 });
    let (status, _) = send(&router, Method::POST, "/companies", Some(&plain_token), Some(company.clone())).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(&router, Method::POST, "/companies", Some(&admin_token), Some(company)).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["handle"], "new");

    let (status, body) = send(&router, Method::GET, "/companies/c1", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["jobs"].as_array().map(Vec::len), Some(2));

    let (status, _) = send(&router, Method::PATCH, "/companies/c1", Some(&admin_token), Some(json!({ "handle": "x" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&router, Method::DELETE, "/companies/nope", Some(&admin_token), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    db.cleanup().await
}

#[tokio::test]
async fn schema_limits_are_client_errors() -> Result<()> {
    let Some(db) = common::test_db().await? else { return Ok(()) };
    let router = app(AppState { db: db.pool.clone() });

    let signup = json!({
        "username": "a".repeat(26),
        "password": "password1",
        "firstName": "U",
        "lastName": "One",
        "email": "long@example.com"
    });
    let (status, body) = send(&router, Method::POST, "/auth/register", None, Some(signup)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["username"], "must be at most 25 characters");

    let admin = User::register(
        &db.pool,
        NewUser {
            username: "boss".into(),
            password: "password1".into(),
            first_name: "B".into(),
            last_name: "S".into(),
            email: "boss@example.com".into(),
            is_admin: true,
        },
    )
    .await?;
    let company = json!({ "handle": "Upper", "name": "Upper", "description": "D" });
    let (status, body) = send(&router, Method::POST, "/companies", Some(&create_token(&admin)?), Some(company)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["handle"], "must be lowercase");

    db.cleanup().await
}
