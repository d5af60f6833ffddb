mod common;

use anyhow::Result;
use jobly_api::database::models::{Job, JobFilter, JobUpdate, NewJob};
use jobly_api::database::ModelError;
use rust_decimal::Decimal;
use serde_json::json;

#[tokio::test]
async fn create_then_get_round_trips() -> Result<()> {
    let Some(db) = common::test_db().await? else { return Ok(()) };

    let created = Job::create(
        &db.pool,
        NewJob {
            title: "Staff Dev".to_string(),
            salary: Some(150000),
            equity: Some(Decimal::new(5, 2)),
            company_handle: "c3".to_string(),
        },
    )
    .await?;
    assert!(created.id > 0);
    assert_eq!(created.equity, Some(Decimal::new(5, 2)));

    let fetched = Job::get(&db.pool, created.id).await?;
    assert_eq!(fetched.job, created);
    assert_eq!(fetched.company.handle, "c3");
    assert_eq!(fetched.company.name, "C3");

    db.cleanup().await
}

#[tokio::test]
async fn create_rejects_unknown_company() -> Result<()> {
    let Some(db) = common::test_db().await? else { return Ok(()) };

    let err = Job::create(
        &db.pool,
        NewJob {
            title: "Orphan".to_string(),
            salary: None,
            equity: None,
            company_handle: "missing".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    assert_eq!(db.count("jobs").await?, 4);

    db.cleanup().await
}

#[tokio::test]
async fn find_all_combines_every_filter() -> Result<()> {
    let Some(db) = common::test_db().await? else { return Ok(()) };

    let filter: JobFilter =
        serde_json::from_value(json!({ "title": "dev", "minSalary": 115000, "hasEquity": true }))?;
    let jobs = Job::find_all(&db.pool, &filter).await?;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].salary, Some(120000));
    assert_eq!(jobs[0].equity, Some(Decimal::new(4, 1)));

    db.cleanup().await
}

#[tokio::test]
async fn has_equity_false_is_no_constraint() -> Result<()> {
    let Some(db) = common::test_db().await? else { return Ok(()) };

    let all = Job::find_all(&db.pool, &JobFilter::default()).await?;
    let unconstrained = JobFilter { has_equity: Some(false), ..Default::default() };
    assert_eq!(Job::find_all(&db.pool, &unconstrained).await?, all);
    assert_eq!(all.len(), 4);

    let equity_only = JobFilter { has_equity: Some(true), ..Default::default() };
    let titles: Vec<String> = Job::find_all(&db.pool, &equity_only)
        .await?
        .into_iter()
        .map(|j| j.title)
        .collect();
    assert_eq!(titles, vec!["Junior Dev", "Senior Developer"]);

    db.cleanup().await
}

#[tokio::test]
async fn find_all_rejects_non_numeric_salary() -> Result<()> {
    let Some(db) = common::test_db().await? else { return Ok(()) };

    let filter = JobFilter { min_salary: Some(json!("lots")), ..Default::default() };
    let err = Job::find_all(&db.pool, &filter).await.unwrap_err();
    assert!(matches!(err, ModelError::Validation(msg) if msg == "minSalary must be of type number"));

    db.cleanup().await
}

#[tokio::test]
async fn update_with_explicit_nulls_clears_fields() -> Result<()> {
    let Some(db) = common::test_db().await? else { return Ok(()) };

    let id = db.job_id("Junior Dev").await?;
    let data: JobUpdate = serde_json::from_value(json!({ "title": "New", "salary": null, "equity": null }))?;
    let updated = Job::update(&db.pool, id, data).await?;
    assert_eq!(updated.id, id);
    assert_eq!(updated.title, "New");
    assert_eq!(updated.salary, None);
    assert_eq!(updated.equity, None);
    assert_eq!(updated.company_handle, "c1");

    assert_eq!(Job::get(&db.pool, id).await?.job, updated);

    db.cleanup().await
}

#[tokio::test]
async fn update_missing_or_empty_fails() -> Result<()> {
    let Some(db) = common::test_db().await? else { return Ok(()) };

    let data: JobUpdate = serde_json::from_value(json!({ "title": "Ghost" }))?;
    assert!(matches!(Job::update(&db.pool, 0, data).await, Err(ModelError::NotFound(_))));

    let id = db.job_id("Dev").await?;
    assert!(matches!(
        Job::update(&db.pool, id, JobUpdate::default()).await,
        Err(ModelError::Validation(_))
    ));

    db.cleanup().await
}

#[tokio::test]
async fn remove_missing_leaves_store_unchanged() -> Result<()> {
    let Some(db) = common::test_db().await? else { return Ok(()) };

    let before = Job::find_all(&db.pool, &JobFilter::default()).await?;
    let err = Job::remove(&db.pool, 0).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound(_)));
    assert_eq!(Job::find_all(&db.pool, &JobFilter::default()).await?, before);

    let id = db.job_id("Dev Intern").await?;
    Job::remove(&db.pool, id).await?;
    assert!(matches!(Job::get(&db.pool, id).await, Err(ModelError::NotFound(_))));

    db.cleanup().await
}
