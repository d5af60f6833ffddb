#![allow(dead_code)]

use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use uuid::Uuid;

const SCHEMA_SQL: &str = include_str!("../fixtures/schema.sql");
const SEED_SQL: &str = include_str!("../fixtures/seed.sql");

/// A pool whose connections all point at a private schema, so tests can
/// run in parallel against one database.
pub struct TestDb {
    pub pool: PgPool,
    admin: PgPool,
    schema: String,
}

/// Connects to `DATABASE_URL` and loads the fixture schema and seed data.
/// Returns `None` when no database is configured so the caller can skip.
pub async fn test_db() -> Result<Option<TestDb>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return Ok(None);
    };
    // Cheap bcrypt rounds for user fixtures
    if std::env::var("APP_ENV").is_err() {
        std::env::set_var("APP_ENV", "test");
    }

    let schema = format!("test_{}", Uuid::new_v4().simple());
    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .context("failed to connect to DATABASE_URL")?;
    admin.execute(format!("CREATE SCHEMA \"{}\"", schema).as_str()).await?;

    let search_path = schema.clone();
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .after_connect(move |conn, _meta| {
            let sql = format!("SET search_path TO \"{}\"", search_path);
            Box::pin(async move {
                conn.execute(sql.as_str()).await?;
                Ok(())
            })
        })
        .connect(&url)
        .await?;

    pool.execute(SCHEMA_SQL).await.context("failed to create fixture schema")?;
    pool.execute(SEED_SQL).await.context("failed to load seed data")?;

    Ok(Some(TestDb { pool, admin, schema }))
}

impl TestDb {
    pub async fn count(&self, table: &str) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    pub async fn job_id(&self, title: &str) -> Result<i32> {
        let row: (i32,) = sqlx::query_as("SELECT id FROM jobs WHERE title = $1")
            .bind(title)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    pub async fn cleanup(self) -> Result<()> {
        self.pool.close().await;
        self.admin
            .execute(format!("DROP SCHEMA \"{}\" CASCADE", self.schema).as_str())
            .await?;
        Ok(())
    }
}
