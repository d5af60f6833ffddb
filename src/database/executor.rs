use std::time::Instant;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use sqlx::{
    postgres::{PgArguments, PgRow},
    Column, PgPool, Row, TypeInfo, ValueRef,
};

use crate::config;
use crate::database::ModelError;
use crate::sql::{SqlQuery, SqlValue};

/// Runs rendered statements. Rows come back as JSON objects keyed by the
/// selected column names (or their aliases), in the statement's row order.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn fetch_rows(&self, query: &SqlQuery) -> Result<Vec<Value>, ModelError>;

    /// Returns the number of rows affected.
    async fn execute(&self, query: &SqlQuery) -> Result<u64, ModelError>;
}

#[async_trait]
impl QueryExecutor for PgPool {
    async fn fetch_rows(&self, query: &SqlQuery) -> Result<Vec<Value>, ModelError> {
        let started = Instant::now();

        let mut q = sqlx::query(&query.query);
        for p in query.params.iter() {
            q = bind_value(q, p);
        }
        let rows = q.fetch_all(self).await?;
        log_query(&query.query, started);

        rows.iter().map(row_to_json).collect()
    }

    async fn execute(&self, query: &SqlQuery) -> Result<u64, ModelError> {
        let started = Instant::now();

        let mut q = sqlx::query(&query.query);
        for p in query.params.iter() {
            q = bind_value(q, p);
        }
        let result = q.execute(self).await?;
        log_query(&query.query, started);

        Ok(result.rows_affected())
    }
}

fn bind_value<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &SqlValue,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        SqlValue::Bool(b) => q.bind(*b),
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Float(f) => q.bind(*f),
        SqlValue::Decimal(d) => q.bind(*d),
        SqlValue::Text(s) => q.bind(s.clone()),
    }
}

/// Converts a row to a JSON object keyed by column name.
fn row_to_json(row: &PgRow) -> Result<Value, ModelError> {
    let mut object = Map::new();
    for column in row.columns() {
        let i = column.ordinal();
        let value = if row.try_get_raw(i)?.is_null() {
            Value::Null
        } else {
            match column.type_info().name() {
                "BOOL" => Value::Bool(row.try_get::<bool, _>(i)?),
                "INT2" => Value::from(row.try_get::<i16, _>(i)?),
                "INT4" => Value::from(row.try_get::<i32, _>(i)?),
                "INT8" => Value::from(row.try_get::<i64, _>(i)?),
                "FLOAT4" => Value::from(row.try_get::<f32, _>(i)?),
                "FLOAT8" => Value::from(row.try_get::<f64, _>(i)?),
                // Exact decimal text, not a float
                "NUMERIC" => Value::String(row.try_get::<Decimal, _>(i)?.to_string()),
                "JSON" | "JSONB" => row.try_get::<Value, _>(i)?,
                _ => Value::String(row.try_get::<String, _>(i)?),
            }
        };
        object.insert(column.name().to_string(), value);
    }
    Ok(Value::Object(object))
}

fn log_query(sql: &str, started: Instant) {
    let db = &config::config().database;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if db.enable_query_logging {
        tracing::debug!(elapsed_ms, "{}", sql);
    }
    if elapsed_ms > db.slow_query_threshold_ms {
        tracing::warn!(elapsed_ms, "Slow query: {}", sql);
    }
}
