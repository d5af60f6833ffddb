use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::company::{Company, COLUMNS as COMPANY_COLUMNS};
use super::double_option;
use crate::database::executor::QueryExecutor;
use crate::database::repository::Repository;
use crate::database::ModelError;
use crate::sql::{parse_number, sql_for_partial_update, Column, SqlValue, Statement, WhereClause};

const COLUMNS: &str = r#"id, title, salary, equity, company_handle AS "companyHandle""#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// A job with its owning company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: Job,
    pub company: Company,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Fields a job update may touch. `id` and `companyHandle` are fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    Salary,
    Equity,
}

impl Column for JobField {
    fn field_name(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Salary => "salary",
            JobField::Equity => "equity",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub equity: Option<Option<Decimal>>,
}

impl JobUpdate {
    pub fn into_changes(self) -> Vec<(JobField, SqlValue)> {
        let mut changes = Vec::new();
        if let Some(v) = self.title {
            changes.push((JobField::Title, SqlValue::from(v)));
        }
        if let Some(v) = self.salary {
            changes.push((JobField::Salary, SqlValue::from(v)));
        }
        if let Some(v) = self.equity {
            changes.push((JobField::Equity, SqlValue::from(v)));
        }
        changes
    }
}

/// Search criteria for `Job::find_all`. `hasEquity: false` is the same as
/// leaving it out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<Value>,
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub fn to_where(&self) -> Result<WhereClause, ModelError> {
        let min_salary = self
            .min_salary
            .as_ref()
            .map(|v| parse_number("minSalary", v))
            .transpose()?;

        let mut clause = WhereClause::new();
        if let Some(title) = &self.title {
            clause.ilike("title", title);
        }
        if let Some(min) = min_salary {
            clause.compare("salary", ">=", min);
        }
        if self.has_equity == Some(true) {
            clause.raw("\"equity\" > 0");
        }
        Ok(clause)
    }
}

impl Job {
    /// Insert a job. A `companyHandle` with no matching company fails with
    /// `Validation` via the foreign key.
    pub async fn create<E: QueryExecutor>(db: &E, data: NewJob) -> Result<Job, ModelError> {
        let insert = Statement::new("INSERT INTO jobs (title, salary, equity, company_handle) VALUES (")
            .bind(data.title)
            .push(", ")
            .bind(data.salary)
            .push(", ")
            .bind(data.equity)
            .push(", ")
            .bind(data.company_handle)
            .push(format!(") RETURNING {}", COLUMNS))
            .build();

        let job: Job = Repository::new(db)
            .select_404(&insert, || "Job insert returned no row".to_string())
            .await?;
        tracing::info!("Created job {} for {}", job.id, job.company_handle);
        Ok(job)
    }

    /// All jobs matching `filter`, ordered by title.
    pub async fn find_all<E: QueryExecutor>(db: &E, filter: &JobFilter) -> Result<Vec<Job>, ModelError> {
        let clause = filter.to_where()?;
        let query = Statement::new(format!("SELECT {} FROM jobs", COLUMNS))
            .where_all(clause.predicates())
            .push(" ORDER BY title")
            .build();

        Repository::new(db).select_any(&query).await
    }

    /// A job with its company nested.
    pub async fn get<E: QueryExecutor>(db: &E, id: i32) -> Result<JobDetail, ModelError> {
        let repo = Repository::new(db);

        let query = Statement::new(format!("SELECT {} FROM jobs WHERE id = ", COLUMNS))
            .bind(id)
            .build();
        let job: Job = repo.select_404(&query, || format!("No job: {}", id)).await?;

        let company_query = Statement::new(format!("SELECT {} FROM companies WHERE handle = ", COMPANY_COLUMNS))
            .bind(job.company_handle.as_str())
            .build();
        let company = repo
            .select_404(&company_query, || format!("No company: {}", job.company_handle))
            .await?;

        Ok(JobDetail { job, company })
    }

    pub async fn update<E: QueryExecutor>(db: &E, id: i32, data: JobUpdate) -> Result<Job, ModelError> {
        let set = sql_for_partial_update(data.into_changes())?;
        let query = Statement::new("UPDATE jobs SET ")
            .fragments(set.assignments(), ", ")
            .push(" WHERE id = ")
            .bind(id)
            .push(format!(" RETURNING {}", COLUMNS))
            .build();

        Repository::new(db)
            .select_404(&query, || format!("No job: {}", id))
            .await
    }

    pub async fn remove<E: QueryExecutor>(db: &E, id: i32) -> Result<(), ModelError> {
        let query = Statement::new("DELETE FROM jobs WHERE id = ").bind(id).build();

        Repository::new(db)
            .delete_404(&query, || format!("No job: {}", id))
            .await?;
        tracing::info!("Removed job {}", id);
        Ok(())
    }
}
