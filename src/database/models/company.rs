use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::double_option;
use crate::database::executor::QueryExecutor;
use crate::database::repository::Repository;
use crate::database::ModelError;
use crate::sql::{parse_number, sql_for_partial_update, Column, SqlValue, Statement, WhereClause};

pub(super) const COLUMNS: &str = r#"handle, name, description, num_employees AS "numEmployees", logo_url AS "logoUrl""#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A job as listed under its company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Fields a company update may touch. `handle` is immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyField {
    Name,
    Description,
    NumEmployees,
    LogoUrl,
}

impl Column for CompanyField {
    fn field_name(self) -> &'static str {
        match self {
            CompanyField::Name => "name",
            CompanyField::Description => "description",
            CompanyField::NumEmployees => "numEmployees",
            CompanyField::LogoUrl => "logoUrl",
        }
    }

    fn column_name(self) -> &'static str {
        match self {
            CompanyField::NumEmployees => "num_employees",
            CompanyField::LogoUrl => "logo_url",
            other => other.field_name(),
        }
    }
}

/// Partial update. Outer `None` leaves a field alone; `Some(None)` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyUpdate {
    pub fn into_changes(self) -> Vec<(CompanyField, SqlValue)> {
        let mut changes = Vec::new();
        if let Some(v) = self.name {
            changes.push((CompanyField::Name, SqlValue::from(v)));
        }
        if let Some(v) = self.description {
            changes.push((CompanyField::Description, SqlValue::from(v)));
        }
        if let Some(v) = self.num_employees {
            changes.push((CompanyField::NumEmployees, SqlValue::from(v)));
        }
        if let Some(v) = self.logo_url {
            changes.push((CompanyField::LogoUrl, SqlValue::from(v)));
        }
        changes
    }
}

/// Search criteria for `Company::find_all`. Thresholds accept numbers or
/// numeric strings and are validated when the clause is built.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    pub name_like: Option<String>,
    pub min_employees: Option<Value>,
    pub max_employees: Option<Value>,
}

impl CompanyFilter {
    pub fn to_where(&self) -> Result<WhereClause, ModelError> {
        let min = self
            .min_employees
            .as_ref()
            .map(|v| parse_number("minEmployees", v))
            .transpose()?;
        let max = self
            .max_employees
            .as_ref()
            .map(|v| parse_number("maxEmployees", v))
            .transpose()?;

        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(ModelError::Validation(
                    "minEmployees cannot be greater than maxEmployees".to_string(),
                ));
            }
        }

        let mut clause = WhereClause::new();
        if let Some(name) = &self.name_like {
            clause.ilike("name", name);
        }
        if let Some(min) = min {
            clause.compare("num_employees", ">=", min);
        }
        if let Some(max) = max {
            clause.compare("num_employees", "<=", max);
        }
        Ok(clause)
    }
}

impl Company {
    /// Insert a company. Fails with `Duplicate` if the handle is taken.
    pub async fn create<E: QueryExecutor>(db: &E, data: NewCompany) -> Result<Company, ModelError> {
        let repo = Repository::new(db);

        let existing = Statement::new("SELECT handle FROM companies WHERE handle = ")
            .bind(data.handle.as_str())
            .build();
        if repo.select_one::<Value>(&existing).await?.is_some() {
            return Err(ModelError::Duplicate(format!("Duplicate company: {}", data.handle)));
        }

        let insert = Statement::new(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) VALUES (",
        )
        .bind(data.handle.as_str())
        .push(", ")
        .bind(data.name)
        .push(", ")
        .bind(data.description)
        .push(", ")
        .bind(data.num_employees)
        .push(", ")
        .bind(data.logo_url)
        .push(format!(") RETURNING {}", COLUMNS))
        .build();

        let company = repo
            .select_404(&insert, || format!("No company: {}", data.handle))
            .await?;
        tracing::info!("Created company {}", data.handle);
        Ok(company)
    }

    /// All companies matching `filter`, ordered by name.
    pub async fn find_all<E: QueryExecutor>(db: &E, filter: &CompanyFilter) -> Result<Vec<Company>, ModelError> {
        let clause = filter.to_where()?;
        let query = Statement::new(format!("SELECT {} FROM companies", COLUMNS))
            .where_all(clause.predicates())
            .push(" ORDER BY name")
            .build();

        Repository::new(db).select_any(&query).await
    }

    /// A company with its jobs ordered by id.
    pub async fn get<E: QueryExecutor>(db: &E, handle: &str) -> Result<CompanyDetail, ModelError> {
        let repo = Repository::new(db);

        let query = Statement::new(format!("SELECT {} FROM companies WHERE handle = ", COLUMNS))
            .bind(handle)
            .build();
        let company: Company = repo
            .select_404(&query, || format!("No company: {}", handle))
            .await?;

        let jobs_query = Statement::new(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = ",
        )
        .bind(handle)
        .push(" ORDER BY id")
        .build();
        let jobs = repo.select_any(&jobs_query).await?;

        Ok(CompanyDetail { company, jobs })
    }

    pub async fn update<E: QueryExecutor>(db: &E, handle: &str, data: CompanyUpdate) -> Result<Company, ModelError> {
        let set = sql_for_partial_update(data.into_changes())?;
        let query = Statement::new("UPDATE companies SET ")
            .fragments(set.assignments(), ", ")
            .push(" WHERE handle = ")
            .bind(handle)
            .push(format!(" RETURNING {}", COLUMNS))
            .build();

        Repository::new(db)
            .select_404(&query, || format!("No company: {}", handle))
            .await
    }

    pub async fn remove<E: QueryExecutor>(db: &E, handle: &str) -> Result<(), ModelError> {
        let query = Statement::new("DELETE FROM companies WHERE handle = ")
            .bind(handle)
            .build();

        Repository::new(db)
            .delete_404(&query, || format!("No company: {}", handle))
            .await?;
        tracing::info!("Removed company {}", handle);
        Ok(())
    }
}
