use rust_decimal::Decimal;

use super::auth::LoginRequest;
use super::extract::{FieldErrors, Validate};
use crate::database::models::{CompanyUpdate, JobUpdate, NewCompany, NewJob, NewUser, UserUpdate};
use crate::error::ApiError;

const HANDLE_MAX: usize = 25;
const USERNAME_MAX: usize = 25;
const PASSWORD_MIN: usize = 5;

fn non_empty(s: &str) -> bool {
    !s.trim().is_empty()
}

/// Handles are stored lowercase only.
fn valid_handle(s: &str) -> bool {
    s == s.to_lowercase()
}

fn valid_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

fn valid_email(s: &str) -> bool {
    matches!(s.split_once('@'), Some((user, domain)) if !user.is_empty() && domain.contains('.'))
}

fn valid_equity(d: &Decimal) -> bool {
    *d >= Decimal::ZERO && *d <= Decimal::ONE
}

impl Validate for NewCompany {
    fn validate(&self) -> Result<(), ApiError> {
        FieldErrors::new()
            .check("handle", non_empty(&self.handle), "must not be empty")
            .check("handle", self.handle.chars().count() <= HANDLE_MAX, "must be at most 25 characters")
            .check("handle", valid_handle(&self.handle), "must be lowercase")
            .check("name", non_empty(&self.name), "must not be empty")
            .check("numEmployees", self.num_employees.map_or(true, |n| n >= 0), "must be non-negative")
            .check("logoUrl", self.logo_url.as_deref().map_or(true, valid_url), "must be a URL")
            .finish()
    }
}

impl Validate for CompanyUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        FieldErrors::new()
            .check("name", self.name.as_deref().map_or(true, non_empty), "must not be empty")
            .check("numEmployees", !matches!(self.num_employees, Some(Some(n)) if n < 0), "must be non-negative")
            .check("logoUrl", !matches!(&self.logo_url, Some(Some(u)) if !valid_url(u)), "must be a URL")
            .finish()
    }
}

impl Validate for NewJob {
    fn validate(&self) -> Result<(), ApiError> {
        FieldErrors::new()
            .check("title", non_empty(&self.title), "must not be empty")
            .check("salary", self.salary.map_or(true, |s| s >= 0), "must be non-negative")
            .check("equity", self.equity.as_ref().map_or(true, valid_equity), "must be between 0 and 1")
            .check("companyHandle", non_empty(&self.company_handle), "must not be empty")
            .finish()
    }
}

impl Validate for JobUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        FieldErrors::new()
            .check("title", self.title.as_deref().map_or(true, non_empty), "must not be empty")
            .check("salary", !matches!(self.salary, Some(Some(s)) if s < 0), "must be non-negative")
            .check("equity", !matches!(&self.equity, Some(Some(e)) if !valid_equity(e)), "must be between 0 and 1")
            .finish()
    }
}

impl Validate for NewUser {
    fn validate(&self) -> Result<(), ApiError> {
        FieldErrors::new()
            .check("username", non_empty(&self.username), "must not be empty")
            .check("username", self.username.chars().count() <= USERNAME_MAX, "must be at most 25 characters")
            .check("password", self.password.len() >= PASSWORD_MIN, "must be at least 5 characters")
            .check("firstName", non_empty(&self.first_name), "must not be empty")
            .check("lastName", non_empty(&self.last_name), "must not be empty")
            .check("email", valid_email(&self.email), "must be an email address")
            .finish()
    }
}

impl Validate for UserUpdate {
    fn validate(&self) -> Result<(), ApiError> {
        FieldErrors::new()
            .check("password", self.password.as_ref().map_or(true, |p| p.len() >= PASSWORD_MIN), "must be at least 5 characters")
            .check("firstName", self.first_name.as_deref().map_or(true, non_empty), "must not be empty")
            .check("lastName", self.last_name.as_deref().map_or(true, non_empty), "must not be empty")
            .check("email", self.email.as_deref().map_or(true, valid_email), "must be an email address")
            .finish()
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ApiError> {
        FieldErrors::new()
            .check("username", non_empty(&self.username), "must not be empty")
            .check("password", !self.password.is_empty(), "must not be empty")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_errors(err: ApiError) -> serde_json::Value {
        err.to_json()["field_errors"].clone()
    }

    #[test]
    fn new_company_checks_each_field() {
        let company: NewCompany = serde_json::from_value(json!({
            "handle": "",
            "name": "New",
            "description": "d",
            "numEmployees": -1,
            "logoUrl": "not a url"
        }))
        .unwrap();

        let errors = field_errors(company.validate().unwrap_err());
        assert_eq!(errors["handle"], "must not be empty");
        assert_eq!(errors["numEmployees"], "must be non-negative");
        assert_eq!(errors["logoUrl"], "must be a URL");
        assert!(errors.get("name").is_none());
    }

    #[test]
    fn job_equity_must_be_a_fraction() {
        let job: NewJob = serde_json::from_value(json!({
            "title": "J",
            "equity": 1.5,
            "companyHandle": "c1"
        }))
        .unwrap();
        assert_eq!(field_errors(job.validate().unwrap_err())["equity"], "must be between 0 and 1");

        let ok: JobUpdate = serde_json::from_value(json!({ "equity": null, "salary": null })).unwrap();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn new_user_checks_email_and_password() {
        let user: NewUser = serde_json::from_value(json!({
            "username": "new",
            "password": "pw",
            "firstName": "F",
            "lastName": "L",
            "email": "not-an-email"
        }))
        .unwrap();

        let errors = field_errors(user.validate().unwrap_err());
        assert_eq!(errors["password"], "must be at least 5 characters");
        assert_eq!(errors["email"], "must be an email address");
    }

    #[test]
    fn new_user_username_fits_column() {
        let user = |username: String| -> NewUser {
            serde_json::from_value(json!({
                "username": username,
                "password": "password1",
                "firstName": "F",
                "lastName": "L",
                "email": "u@example.com"
            }))
            .unwrap()
        };

        assert!(user("a".repeat(25)).validate().is_ok());
        let errors = field_errors(user("a".repeat(26)).validate().unwrap_err());
        assert_eq!(errors["username"], "must be at most 25 characters");
    }

    #[test]
    fn new_company_handle_must_be_lowercase() {
        let company = |handle: &str| -> NewCompany {
            serde_json::from_value(json!({ "handle": handle, "name": "N", "description": "d" })).unwrap()
        };

        assert!(company("acme-co").validate().is_ok());
        let errors = field_errors(company("AcMe").validate().unwrap_err());
        assert_eq!(errors["handle"], "must be lowercase");
    }
}
