use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::{hash_password, verify_password};
use crate::database::executor::QueryExecutor;
use crate::database::repository::Repository;
use crate::database::ModelError;
use crate::sql::{sql_for_partial_update, Column, SqlValue, Statement};

const COLUMNS: &str = r#"username, first_name AS "firstName", last_name AS "lastName", email, is_admin AS "isAdmin""#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
struct UserWithPassword {
    #[serde(flatten)]
    user: User,
    password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    FirstName,
    LastName,
    Password,
    Email,
    IsAdmin,
}

impl Column for UserField {
    fn field_name(self) -> &'static str {
        match self {
            UserField::FirstName => "firstName",
            UserField::LastName => "lastName",
            UserField::Password => "password",
            UserField::Email => "email",
            UserField::IsAdmin => "isAdmin",
        }
    }

    fn column_name(self) -> &'static str {
        match self {
            UserField::FirstName => "first_name",
            UserField::LastName => "last_name",
            UserField::IsAdmin => "is_admin",
            other => other.field_name(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
}

impl UserUpdate {
    /// Changes in field order; a new password is hashed before it is bound.
    pub async fn into_changes(self) -> Result<Vec<(UserField, SqlValue)>, ModelError> {
        let mut changes = Vec::new();
        if let Some(v) = self.first_name {
            changes.push((UserField::FirstName, SqlValue::from(v)));
        }
        if let Some(v) = self.last_name {
            changes.push((UserField::LastName, SqlValue::from(v)));
        }
        if let Some(v) = self.password {
            changes.push((UserField::Password, SqlValue::from(hash_password(v).await?)));
        }
        if let Some(v) = self.email {
            changes.push((UserField::Email, SqlValue::from(v)));
        }
        if let Some(v) = self.is_admin {
            changes.push((UserField::IsAdmin, SqlValue::from(v)));
        }
        Ok(changes)
    }
}

impl User {
    /// Returns the user when the password matches, `None` otherwise.
    pub async fn authenticate<E: QueryExecutor>(
        db: &E,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, ModelError> {
        let query = Statement::new(format!("SELECT {}, password FROM users WHERE username = ", COLUMNS))
            .bind(username)
            .build();

        let Some(found) = Repository::new(db).select_one::<UserWithPassword>(&query).await? else {
            return Ok(None);
        };

        if verify_password(password.to_string(), found.password).await? {
            Ok(Some(found.user))
        } else {
            tracing::warn!("Failed login for {}", username);
            Ok(None)
        }
    }

    /// Insert a user with a hashed password. Fails with `Duplicate` if the
    /// username is taken.
    pub async fn register<E: QueryExecutor>(db: &E, data: NewUser) -> Result<User, ModelError> {
        let repo = Repository::new(db);

        let existing = Statement::new("SELECT username FROM users WHERE username = ")
            .bind(data.username.as_str())
            .build();
        if repo.select_one::<Value>(&existing).await?.is_some() {
            return Err(ModelError::Duplicate(format!("Duplicate username: {}", data.username)));
        }

        let hashed = hash_password(data.password).await?;
        let insert = Statement::new(
            "INSERT INTO users (username, password, first_name, last_name, email, is_admin) VALUES (",
        )
        .bind(data.username.as_str())
        .push(", ")
        .bind(hashed)
        .push(", ")
        .bind(data.first_name)
        .push(", ")
        .bind(data.last_name)
        .push(", ")
        .bind(data.email)
        .push(", ")
        .bind(data.is_admin)
        .push(format!(") RETURNING {}", COLUMNS))
        .build();

        let user = repo
            .select_404(&insert, || format!("No user: {}", data.username))
            .await?;
        tracing::info!("Registered user {}", data.username);
        Ok(user)
    }

    pub async fn find_all<E: QueryExecutor>(db: &E) -> Result<Vec<User>, ModelError> {
        let query = Statement::new(format!("SELECT {} FROM users ORDER BY username", COLUMNS)).build();
        Repository::new(db).select_any(&query).await
    }

    pub async fn get<E: QueryExecutor>(db: &E, username: &str) -> Result<User, ModelError> {
        let query = Statement::new(format!("SELECT {} FROM users WHERE username = ", COLUMNS))
            .bind(username)
            .build();

        Repository::new(db)
            .select_404(&query, || format!("No user: {}", username))
            .await
    }

    pub async fn update<E: QueryExecutor>(db: &E, username: &str, data: UserUpdate) -> Result<User, ModelError> {
        let set = sql_for_partial_update(data.into_changes().await?)?;
        let query = Statement::new("UPDATE users SET ")
            .fragments(set.assignments(), ", ")
            .push(" WHERE username = ")
            .bind(username)
            .push(format!(" RETURNING {}", COLUMNS))
            .build();

        Repository::new(db)
            .select_404(&query, || format!("No user: {}", username))
            .await
    }

    pub async fn remove<E: QueryExecutor>(db: &E, username: &str) -> Result<(), ModelError> {
        let query = Statement::new("DELETE FROM users WHERE username = ")
            .bind(username)
            .build();

        Repository::new(db)
            .delete_404(&query, || format!("No user: {}", username))
            .await
    }
}
