use thiserror::Error;

/// Errors raised by the models. The HTTP boundary maps each variant to a
/// response status.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Empty update payload, bad filter value, conflicting range, bad reference.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    NotFound(String),

    /// The query could not be executed or its result decoded.
    #[error("Query failed: {0}")]
    Transport(sqlx::Error),

    /// Failure outside the database, e.g. password hashing.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// SQLSTATE codes for input the database refused: value too long, numeric
/// out of range, not-null violation, check violation.
const INVALID_INPUT_CODES: [&str; 4] = ["22001", "22003", "23502", "23514"];

fn is_invalid_input(code: &str) -> bool {
    INVALID_INPUT_CODES.contains(&code)
}

impl From<sqlx::Error> for ModelError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return ModelError::Duplicate(format!(
                    "Duplicate value violates {}",
                    db_err.constraint().unwrap_or("a unique constraint")
                ));
            }
            if db_err.is_foreign_key_violation() {
                return ModelError::Validation(format!(
                    "Referenced record does not exist ({})",
                    db_err.constraint().unwrap_or("foreign key")
                ));
            }
            if db_err.code().as_deref().map_or(false, is_invalid_input) {
                return ModelError::Validation(db_err.message().to_string());
            }
        }
        ModelError::Transport(err)
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Transport(sqlx::Error::Decode(Box::new(err)))
    }
}
