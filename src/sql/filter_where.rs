use serde_json::Value;

use super::types::{Fragment, SqlValue};
use crate::database::ModelError;

/// Predicates for a `WHERE` clause, joined with `AND` by the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    predicates: Vec<Fragment>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match.
    pub fn ilike(&mut self, column: &str, needle: &str) -> &mut Self {
        self.predicates
            .push(Fragment::bound(format!("\"{}\" ILIKE ", column), format!("%{}%", needle)));
        self
    }

    pub fn compare(&mut self, column: &str, op: &str, value: impl Into<SqlValue>) -> &mut Self {
        self.predicates
            .push(Fragment::bound(format!("\"{}\" {} ", column, op), value));
        self
    }

    /// Predicate without a bound parameter.
    pub fn raw(&mut self, sql: impl Into<String>) -> &mut Self {
        self.predicates.push(Fragment::raw(sql));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[Fragment] {
        &self.predicates
    }

    /// Renders the predicates alone, joined with `AND` and numbered from `$1`.
    #[cfg(test)]
    pub fn to_sql(&self) -> super::types::SqlQuery {
        super::statement::Statement::default().fragments(&self.predicates, " AND ").build()
    }
}

/// Reads a numeric filter value sent either as a JSON number or as a string
/// (query strings arrive as text). Non-finite values are rejected.
pub fn parse_number(key: &str, value: &Value) -> Result<f64, ModelError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(ModelError::Validation(format!("{} must be of type number", key))),
    }
}
