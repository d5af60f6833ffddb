use super::types::{Column, Fragment, SqlValue};
use crate::database::ModelError;

/// `SET` assignments for a partial update, one per supplied field.
#[derive(Debug, Clone, PartialEq)]
pub struct SetClause {
    assignments: Vec<Fragment>,
}

impl SetClause {
    pub fn assignments(&self) -> &[Fragment] {
        &self.assignments
    }

    /// Renders the assignments alone, numbered from `$1`.
    #[cfg(test)]
    pub fn to_sql(&self) -> super::types::SqlQuery {
        super::statement::Statement::default().fragments(&self.assignments, ", ").build()
    }
}

/// Builds `"<column>"=$n` assignments in input order.
///
/// Fails only when `data` is empty. Field names are already restricted to
/// the entity's `Column` enum, and values are typed by the caller.
pub fn sql_for_partial_update<C: Column>(data: Vec<(C, SqlValue)>) -> Result<SetClause, ModelError> {
    if data.is_empty() {
        return Err(ModelError::Validation("No data".to_string()));
    }

    let assignments = data
        .into_iter()
        .map(|(field, value)| Fragment::bound(format!("\"{}\"=", field.column_name()), value))
        .collect();

    Ok(SetClause { assignments })
}
