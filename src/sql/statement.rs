use super::types::{Fragment, SqlQuery, SqlValue};

#[derive(Debug, Clone)]
enum Segment {
    Sql(String),
    Bind(SqlValue),
}

/// Ordered list of SQL text and bound values. Placeholders are numbered
/// only when the statement is built, so clauses from different builders can
/// be concatenated without tracking positions by hand.
#[derive(Debug, Clone, Default)]
pub struct Statement {
    segments: Vec<Segment>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { segments: vec![Segment::Sql(sql.into())] }
    }

    pub fn push(mut self, sql: impl Into<String>) -> Self {
        self.segments.push(Segment::Sql(sql.into()));
        self
    }

    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.segments.push(Segment::Bind(value.into()));
        self
    }

    pub fn fragments(mut self, fragments: &[Fragment], separator: &str) -> Self {
        for (i, fragment) in fragments.iter().enumerate() {
            if i > 0 {
                self.segments.push(Segment::Sql(separator.to_string()));
            }
            self.segments.push(Segment::Sql(fragment.sql.clone()));
            if let Some(value) = &fragment.value {
                self.segments.push(Segment::Bind(value.clone()));
            }
        }
        self
    }

    /// Appends ` WHERE a AND b ...`, or nothing when there are no predicates.
    pub fn where_all(self, predicates: &[Fragment]) -> Self {
        if predicates.is_empty() {
            return self;
        }
        self.push(" WHERE ").fragments(predicates, " AND ")
    }

    pub fn build(self) -> SqlQuery {
        let mut query = String::new();
        let mut params = Vec::new();
        for segment in self.segments {
            match segment {
                Segment::Sql(sql) => query.push_str(&sql),
                Segment::Bind(value) => {
                    params.push(value);
                    query.push_str(&format!("${}", params.len()));
                }
            }
        }
        SqlQuery { query, params }
    }
}
