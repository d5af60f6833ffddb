use rust_decimal::Decimal;

/// A bound query parameter. Nullable variants carry their SQL type so a
/// cleared column binds as a typed NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Bool(bool),
    Int(Option<i32>),
    Float(f64),
    Decimal(Option<Decimal>),
    Text(Option<String>),
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(Some(v))
    }
}

impl From<Option<i32>> for SqlValue {
    fn from(v: Option<i32>) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(Some(v))
    }
}

impl From<Option<Decimal>> for SqlValue {
    fn from(v: Option<Decimal>) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(Some(v.to_string()))
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(Some(v))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        SqlValue::Text(v)
    }
}

/// A piece of SQL optionally followed by a single bound value. The
/// placeholder for the value is rendered directly after `sql`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub value: Option<SqlValue>,
}

impl Fragment {
    pub fn bound(sql: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self { sql: sql.into(), value: Some(value.into()) }
    }

    pub fn raw(sql: impl Into<String>) -> Self {
        Self { sql: sql.into(), value: None }
    }
}

/// Rendered statement ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub query: String,
    pub params: Vec<SqlValue>,
}

/// A closed set of updatable fields for one entity.
///
/// `field_name` is the key clients send; `column_name` is the storage column
/// and defaults to the field name when no translation is needed.
pub trait Column: Copy + std::fmt::Debug {
    fn field_name(self) -> &'static str;

    fn column_name(self) -> &'static str {
        self.field_name()
    }
}
