pub mod types;
pub mod statement;
pub mod partial_update;
pub mod filter_where;

pub use types::*;
pub use statement::Statement;
pub use partial_update::{sql_for_partial_update, SetClause};
pub use filter_where::{parse_number, WhereClause};
