pub mod error;
pub mod executor;
pub mod manager;
pub mod models;
pub mod repository;

pub use error::ModelError;
pub use executor::QueryExecutor;
pub use manager::{DatabaseError, DatabaseManager};
pub use repository::Repository;
