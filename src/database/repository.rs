use serde::de::DeserializeOwned;

use crate::database::executor::QueryExecutor;
use crate::database::ModelError;
use crate::sql::SqlQuery;

/// Typed row access on top of a `QueryExecutor`.
pub struct Repository<'e, E> {
    executor: &'e E,
}

impl<'e, E> Repository<'e, E>
where
    E: QueryExecutor,
{
    pub fn new(executor: &'e E) -> Self {
        Self { executor }
    }

    pub async fn select_any<T: DeserializeOwned>(&self, query: &SqlQuery) -> Result<Vec<T>, ModelError> {
        self.executor
            .fetch_rows(query)
            .await?
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(ModelError::from))
            .collect()
    }

    pub async fn select_one<T: DeserializeOwned>(&self, query: &SqlQuery) -> Result<Option<T>, ModelError> {
        match self.executor.fetch_rows(query).await?.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    pub async fn select_404<T: DeserializeOwned>(
        &self,
        query: &SqlQuery,
        not_found: impl FnOnce() -> String,
    ) -> Result<T, ModelError> {
        self.select_one(query)
            .await?
            .ok_or_else(|| ModelError::NotFound(not_found()))
    }

    pub async fn delete_404(&self, query: &SqlQuery, not_found: impl FnOnce() -> String) -> Result<(), ModelError> {
        match self.executor.execute(query).await? {
            0 => Err(ModelError::NotFound(not_found())),
            _ => Ok(()),
        }
    }
}
