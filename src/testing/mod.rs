use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::database::{ModelError, QueryExecutor};
use crate::sql::SqlQuery;

enum Reply {
    Rows(Vec<Value>),
    Affected(u64),
}

/// Query executor that records every statement and replays queued replies
/// in order. With nothing queued it answers with no rows.
#[derive(Default)]
pub struct FakeExecutor {
    replies: Mutex<VecDeque<Reply>>,
    queries: Mutex<Vec<SqlQuery>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(self, rows: Vec<Value>) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Rows(rows));
        self
    }

    pub fn with_affected(self, count: u64) -> Self {
        self.replies.lock().unwrap().push_back(Reply::Affected(count));
        self
    }

    pub fn queries(&self) -> Vec<SqlQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn next_reply(&self, query: &SqlQuery) -> Option<Reply> {
        self.queries.lock().unwrap().push(query.clone());
        self.replies.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl QueryExecutor for FakeExecutor {
    async fn fetch_rows(&self, query: &SqlQuery) -> Result<Vec<Value>, ModelError> {
        match self.next_reply(query) {
            Some(Reply::Rows(rows)) => Ok(rows),
            Some(Reply::Affected(_)) => panic!("expected rows for: {}", query.query),
            None => Ok(vec![]),
        }
    }

    async fn execute(&self, query: &SqlQuery) -> Result<u64, ModelError> {
        match self.next_reply(query) {
            Some(Reply::Affected(count)) => Ok(count),
            Some(Reply::Rows(rows)) => Ok(rows.len() as u64),
            None => Ok(0),
        }
    }
}
