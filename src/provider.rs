//! Row provider: the store abstraction the list endpoints read from and write to.

use crate::model::{ListType, Row, RowWrite, WriteMode};
use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Invalid(String),
}

impl StoreError {
    /// Diagnostic text echoed to clients as `sql_msg`. Engine errors report the engine's own message.
    pub fn sql_msg(&self) -> Option<String> {
        match self {
            StoreError::Sqlx(sqlx::Error::Database(e)) => Some(e.message().to_string()),
            other => Some(other.to_string()),
        }
    }
}

/// Rows of one read, pulled one at a time. Dropping the stream releases the cursor.
pub type RowStream<'a> = BoxStream<'a, Result<Row, StoreError>>;

#[async_trait]
pub trait RowProvider: Send + Sync {
    /// Rows of `list`, restricted to the row keyed by `argument` when given.
    fn read_table<'a>(&'a self, list: ListType, argument: Option<&'a str>) -> RowStream<'a>;

    /// Insert (`Create`) or replace (`Replace`) the row keyed by `row.argument`.
    /// A present `oldtype` moves an existing domain entry from that type into `list`.
    async fn add_to_table(&self, list: ListType, row: &RowWrite, mode: WriteMode) -> Result<(), StoreError>;

    /// Replace the group membership of the row keyed by `argument`.
    async fn edit_groups(&self, list: ListType, argument: &str, groups: &[i64]) -> Result<(), StoreError>;

    async fn remove_from_table(&self, list: ListType, argument: &str) -> Result<(), StoreError>;

    /// Cheap liveness probe used by `/ready`.
    async fn ping(&self) -> Result<(), StoreError>;
}
