//! Query-execution abstraction
//!
//! [`RawStatements`] is the restricted interface handed to the rest of an
//! application: SQL text in, affected rows or result rows out. It has no
//! notion of models, transactions or statement caching.

use crate::domain::Result;
use async_trait::async_trait;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

/// Raw SQL statement execution
#[async_trait]
pub trait RawStatements: Send + Sync {
    /// Execute a statement and return the number of affected rows
    ///
    /// # Errors
    ///
    /// Returns an error if the statement is empty, no connection can be
    /// obtained, or the server rejects the statement.
    async fn execute_raw(&self, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64>;

    /// Run a query and return its rows
    ///
    /// # Errors
    ///
    /// Same conditions as [`RawStatements::execute_raw`].
    async fn query_raw(&self, statement: &str, params: &[&(dyn ToSql + Sync)])
        -> Result<Vec<Row>>;

    /// Run one or more `;`-separated statements without parameters
    async fn batch_execute_raw(&self, statements: &str) -> Result<()>;
}
