//! Raw-statement adapter over a [`ConnectionHandle`]

use super::client::ConnectionHandle;
use crate::adapters::database::traits::RawStatements;
use crate::domain::{DatabaseError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

/// Executes raw SQL through a shared connection handle
///
/// This is the only way the adapter lets callers reach the database: the
/// handle stays private, so pool management, transactions and prepared
/// statement caching are not available through it. Construction issues no
/// round-trip to the server.
pub struct RawExecutor {
    handle: Arc<ConnectionHandle>,
}

impl std::fmt::Debug for RawExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawExecutor")
            .field("url", &self.handle.redacted_url())
            .finish()
    }
}

impl RawExecutor {
    /// Wrap a handle
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::PoolClosed`] if the handle was already closed.
    pub fn new(handle: Arc<ConnectionHandle>) -> Result<Self> {
        if handle.is_closed() {
            return Err(DatabaseError::PoolClosed.into());
        }
        Ok(Self { handle })
    }
}

fn ensure_not_empty(statement: &str) -> Result<()> {
    if statement.trim().is_empty() {
        return Err(DatabaseError::EmptyStatement.into());
    }
    Ok(())
}

#[async_trait]
impl RawStatements for RawExecutor {
    async fn execute_raw(&self, statement: &str, params: &[&(dyn ToSql + Sync)]) -> Result<u64> {
        ensure_not_empty(statement)?;
        let client = self.handle.checkout().await?;

        client
            .execute(statement, params)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()).into())
    }

    async fn query_raw(
        &self,
        statement: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>> {
        ensure_not_empty(statement)?;
        let client = self.handle.checkout().await?;

        client
            .query(statement, params)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()).into())
    }

    async fn batch_execute_raw(&self, statements: &str) -> Result<()> {
        ensure_not_empty(statements)?;
        let client = self.handle.checkout().await?;

        tracing::debug!(bytes = statements.len(), "Executing raw batch");
        client
            .batch_execute(statements)
            .await
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()).into())
    }
}
