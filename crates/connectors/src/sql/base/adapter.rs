use crate::sql::base::error::DbError;
use async_trait::async_trait;
use model::core::value::Value;

/// Minimal statement surface a sink needs from a database connection.
#[async_trait]
pub trait SqlAdapter: Send + Sync {
    async fn exec(&self, query: &str) -> Result<(), DbError>;

    /// Runs one parameterized statement inside its own transaction and
    /// commits it. Returns the number of affected rows.
    async fn exec_params_tx(&self, query: &str, params: Vec<Value>) -> Result<u64, DbError>;

    /// Round-trips `SELECT 1` to confirm the connection is usable.
    async fn ping(&self) -> Result<(), DbError>;

    /// Releases the connection. Further calls fail with [`DbError::Closed`].
    async fn close(&self) -> Result<(), DbError>;
}
