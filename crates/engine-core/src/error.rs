use connectors::sql::base::error::{ConnectorError, DbError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    /// The record carries no usable value for the key column.
    #[error("Record has no value for key column '{0}'")]
    MissingKey(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Failed to connect sink: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a sync run.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to write issue {issue}: {source}")]
    Write {
        issue: String,
        #[source]
        source: SinkError,
    },

    #[error("Failed to release sink: {0}")]
    Close(#[source] SinkError),
}
