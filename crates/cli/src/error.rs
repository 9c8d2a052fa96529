use connectors::{
    jira::error::JiraError,
    sql::base::error::{ConnectorError, DbError},
};
use engine_core::error::{SinkError, SyncError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Jira client error: {0}")]
    Jira(#[from] JiraError),

    #[error("Failed to open connection: {0}")]
    Connector(#[from] ConnectorError),

    /// PostgreSQL driver or statement error.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Failed to open sink: {0}")]
    Sink(#[from] SinkError),

    #[error("Sync failed: {0}")]
    Sync(#[from] SyncError),
}
