use crate::error::CliError;
use async_trait::async_trait;
use connectors::sql::{
    base::adapter::SqlAdapter,
    postgres::{adapter::PgAdapter, config::PgConfig},
};
use tracing::{error, info};

/// Trait for "pinging" a destination
#[async_trait]
pub trait ConnectionPinger {
    /// Attempts to ping; returns Err if unreachable
    async fn ping(&self) -> Result<(), CliError>;
}

pub struct PostgresConnectionPinger {
    pub config: PgConfig,
}

#[async_trait]
impl ConnectionPinger for PostgresConnectionPinger {
    async fn ping(&self) -> Result<(), CliError> {
        info!("Pinging Postgres at '{}'", &self.config);

        let adapter = PgAdapter::connect(&self.config).await.map_err(|e| {
            error!("Postgres connection to '{}' failed: {}", &self.config, e);
            CliError::Connector(e)
        })?;

        let outcome = adapter.ping().await;
        adapter.close().await?;

        outcome.map_err(|e| {
            error!("Postgres ping query on '{}' failed: {}", &self.config, e);
            CliError::Database(e)
        })?;

        info!("Postgres ping to '{}' succeeded", &self.config);
        Ok(())
    }
}
