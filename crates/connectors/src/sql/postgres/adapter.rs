use crate::sql::{
    base::{
        adapter::SqlAdapter,
        error::{ConnectorError, DbError},
    },
    postgres::{config::PgConfig, params::PgParamStore, utils::connect_client},
};
use async_trait::async_trait;
use model::core::value::Value;
use tokio::{sync::Mutex, task::JoinHandle};
use tokio_postgres::Client;
use tracing::{debug, info, warn};

/// Single, unpooled connection to the destination database.
///
/// The connection lives until [`SqlAdapter::close`] is called; after that
/// every statement fails with [`DbError::Closed`].
pub struct PgAdapter {
    inner: Mutex<Option<Connection>>,
}

struct Connection {
    client: Client,
    driver: JoinHandle<()>,
}

impl PgAdapter {
    pub async fn connect(config: &PgConfig) -> Result<Self, ConnectorError> {
        info!("Connecting to Postgres at {config}");
        let (client, driver) = connect_client(config.to_driver_config()).await?;
        Ok(PgAdapter {
            inner: Mutex::new(Some(Connection { client, driver })),
        })
    }
}

#[async_trait]
impl SqlAdapter for PgAdapter {
    async fn exec(&self, query: &str) -> Result<(), DbError> {
        let guard = self.inner.lock().await;
        let conn = guard.as_ref().ok_or(DbError::Closed)?;
        conn.client.batch_execute(query).await?;
        Ok(())
    }

    async fn exec_params_tx(&self, query: &str, params: Vec<Value>) -> Result<u64, DbError> {
        let bindings = PgParamStore::from_values(params);
        let mut guard = self.inner.lock().await;
        let conn = guard.as_mut().ok_or(DbError::Closed)?;

        // Dropping an uncommitted transaction rolls it back.
        let tx = conn.client.transaction().await?;
        let affected = tx.execute(query, &bindings.as_refs()).await?;
        tx.commit().await?;

        debug!(affected, "Committed statement");
        Ok(affected)
    }

    async fn ping(&self) -> Result<(), DbError> {
        let guard = self.inner.lock().await;
        let conn = guard.as_ref().ok_or(DbError::Closed)?;
        let row = conn.client.query_one("SELECT 1", &[]).await?;
        let val: i32 = row.get(0);
        if val != 1 {
            return Err(DbError::Unknown(format!(
                "Ping returned unexpected result: {val}"
            )));
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), DbError> {
        let Some(Connection { client, driver }) = self.inner.lock().await.take() else {
            return Ok(());
        };

        // Dropping the last client handle lets the driver task finish.
        drop(client);
        if let Err(err) = driver.await {
            warn!(%err, "Postgres connection task did not shut down cleanly");
        }
        info!("Postgres connection closed");
        Ok(())
    }
}
