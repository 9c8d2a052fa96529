use crate::{connectors::sink::Sink, error::SinkError};
use async_trait::async_trait;
use connectors::sql::{
    base::adapter::SqlAdapter,
    postgres::{adapter::PgAdapter, config::PgConfig},
};
use model::{
    core::value::Value,
    records::{record::Record, schema::KEY_COLUMN},
};
use planner::query::{
    ast::common::TableRef, builder::upsert::UpsertBuilder, dialect, renderer::render,
};
use tracing::debug;

/// Upserts records into one table keyed by [`KEY_COLUMN`], one transaction
/// per record.
pub struct PostgresSink<A: SqlAdapter = PgAdapter> {
    adapter: A,
    upsert: UpsertBuilder,
    dialect: dialect::Postgres,
}

impl PostgresSink<PgAdapter> {
    pub async fn connect(config: &PgConfig, table: &str) -> Result<Self, SinkError> {
        let adapter = PgAdapter::connect(config).await?;
        Ok(Self::new(adapter, table))
    }
}

impl<A: SqlAdapter> PostgresSink<A> {
    pub fn new(adapter: A, table: &str) -> Self {
        Self {
            adapter,
            upsert: UpsertBuilder::new(TableRef::parse(table)).key(KEY_COLUMN),
            dialect: dialect::Postgres,
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// SQL and parameters that `upsert` would execute for `record`.
    pub fn statement(&self, record: &Record) -> Result<(String, Vec<Value>), SinkError> {
        let has_key = record
            .get(KEY_COLUMN)
            .and_then(|v| v.as_str())
            .is_some_and(|key| !key.is_empty());
        if !has_key {
            return Err(SinkError::MissingKey(KEY_COLUMN.to_string()));
        }

        let insert = self.upsert.build(record);
        Ok(render(&insert, &self.dialect))
    }
}

#[async_trait]
impl<A: SqlAdapter> Sink for PostgresSink<A> {
    async fn upsert(&self, record: &Record) -> Result<(), SinkError> {
        let (sql, params) = self.statement(record)?;
        let affected = self.adapter.exec_params_tx(&sql, params).await?;
        debug!(affected, "Upserted {}", record.get_value(KEY_COLUMN));
        Ok(())
    }

    async fn close(&self) -> Result<(), SinkError> {
        self.adapter.close().await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
