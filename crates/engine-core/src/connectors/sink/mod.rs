use crate::error::SinkError;
use async_trait::async_trait;
use model::records::record::Record;

pub mod json;
pub mod postgres;

/// Destination for transformed records.
///
/// Each `upsert` is durable on return. `close` releases the underlying
/// resource and is safe to call more than once.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn upsert(&self, record: &Record) -> Result<(), SinkError>;

    async fn close(&self) -> Result<(), SinkError>;

    fn name(&self) -> &'static str;
}
