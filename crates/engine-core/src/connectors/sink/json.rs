use crate::{connectors::sink::Sink, error::SinkError};
use async_trait::async_trait;
use model::records::record::Record;
use std::path::Path;
use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::Mutex,
};

type Writer = Box<dyn AsyncWrite + Send + Unpin>;

/// Writes each record as one JSON object per line. Used for dry runs.
pub struct JsonLinesSink {
    writer: Mutex<Writer>,
}

impl JsonLinesSink {
    pub fn new(writer: Writer) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(tokio::io::stdout()))
    }

    pub async fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let file = tokio::fs::File::create(path).await?;
        Ok(Self::new(Box::new(file)))
    }
}

#[async_trait]
impl Sink for JsonLinesSink {
    async fn upsert(&self, record: &Record) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut writer = self.writer.lock().await;
        writer.write_all(&line).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), SinkError> {
        self.writer.lock().await.flush().await?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
