//! JSON-lines sink: one object per line on any writer.
//!
//! With stdout as the writer this feeds a stream processor that reads
//! newline-delimited JSON from stdin.

use std::io::{self, Stdout, Write};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::sink::{DataSink, blocking};
use crate::{Reading, SinkResult};

/// Writes `{"sensor":..,"vehicle":..,"channel":..,"time":..,"value":..}`
/// lines.  The writer is driven from the blocking pool.
pub struct JsonLinesSink<W: Write + Send + 'static> {
    out: Arc<Mutex<W>>,
}

impl<W: Write + Send + 'static> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out: Arc::new(Mutex::new(out)) }
    }

    /// Recover the underlying writer, or `None` while an abandoned write
    /// still holds it.
    pub fn into_inner(self) -> Option<W> {
        Arc::try_unwrap(self.out)
            .ok()
            .map(|m| m.into_inner().unwrap_or_else(PoisonError::into_inner))
    }
}

impl JsonLinesSink<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

#[async_trait]
impl<W: Write + Send + 'static> DataSink for JsonLinesSink<W> {
    fn kind(&self) -> &'static str {
        "jsonl"
    }

    async fn write(&self, reading: &Reading) -> SinkResult<()> {
        let mut line = serde_json::to_vec(&reading.row())?;
        line.push(b'\n');
        blocking(&self.out, move |out| Ok(out.write_all(&line)?)).await
    }

    async fn flush(&self) -> SinkResult<()> {
        blocking(&self.out, |out| Ok(out.flush()?)).await
    }
}
