//! CSV sink.
//!
//! One file, one row per reading: `sensor,vehicle,channel,time,value`.

use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use csv::Writer;

use crate::sink::{DataSink, blocking};
use crate::{Reading, SinkResult};

pub const CSV_HEADER: [&str; 5] = ["sensor", "vehicle", "channel", "time", "value"];

/// Appends readings to a CSV file from the blocking pool.
pub struct CsvSink {
    writer: Arc<Mutex<Writer<File>>>,
}

impl CsvSink {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> SinkResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(CSV_HEADER)?;
        Ok(Self { writer: Arc::new(Mutex::new(writer)) })
    }
}

#[async_trait]
impl DataSink for CsvSink {
    fn kind(&self) -> &'static str {
        "csv"
    }

    async fn write(&self, reading: &Reading) -> SinkResult<()> {
        let record = [
            reading.sensor.as_str().to_owned(),
            reading.vehicle.clone(),
            reading.channel.as_str().to_owned(),
            reading.time_rfc3339(),
            reading.value.to_string(),
        ];
        blocking(&self.writer, move |w| Ok(w.write_record(&record)?)).await
    }

    async fn flush(&self) -> SinkResult<()> {
        blocking(&self.writer, |w| Ok(w.flush()?)).await
    }
}
