//! SQLite sink (feature `sqlite`).
//!
//! Inserts into a single `readings` table, created if absent.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::Connection;

use crate::sink::{DataSink, blocking};
use crate::{Reading, SinkResult};

/// Inserts run on the blocking pool, one statement per reading.
pub struct SqliteSink {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSink {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> SinkResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS readings (
                 sensor  TEXT NOT NULL,
                 vehicle TEXT NOT NULL,
                 channel TEXT NOT NULL,
                 time    TEXT NOT NULL,
                 value   REAL NOT NULL
             );",
        )?;

        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }
}

#[async_trait]
impl DataSink for SqliteSink {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    async fn write(&self, reading: &Reading) -> SinkResult<()> {
        let sensor = reading.sensor.clone();
        let vehicle = reading.vehicle.clone();
        let channel = reading.channel.as_str();
        let time = reading.time_rfc3339();
        let value = reading.value;

        blocking(&self.conn, move |conn| {
            let mut stmt = conn.prepare_cached(
                "INSERT INTO readings (sensor, vehicle, channel, time, value) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            stmt.execute(rusqlite::params![sensor.as_str(), vehicle, channel, time, value])?;
            Ok(())
        })
        .await
    }

    async fn flush(&self) -> SinkResult<()> {
        blocking(&self.conn, |conn| Ok(conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?)).await
    }
}
