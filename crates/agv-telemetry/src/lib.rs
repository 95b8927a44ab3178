//! `agv-telemetry` — turning vehicle state into stored readings.
//!
//! Every backend implements [`DataSink`]; the [`ReadingEmitter`] derives one
//! [`Reading`] per bound channel after each step and delivers it under a
//! [`RetryPolicy`].
//!
//! | Sink            | Feature   | Destination                                   |
//! |-----------------|-----------|-----------------------------------------------|
//! | `NullSink`      | *(none)*  | nowhere                                       |
//! | `MemorySink`    | *(none)*  | in-process `Vec<Reading>`                     |
//! | `CsvSink`       | *(none)*  | `sensor,vehicle,channel,time,value` CSV file  |
//! | `JsonLinesSink` | *(none)*  | newline-delimited JSON on any `Write`         |
//! | `SqliteSink`    | `sqlite`  | `readings` table in an SQLite database        |
//!
//! # Usage
//!
//! ```rust,ignore
//! use agv_telemetry::{MemorySink, ReadingEmitter, RetryPolicy};
//!
//! let sink = Arc::new(MemorySink::new());
//! let emitter = ReadingEmitter::new(sink.clone(), RetryPolicy::from_config(&config.delivery));
//! let outcome = emitter.emit(&state).await;
//! assert_eq!(outcome.written, state.sensors().len());
//! ```

pub mod csv;
pub mod emitter;
pub mod error;
pub mod jsonl;
pub mod reading;
pub mod retry;
pub mod sink;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use self::csv::CsvSink;
pub use emitter::{EmitOutcome, ReadingEmitter};
pub use error::{SinkError, SinkResult};
pub use jsonl::JsonLinesSink;
pub use reading::Reading;
pub use retry::RetryPolicy;
pub use sink::{DataSink, MemorySink, NullSink};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteSink;
