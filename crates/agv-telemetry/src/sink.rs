//! The `DataSink` trait and the in-process sinks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::{Reading, SinkResult};

/// Destination for readings.
///
/// Implementations must be `Send + Sync`: one sink is shared by every
/// vehicle task behind an `Arc<dyn DataSink>`.  A sink never creates,
/// renames, or deletes sensors; it only stores what it is given.
#[async_trait]
pub trait DataSink: Send + Sync {
    /// Short backend identifier for logs (e.g. "csv", "memory").
    fn kind(&self) -> &'static str;

    /// Store one reading.
    async fn write(&self, reading: &Reading) -> SinkResult<()>;

    /// Push any buffered readings to their destination.  Called once at
    /// shutdown; safe to call more than once.
    async fn flush(&self) -> SinkResult<()> {
        Ok(())
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run blocking I/O against a shared backend on tokio's blocking pool.
///
/// The calling task only awaits the join handle, so a per-attempt timeout
/// around the write can fire while the I/O is stuck.  A write abandoned by
/// its timeout keeps the lock until it finishes; later writes queue behind
/// it and time out on their own.
pub(crate) async fn blocking<T, R, F>(shared: &Arc<Mutex<T>>, f: F) -> SinkResult<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnOnce(&mut T) -> SinkResult<R> + Send + 'static,
{
    let shared = Arc::clone(shared);
    tokio::task::spawn_blocking(move || {
        let mut guard = lock(&*shared);
        f(&mut *guard)
    })
    .await?
}

// ── NullSink ──────────────────────────────────────────────────────────────────

/// Accepts and discards every reading.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

#[async_trait]
impl DataSink for NullSink {
    fn kind(&self) -> &'static str {
        "null"
    }

    async fn write(&self, _reading: &Reading) -> SinkResult<()> {
        Ok(())
    }
}

// ── MemorySink ────────────────────────────────────────────────────────────────

/// Collects readings in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    readings: Mutex<Vec<Reading>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything written so far.
    pub fn readings(&self) -> Vec<Reading> {
        lock(&self.readings).clone()
    }

    /// Drain everything written so far.
    pub fn take(&self) -> Vec<Reading> {
        std::mem::take(&mut *lock(&self.readings))
    }

    pub fn len(&self) -> usize {
        lock(&self.readings).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DataSink for MemorySink {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn write(&self, reading: &Reading) -> SinkResult<()> {
        lock(&self.readings).push(reading.clone());
        Ok(())
    }
}
