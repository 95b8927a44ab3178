//! Cooperative stop signal shared by the driver and every vehicle task.

use tokio_util::sync::CancellationToken;

/// Cloneable stop flag.  Stopping is one-way.
#[derive(Clone, Debug, Default)]
pub struct StopSignal(CancellationToken);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every loop to finish its current tick and exit.
    pub fn stop(&self) {
        self.0.cancel();
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.0.is_cancelled()
    }

    /// Resolves once [`stop`](Self::stop) has been called.
    pub async fn stopped(&self) {
        self.0.cancelled().await
    }
}
