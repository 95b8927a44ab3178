//! Post-step state → readings → sink.

use std::sync::Arc;

use agv_vehicle::VehicleState;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::{DataSink, Reading, RetryPolicy};

/// Counts for one tick's emission.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitOutcome {
    /// Readings the sink accepted.
    pub written: usize,
    /// Readings dropped after every attempt failed.
    pub failed:  usize,
    /// Extra attempts spent on retries, successful or not.
    pub retries: usize,
}

impl EmitOutcome {
    #[inline]
    pub fn attempted(&self) -> usize {
        self.written + self.failed
    }
}

impl std::ops::AddAssign for EmitOutcome {
    fn add_assign(&mut self, rhs: Self) {
        self.written += rhs.written;
        self.failed  += rhs.failed;
        self.retries += rhs.retries;
    }
}

/// Derives readings from a vehicle and hands them to the shared sink.
///
/// Cheap to clone; every vehicle task holds its own copy.
#[derive(Clone)]
pub struct ReadingEmitter {
    sink:  Arc<dyn DataSink>,
    retry: RetryPolicy,
}

impl ReadingEmitter {
    pub fn new(sink: Arc<dyn DataSink>, retry: RetryPolicy) -> Self {
        Self { sink, retry }
    }

    #[inline]
    pub fn sink(&self) -> &Arc<dyn DataSink> {
        &self.sink
    }

    /// One reading per bound channel, in canonical channel order, all
    /// stamped with `time`.  Never touches the state.
    pub fn readings_at(state: &VehicleState, time: DateTime<Utc>) -> Vec<Reading> {
        state
            .sensors()
            .iter()
            .map(|(channel, sensor)| Reading {
                sensor:  sensor.clone(),
                vehicle: state.name.clone(),
                channel,
                time,
                value:   state.channel_value(channel),
            })
            .collect()
    }

    /// [`readings_at`](Self::readings_at) stamped with the current time.
    pub fn readings(state: &VehicleState) -> Vec<Reading> {
        Self::readings_at(state, Utc::now())
    }

    /// Write every reading for `state`, one sink write per reading.
    ///
    /// All readings are attempted before this returns.  Failures are logged
    /// and counted, never propagated.
    pub async fn emit(&self, state: &VehicleState) -> EmitOutcome {
        let mut outcome = EmitOutcome::default();
        for reading in Self::readings(state) {
            match self.retry.deliver(self.sink.as_ref(), &reading).await {
                Ok(attempts) => {
                    outcome.written += 1;
                    outcome.retries += (attempts - 1) as usize;
                }
                Err(e) => {
                    outcome.failed  += 1;
                    outcome.retries += (self.retry.max_attempts - 1) as usize;
                    warn!(
                        vehicle = %state.name,
                        sensor  = %reading.sensor,
                        channel = %reading.channel,
                        attempts = self.retry.max_attempts,
                        error   = %e,
                        "dropping reading"
                    );
                }
            }
        }
        outcome
    }
}

impl std::fmt::Debug for ReadingEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadingEmitter")
            .field("sink", &self.sink.kind())
            .field("retry", &self.retry)
            .finish()
    }
}
