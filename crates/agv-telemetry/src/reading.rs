//! The unit of telemetry handed to a sink.

use agv_core::Channel;
use agv_vehicle::SensorId;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// One timestamped value on one sensor.
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    pub sensor:  SensorId,
    pub vehicle: String,
    pub channel: Channel,
    /// Captured when the reading was derived, not when it was written.
    pub time:    DateTime<Utc>,
    pub value:   f64,
}

impl Reading {
    /// RFC 3339 timestamp with millisecond precision, as textual sinks
    /// store it.
    pub fn time_rfc3339(&self) -> String {
        self.time.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Borrowed view used by the JSON encoders.
    pub(crate) fn row(&self) -> ReadingRow<'_> {
        ReadingRow {
            sensor:  self.sensor.as_str(),
            vehicle: &self.vehicle,
            channel: self.channel.as_str(),
            time:    self.time_rfc3339(),
            value:   self.value,
        }
    }
}

/// Flat, serializable shape of a [`Reading`].
#[derive(Serialize)]
pub(crate) struct ReadingRow<'a> {
    pub sensor:  &'a str,
    pub vehicle: &'a str,
    pub channel: &'static str,
    pub time:    String,
    pub value:   f64,
}
