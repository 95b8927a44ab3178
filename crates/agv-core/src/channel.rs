//! Telemetry channels.
//!
//! A channel is one instrumented quantity on a vehicle.  Each bound channel
//! produces exactly one reading per tick.  The declaration order below is the
//! canonical emission order (`Ord` is derived from it).

use serde::{Deserialize, Serialize};

/// One instrumented quantity on a vehicle.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// State of charge, percent.
    Battery,
    /// Drive temperature proxy, °C.
    Temperature,
    /// Floor position, x component.
    PositionX,
    /// Floor position, y component.
    PositionY,
    /// 1 while a pallet is loaded, else 0.
    HasPallet,
    /// Mission state code, 1..=4.
    MissionState,
}

impl Channel {
    /// Every channel, in canonical order.
    pub const ALL: [Channel; 6] = [
        Channel::Battery,
        Channel::Temperature,
        Channel::PositionX,
        Channel::PositionY,
        Channel::HasPallet,
        Channel::MissionState,
    ];

    /// The channels provisioned when the configuration names none.
    pub const DEFAULT_SET: [Channel; 4] = [
        Channel::Battery,
        Channel::Temperature,
        Channel::HasPallet,
        Channel::MissionState,
    ];

    /// Sink-facing channel name (the sensor type's magnitude).
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Battery      => "battery",
            Channel::Temperature  => "temperature",
            Channel::PositionX    => "position_x",
            Channel::PositionY    => "position_y",
            Channel::HasPallet    => "has_pallet",
            Channel::MissionState => "mission_state",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
