//! Mission state enum shared by the step and the emitter.

use serde::{Deserialize, Serialize};

/// The vehicle's current operating mode.
///
/// `Error` is an operational state (flat battery or injected fault), not a
/// program failure.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionState {
    #[default]
    Idle,
    Moving,
    Charging,
    Error,
}

impl MissionState {
    /// The integer the sink stores for this state.  The only place the
    /// mapping lives.
    pub const fn code(self) -> u8 {
        match self {
            MissionState::Idle     => 1,
            MissionState::Moving   => 2,
            MissionState::Charging => 3,
            MissionState::Error    => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MissionState::Idle     => "idle",
            MissionState::Moving   => "moving",
            MissionState::Charging => "charging",
            MissionState::Error    => "error",
        }
    }
}

impl std::fmt::Display for MissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
