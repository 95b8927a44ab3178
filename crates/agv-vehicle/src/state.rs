//! The per-vehicle state record.

use agv_core::{Channel, Point, VehicleId};

use crate::{MissionState, SensorHandles};

pub const MIN_BATTERY: f64 = 0.0;
pub const MAX_BATTERY: f64 = 100.0;

/// Temperature proxy range, °C.
pub const MIN_TEMPERATURE: f64 = 15.0;
pub const MAX_TEMPERATURE: f64 = 35.0;

/// One simulated AGV.
///
/// Owned exclusively by its tick loop and mutated only by
/// [`step`](Self::step).  The pallet flag is not stored: it is derived from
/// the countdown, so `carrying_pallet() == (pallet_ticks_remaining > 0)`
/// holds by construction.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleState {
    pub id:       VehicleId,
    pub name:     String,

    pub position: Point,
    /// State of charge, percent, in `[0, 100]`.
    pub battery:  f64,
    pub mission:  MissionState,
    /// Where the vehicle is heading while `Moving`.
    pub target:   Option<Point>,

    /// Ticks until the loaded pallet is released.  0 = not carrying.
    pub pallet_ticks_remaining: u32,

    /// Drive temperature proxy, °C, in `[15, 35]`.
    pub temperature: f64,

    /// Fixed per-vehicle offset subtracted from the nominal drain.
    pub drain_jitter: f64,

    sensors: SensorHandles,
}

impl VehicleState {
    /// A fresh `Idle` vehicle with no pallet, no target, no drain offset, and
    /// the temperature at the bottom of its usual start range.
    pub fn new(
        id:       VehicleId,
        name:     impl Into<String>,
        position: Point,
        battery:  f64,
        sensors:  SensorHandles,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            battery: battery.clamp(MIN_BATTERY, MAX_BATTERY),
            mission: MissionState::Idle,
            target: None,
            pallet_ticks_remaining: 0,
            temperature: 20.0,
            drain_jitter: 0.0,
            sensors,
        }
    }

    #[inline]
    pub fn carrying_pallet(&self) -> bool {
        self.pallet_ticks_remaining > 0
    }

    /// Load a pallet for `ticks` ticks.  `0` unloads.
    #[inline]
    pub fn load_pallet(&mut self, ticks: u32) {
        self.pallet_ticks_remaining = ticks;
    }

    #[inline]
    pub fn sensors(&self) -> &SensorHandles {
        &self.sensors
    }

    /// The value a reading on `channel` carries for the current state.
    pub fn channel_value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Battery      => self.battery,
            Channel::Temperature  => self.temperature,
            Channel::PositionX    => self.position.x,
            Channel::PositionY    => self.position.y,
            Channel::HasPallet    => if self.carrying_pallet() { 1.0 } else { 0.0 },
            Channel::MissionState => f64::from(self.mission.code()),
        }
    }
}
