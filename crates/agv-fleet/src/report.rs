//! What a run produced.

use agv_core::VehicleId;
use agv_vehicle::VehicleState;

/// One vehicle's totals.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleReport {
    pub id:               VehicleId,
    pub name:             String,
    pub ticks:            u64,
    pub readings_written: usize,
    pub readings_failed:  usize,
    pub retries:          usize,
    pub final_state:      VehicleState,
}

/// The whole fleet's totals, vehicles in ID order.
#[derive(Clone, Debug, PartialEq)]
pub struct FleetReport {
    /// The seed the run used, so it can be reproduced.
    pub seed:     u64,
    pub vehicles: Vec<VehicleReport>,
    /// Vehicles whose loop did not finish within the drain timeout.
    pub aborted:  Vec<VehicleId>,
    /// `true` if the run ended because of a stop request.
    pub stopped:  bool,
    /// `false` if the final sink flush failed.
    pub flushed:  bool,
}

impl FleetReport {
    pub fn total_ticks(&self) -> u64 {
        self.vehicles.iter().map(|v| v.ticks).sum()
    }

    pub fn readings_written(&self) -> usize {
        self.vehicles.iter().map(|v| v.readings_written).sum()
    }

    pub fn readings_failed(&self) -> usize {
        self.vehicles.iter().map(|v| v.readings_failed).sum()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&VehicleReport> {
        self.vehicles.iter().find(|v| v.id == id)
    }
}
