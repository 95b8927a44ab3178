//! Builds the initial fleet: one `VehicleState` and one `VehicleRng` per
//! vehicle.
//!
//! # Usage
//!
//! ```rust
//! use agv_core::FleetConfig;
//! use agv_vehicle::FleetStateBuilder;
//!
//! let config = FleetConfig::default();
//! let (states, rngs) = FleetStateBuilder::new(&config, /*seed=*/ 42).build().unwrap();
//!
//! assert_eq!(states.len(), config.vehicles);
//! assert_eq!(rngs.len(),   config.vehicles);
//! assert_eq!(states[0].name, "AGV-01");
//! ```

use agv_core::{CoreError, FleetConfig, VehicleId, VehicleRng};

use crate::{LocationTable, SensorHandles, VehicleError, VehicleResult, VehicleState};

/// Fluent builder for the initial `(Vec<VehicleState>, Vec<VehicleRng>)`.
///
/// Each vehicle's RNG is seeded from the run seed and its ID, and the same
/// RNG draws that vehicle's drain offset and starting temperature, so the
/// whole initial fleet is reproducible from `seed`.
pub struct FleetStateBuilder<'a> {
    config:  &'a FleetConfig,
    seed:    u64,
    sensors: Option<Vec<SensorHandles>>,
}

impl<'a> FleetStateBuilder<'a> {
    pub fn new(config: &'a FleetConfig, seed: u64) -> Self {
        Self { config, seed, sensors: None }
    }

    /// Use pre-provisioned sensor handles instead of the derived
    /// `"{vehicle}.{channel}"` names.  One entry per vehicle, in ID order.
    pub fn sensor_handles(mut self, handles: Vec<SensorHandles>) -> Self {
        self.sensors = Some(handles);
        self
    }

    pub fn build(self) -> VehicleResult<(Vec<VehicleState>, Vec<VehicleRng>)> {
        let config = self.config;
        let count = config.vehicles;

        if let Some(handles) = &self.sensors {
            if handles.len() != count {
                return Err(VehicleError::SensorCountMismatch { expected: count, got: handles.len() });
            }
        }

        let start = LocationTable::from_config(config)?.start().point;
        let jitter_max = config.step_params().drain_jitter_max;

        let mut provided = self.sensors.map(Vec::into_iter);
        let mut states = Vec::with_capacity(count);
        let mut rngs = Vec::with_capacity(count);

        for i in 0..count {
            let id = VehicleId::try_from(i)
                .map_err(|_| CoreError::Config(format!("fleet size {count} is too large")))?;
            let name = format!("{}-{:02}", config.name_prefix, i + 1);
            let sensors = match provided.as_mut().and_then(Iterator::next) {
                Some(handles) => handles,
                None => SensorHandles::derived(&name, &config.channels),
            };

            let mut rng = VehicleRng::new(self.seed, id);
            let mut state = VehicleState::new(id, name, start, config.initial_battery, sensors);
            state.drain_jitter = if jitter_max > 0.0 { rng.gen_range(0.0..jitter_max) } else { 0.0 };
            state.temperature = 20.0 + rng.random::<f64>() * 10.0;

            states.push(state);
            rngs.push(rng);
        }

        Ok((states, rngs))
    }
}
