//! `agv-vehicle` — one AGV's state and how it evolves tick over tick.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`mission`]   | `MissionState` and its canonical sink code                      |
//! | [`sensors`]   | `SensorId`, `SensorHandles` — channel → sink sensor bindings    |
//! | [`locations`] | `LocationTable` — immutable reference locations + floor bounds  |
//! | [`state`]     | `VehicleState`                                                  |
//! | [`step`]      | `VehicleState::step` — the per-tick state machine               |
//! | [`builder`]   | `FleetStateBuilder` — initial states + per-vehicle RNGs         |
//! | [`error`]     | `VehicleError`, `VehicleResult<T>`                              |
//!
//! # Ownership
//!
//! A `VehicleState` and its `VehicleRng` are moved into that vehicle's task
//! and never shared.  The `LocationTable` and `StepParams` are built once and
//! shared read-only (behind an `Arc`) by every task, so stepping needs no
//! locks.

pub mod builder;
pub mod error;
pub mod locations;
pub mod mission;
pub mod sensors;
pub mod state;
pub mod step;


pub use builder::FleetStateBuilder;
pub use error::{VehicleError, VehicleResult};
pub use locations::{Location, LocationTable};
pub use mission::MissionState;
pub use sensors::{SensorHandles, SensorId};
pub use state::{MAX_BATTERY, MAX_TEMPERATURE, MIN_BATTERY, MIN_TEMPERATURE, VehicleState};
pub use step::StepOutcome;
