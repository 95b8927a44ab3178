//! `agv-core` — foundational types for the AGV fleet simulator.
//!
//! This crate is a dependency of every other `agv-*` crate.  It has no
//! `agv-*` dependencies and a small external footprint (`rand`, `thiserror`,
//! `serde`, `serde_json`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `LocationId`                                 |
//! | [`geo`]         | `Point`, `Bounds` (planar floor coordinates)              |
//! | [`time`]        | `Tick`                                                    |
//! | [`rng`]         | `VehicleRng` (per-vehicle, deterministic)                 |
//! | [`channel`]     | `Channel` — the telemetry channels a vehicle reports on   |
//! | [`params`]      | `StepParams`, `Profile`, `ErrorPolicy`, `PalletPriority`  |
//! | [`config`]      | `FleetConfig` + validation + JSON loading                 |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |

pub mod channel;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use channel::Channel;
pub use config::{DeliveryConfig, FleetConfig, LocationConfig};
pub use error::{CoreError, CoreResult};
pub use geo::{Bounds, Point};
pub use ids::{LocationId, VehicleId};
pub use params::{ErrorPolicy, PalletPriority, Profile, StepOverrides, StepParams};
pub use rng::VehicleRng;
pub use time::Tick;
