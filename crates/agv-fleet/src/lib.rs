//! `agv-fleet` — runs every vehicle's tick loop concurrently.
//!
//! # Per-vehicle loop
//!
//! ```text
//! loop:
//!   ① tick     — VehicleClock (fixed period, late ticks delayed not burst)
//!   ② step     — VehicleState::step with the shared StepParams/LocationTable
//!   ③ emit     — ReadingEmitter::emit to the shared DataSink
//! until StopSignal fires or max_ticks reached
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use agv_fleet::{FleetBuilder, StopSignal};
//!
//! let driver = FleetBuilder::new(config).sink(sink).build()?;
//! let stop = StopSignal::new();
//! let report = driver.run(stop.clone()).await;
//! println!("{} readings", report.readings_written());
//! ```

pub mod builder;
pub mod clock;
pub mod driver;
pub mod error;
pub mod observer;
pub mod report;
pub mod stop;

#[cfg(test)]
mod tests;

pub use builder::FleetBuilder;
pub use clock::VehicleClock;
pub use driver::FleetDriver;
pub use error::{FleetError, FleetResult};
pub use observer::{FleetObserver, NoopObserver};
pub use report::{FleetReport, VehicleReport};
pub use stop::StopSignal;
