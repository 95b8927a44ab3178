//! Run observer hooks.

use agv_core::Tick;
use agv_telemetry::EmitOutcome;
use agv_vehicle::{StepOutcome, VehicleState};

use crate::VehicleReport;

/// Callbacks invoked from the vehicle tasks.
///
/// Shared by every task, so methods take `&self`; implementations that
/// collect data need their own interior mutability.  All methods default to
/// no-ops.
///
/// # Example — tick counter
///
/// ```rust,ignore
/// struct Counter(AtomicU64);
///
/// impl FleetObserver for Counter {
///     fn on_tick(&self, _: &VehicleState, _: Tick, _: &StepOutcome, _: &EmitOutcome) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait FleetObserver: Send + Sync {
    /// Called after a vehicle's step and emission for `tick` complete.
    fn on_tick(
        &self,
        _state:   &VehicleState,
        _tick:    Tick,
        _step:    &StepOutcome,
        _emitted: &EmitOutcome,
    ) {
    }

    /// Called once when a vehicle's loop exits normally.
    fn on_vehicle_done(&self, _report: &VehicleReport) {}
}

/// A [`FleetObserver`] that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl FleetObserver for NoopObserver {}
