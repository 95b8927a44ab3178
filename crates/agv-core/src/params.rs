//! Simulation-step parameters, presets, and policies.
//!
//! `StepParams` is resolved once at startup (preset + overrides), validated,
//! and then shared read-only by every vehicle task.

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// What happens to a vehicle in `Error` once its battery runs low.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// `Error` is permanent for the rest of the run.
    Sticky,
    /// A low-battery `Error` vehicle is sent to charge; a completed charge
    /// returns it to `Idle`.
    #[default]
    RecoverViaCharging,
}

/// Precedence between the low-battery rule and pallet-forced movement.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PalletPriority {
    /// A charging vehicle keeps charging even with a pallet loaded.
    #[default]
    ChargingFirst,
    /// A loaded pallet pulls the vehicle off the charger toward the drop-off.
    PalletFirst,
}

/// Named parameter presets.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    /// Charge below 20 %, frequent missions, occasional faults.
    #[default]
    Baseline,
    /// Charge below 90 %, fewer missions, no injected faults, long pallet runs.
    Conservative,
}

impl Profile {
    pub fn params(self) -> StepParams {
        match self {
            Profile::Baseline     => StepParams::baseline(),
            Profile::Conservative => StepParams::conservative(),
        }
    }
}

/// Tunables for one simulation step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepParams {
    /// Battery percentage below which the vehicle is sent to charge.
    pub charging_threshold: f64,
    /// Nominal battery drain per active tick, percentage points.
    pub drain_per_step: f64,
    /// Upper bound (exclusive) of the per-vehicle drain offset.
    pub drain_jitter_max: f64,
    /// Battery gained per charging tick, percentage points.
    pub charge_rate: f64,
    /// Probability that an idle vehicle starts a mission on a given tick.
    pub p_move: f64,
    /// Probability that a moving vehicle faults on a given tick.
    pub p_fault: f64,
    /// Probability that an idle, empty vehicle picks up a pallet.
    pub p_pallet: f64,
    /// Ticks a pallet stays loaded once picked up.
    pub pallet_hold_ticks: u32,
    /// Distance covered per moving tick.
    pub step_length: f64,
    pub error_policy: ErrorPolicy,
    pub pallet_priority: PalletPriority,
}

impl StepParams {
    pub fn baseline() -> Self {
        Self {
            charging_threshold: 20.0,
            drain_per_step:     0.5,
            drain_jitter_max:   0.25,
            charge_rate:        1.5,
            p_move:             0.3,
            p_fault:            0.02,
            p_pallet:           0.2,
            pallet_hold_ticks:  5,
            step_length:        1.0,
            error_policy:       ErrorPolicy::RecoverViaCharging,
            pallet_priority:    PalletPriority::ChargingFirst,
        }
    }

    pub fn conservative() -> Self {
        Self {
            charging_threshold: 90.0,
            drain_per_step:     0.5,
            drain_jitter_max:   0.5,
            charge_rate:        1.5,
            p_move:             0.2,
            p_fault:            0.0,
            p_pallet:           0.1,
            pallet_hold_ticks:  10,
            step_length:        1.0,
            error_policy:       ErrorPolicy::Sticky,
            pallet_priority:    PalletPriority::ChargingFirst,
        }
    }

    /// Reject parameter sets that would break the battery or movement
    /// invariants.
    pub fn validate(&self) -> CoreResult<()> {
        check_range("charging_threshold", self.charging_threshold, 0.0, 100.0)?;
        check_range("p_move", self.p_move, 0.0, 1.0)?;
        check_range("p_fault", self.p_fault, 0.0, 1.0)?;
        check_range("p_pallet", self.p_pallet, 0.0, 1.0)?;
        check_non_negative("drain_per_step", self.drain_per_step)?;
        check_non_negative("drain_jitter_max", self.drain_jitter_max)?;
        if !(self.charge_rate.is_finite() && self.charge_rate > 0.0) {
            return Err(CoreError::Config(format!(
                "charge_rate must be positive, got {}; a charging vehicle would never finish",
                self.charge_rate
            )));
        }

        if self.drain_jitter_max > self.drain_per_step {
            return Err(CoreError::Config(format!(
                "drain_jitter_max ({}) exceeds drain_per_step ({}); battery would rise while active",
                self.drain_jitter_max, self.drain_per_step
            )));
        }
        if !(self.step_length.is_finite() && self.step_length > 0.0) {
            return Err(CoreError::Config(format!(
                "step_length must be positive, got {}",
                self.step_length
            )));
        }
        Ok(())
    }
}

impl Default for StepParams {
    fn default() -> Self {
        Self::baseline()
    }
}

fn check_range(name: &str, value: f64, lo: f64, hi: f64) -> CoreResult<()> {
    if value.is_finite() && (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{name} must be within [{lo}, {hi}], got {value}")))
    }
}

fn check_non_negative(name: &str, value: f64) -> CoreResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CoreError::Config(format!("{name} must be non-negative, got {value}")))
    }
}

/// Per-field overrides applied on top of a [`Profile`] preset.
///
/// Every field is optional; absent fields keep the preset's value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepOverrides {
    pub charging_threshold: Option<f64>,
    pub drain_per_step:     Option<f64>,
    pub drain_jitter_max:   Option<f64>,
    pub charge_rate:        Option<f64>,
    pub p_move:             Option<f64>,
    pub p_fault:            Option<f64>,
    pub p_pallet:           Option<f64>,
    pub pallet_hold_ticks:  Option<u32>,
    pub step_length:        Option<f64>,
    pub error_policy:       Option<ErrorPolicy>,
    pub pallet_priority:    Option<PalletPriority>,
}

impl StepOverrides {
    /// Overlay the set fields onto `params`.
    pub fn apply(&self, mut params: StepParams) -> StepParams {
        macro_rules! overlay {
            ($src:expr, $dst:expr; $($field:ident),* $(,)?) => {
                $(if let Some(v) = $src.$field { $dst.$field = v; })*
            };
        }
        overlay!(
            self, params;
            charging_threshold,
            drain_per_step,
            drain_jitter_max,
            charge_rate,
            p_move,
            p_fault,
            p_pallet,
            pallet_hold_ticks,
            step_length,
            error_policy,
            pallet_priority,
        );
        params
    }
}
