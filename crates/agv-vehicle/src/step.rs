//! The per-tick state machine.
//!
//! Rules are evaluated in a fixed priority order every tick:
//!
//! 1. low battery forces `Charging`
//! 2. a loaded pallet forces `Moving` toward the drop-off and counts down
//!    (never off the charger at 0%)
//! 3. an `Idle` vehicle may start a mission
//! 4. a `Moving` vehicle may fault
//! 5. a `Moving` vehicle advances one step
//! 6. battery drains, or charges
//! 7. an `Idle`, empty vehicle may pick up a pallet
//! 8. temperature random walk
//!
//! The step is a pure function of the state, the parameters, the location
//! table, and the vehicle's own RNG.  It never fails.

use agv_core::{ErrorPolicy, PalletPriority, Point, StepParams, VehicleRng};

use crate::{
    LocationTable, MAX_BATTERY, MAX_TEMPERATURE, MIN_BATTERY, MIN_TEMPERATURE, MissionState,
    VehicleState,
};

/// What happened during one [`VehicleState::step`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub before:          MissionState,
    pub after:           MissionState,
    /// The vehicle reached its target this tick.
    pub arrived:         bool,
    /// A pallet was picked up this tick.
    pub pallet_loaded:   bool,
    /// The pallet countdown ran out this tick.
    pub pallet_released: bool,
}

impl StepOutcome {
    #[inline]
    pub fn transitioned(&self) -> bool {
        self.before != self.after
    }
}

impl VehicleState {
    /// Advance this vehicle by one tick.
    pub fn step(
        &mut self,
        params:    &StepParams,
        locations: &LocationTable,
        rng:       &mut VehicleRng,
    ) -> StepOutcome {
        let before = self.mission;
        let mut arrived = false;
        let mut pallet_loaded = false;
        let mut pallet_released = false;

        // ── 1. Low battery ────────────────────────────────────────────────
        if self.battery < params.charging_threshold && self.mission != MissionState::Charging {
            let may_charge = self.mission != MissionState::Error
                || params.error_policy == ErrorPolicy::RecoverViaCharging;
            if may_charge {
                self.mission = MissionState::Charging;
                self.target = None;
            }
        }

        // ── 2. Pallet-forced movement ─────────────────────────────────────
        if self.carrying_pallet() {
            let may_drive = match self.mission {
                MissionState::Error    => false,
                // A flat battery stays on the charger whatever the priority.
                MissionState::Charging => {
                    params.pallet_priority == PalletPriority::PalletFirst && self.battery > MIN_BATTERY
                }
                _                      => true,
            };
            if may_drive {
                self.mission = MissionState::Moving;
                self.target = Some(locations.dropoff().point);
            }

            self.pallet_ticks_remaining -= 1;
            if self.pallet_ticks_remaining == 0 {
                pallet_released = true;
                // Only a carrying vehicle that was allowed to drive can be
                // `Moving` here, so this is always the pallet run ending.
                if self.mission == MissionState::Moving {
                    self.mission = MissionState::Idle;
                    self.target = None;
                }
            }
        }

        // ── 3. Spontaneous mission ────────────────────────────────────────
        if self.mission == MissionState::Idle && rng.gen_bool(params.p_move) {
            let candidates: Vec<Point> = locations.others(self.position).map(|l| l.point).collect();
            if let Some(&target) = rng.choose(&candidates) {
                self.mission = MissionState::Moving;
                self.target = Some(target);
            }
        }

        // ── 4. Fault injection ────────────────────────────────────────────
        if self.mission == MissionState::Moving && rng.gen_bool(params.p_fault) {
            self.mission = MissionState::Error;
            self.target = None;
        }

        // ── 5. Movement ───────────────────────────────────────────────────
        if self.mission == MissionState::Moving {
            match self.target {
                Some(target) => {
                    let next = self.position.step_toward(target, params.step_length);
                    self.position = locations.bounds().clamp(next);
                    if self.position == target {
                        arrived = true;
                        if !self.carrying_pallet() {
                            self.mission = MissionState::Idle;
                            self.target = None;
                        }
                    }
                }
                None => self.mission = MissionState::Idle,
            }
        }

        // ── 6. Battery ────────────────────────────────────────────────────
        if self.mission == MissionState::Charging {
            self.battery = (self.battery + params.charge_rate).min(MAX_BATTERY);
            if self.battery >= MAX_BATTERY {
                self.mission = MissionState::Idle;
            }
        } else if self.battery > MIN_BATTERY {
            let drain = (params.drain_per_step - self.drain_jitter).max(0.0);
            self.battery = (self.battery - drain).max(MIN_BATTERY);
            if self.battery <= MIN_BATTERY {
                self.mission = MissionState::Error;
                self.target = None;
            }
        }

        // ── 7. Pallet acquisition ─────────────────────────────────────────
        if self.mission == MissionState::Idle
            && !self.carrying_pallet()
            && params.pallet_hold_ticks > 0
            && rng.gen_bool(params.p_pallet)
        {
            self.load_pallet(params.pallet_hold_ticks);
            pallet_loaded = true;
        }

        // ── 8. Temperature ────────────────────────────────────────────────
        let delta: f64 = rng.gen_range(-1.0..=1.0);
        self.temperature = (self.temperature + delta).clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);

        self.position = locations.bounds().clamp(self.position);

        StepOutcome { before, after: self.mission, arrived, pallet_loaded, pallet_released }
    }
}
