//! The fleet driver: one tokio task per vehicle.
//!
//! ```text
//! per vehicle, until stopped or max_ticks reached:
//!   ① wait for the vehicle's next tick (or the stop signal)
//!   ② step the vehicle state
//!   ③ emit one reading per bound channel to the shared sink
//! ```
//!
//! Vehicle state and RNG are moved into their task.  The step parameters,
//! location table, emitter, and observer are shared read-only.  After a stop
//! request the driver waits up to the drain timeout for in-flight ticks,
//! then aborts whatever is left and flushes the sink.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use agv_core::{StepParams, VehicleId, VehicleRng};
use agv_telemetry::{EmitOutcome, ReadingEmitter};
use agv_vehicle::{LocationTable, VehicleState};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use crate::{FleetObserver, FleetReport, StopSignal, VehicleClock, VehicleReport};

/// A built, ready-to-run fleet.  Construct with [`crate::FleetBuilder`].
pub struct FleetDriver {
    pub(crate) seed:          u64,
    pub(crate) states:        Vec<VehicleState>,
    pub(crate) rngs:          Vec<VehicleRng>,
    pub(crate) params:        Arc<StepParams>,
    pub(crate) locations:     Arc<LocationTable>,
    pub(crate) emitter:       ReadingEmitter,
    pub(crate) observer:      Arc<dyn FleetObserver>,
    pub(crate) tick_period:   Duration,
    pub(crate) max_ticks:     Option<u64>,
    pub(crate) drain_timeout: Duration,
}

/// Everything a vehicle task needs besides its own state.
#[derive(Clone)]
struct LoopContext {
    params:      Arc<StepParams>,
    locations:   Arc<LocationTable>,
    emitter:     ReadingEmitter,
    observer:    Arc<dyn FleetObserver>,
    tick_period: Duration,
    max_ticks:   Option<u64>,
    stop:        StopSignal,
}

impl FleetDriver {
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Initial vehicle states.
    #[inline]
    pub fn states(&self) -> &[VehicleState] {
        &self.states
    }

    #[inline]
    pub fn params(&self) -> &StepParams {
        &self.params
    }

    #[inline]
    pub fn locations(&self) -> &LocationTable {
        &self.locations
    }

    /// Run every vehicle until `stop` fires or each has done `max_ticks`.
    pub async fn run(self, stop: StopSignal) -> FleetReport {
        let ctx = LoopContext {
            params:      self.params,
            locations:   self.locations,
            emitter:     self.emitter,
            observer:    self.observer,
            tick_period: self.tick_period,
            max_ticks:   self.max_ticks,
            stop:        stop.clone(),
        };
        let sink = ctx.emitter.sink().clone();
        let ids: BTreeSet<VehicleId> = self.states.iter().map(|s| s.id).collect();

        info!(
            vehicles       = self.states.len(),
            seed           = self.seed,
            tick_period_ms = self.tick_period.as_millis() as u64,
            max_ticks      = ?self.max_ticks,
            sink           = sink.kind(),
            "fleet starting"
        );

        let mut tasks = JoinSet::new();
        for (state, rng) in self.states.into_iter().zip(self.rngs) {
            tasks.spawn(vehicle_loop(state, rng, ctx.clone()));
        }
        drop(ctx);

        let mut reports = Vec::with_capacity(ids.len());

        // ── Run until every loop exits or a stop is requested ─────────────
        let stopped = loop {
            tokio::select! {
                biased;
                _ = stop.stopped() => break true,
                joined = tasks.join_next() => match joined {
                    Some(res) => absorb(res, &mut reports),
                    None      => break false,
                },
            }
        };

        // ── Drain, then abort stragglers ──────────────────────────────────
        if stopped {
            info!(running = tasks.len(), drain_timeout_ms = self.drain_timeout.as_millis() as u64, "stop requested, draining");
            let drain = async {
                while let Some(res) = tasks.join_next().await {
                    absorb(res, &mut reports);
                }
            };
            if tokio::time::timeout(self.drain_timeout, drain).await.is_err() {
                warn!(remaining = tasks.len(), "drain timed out, aborting vehicle tasks");
                tasks.abort_all();
                while let Some(res) = tasks.join_next().await {
                    absorb(res, &mut reports);
                }
            }
        }

        reports.sort_by_key(|r| r.id);
        let finished: BTreeSet<VehicleId> = reports.iter().map(|r| r.id).collect();
        let aborted: Vec<VehicleId> = ids.difference(&finished).copied().collect();

        let flushed = match sink.flush().await {
            Ok(()) => true,
            Err(e) => {
                warn!(sink = sink.kind(), error = %e, "final sink flush failed");
                false
            }
        };

        let report = FleetReport { seed: self.seed, vehicles: reports, aborted, stopped, flushed };
        info!(
            ticks    = report.total_ticks(),
            written  = report.readings_written(),
            failed   = report.readings_failed(),
            aborted  = report.aborted.len(),
            stopped,
            "fleet finished"
        );
        report
    }
}

fn absorb(res: Result<VehicleReport, JoinError>, reports: &mut Vec<VehicleReport>) {
    match res {
        Ok(report) => reports.push(report),
        Err(e) if e.is_cancelled() => {}
        Err(e) => error!(error = %e, "vehicle task panicked"),
    }
}

/// One vehicle's tick loop.  Owns the state and RNG for the whole run.
async fn vehicle_loop(mut state: VehicleState, mut rng: VehicleRng, ctx: LoopContext) -> VehicleReport {
    let mut clock = VehicleClock::new(ctx.tick_period);
    let mut totals = EmitOutcome::default();

    loop {
        if ctx.max_ticks.is_some_and(|max| clock.ticks() >= max) {
            break;
        }

        let tick = tokio::select! {
            biased;
            _ = ctx.stop.stopped() => break,
            tick = clock.next() => tick,
        };

        let step = state.step(&ctx.params, &ctx.locations, &mut rng);
        if step.transitioned() {
            debug!(
                vehicle  = %state.name,
                %tick,
                from     = %step.before,
                to       = %step.after,
                battery  = state.battery,
                position = %state.position,
                "mission transition"
            );
        }

        let emitted = ctx.emitter.emit(&state).await;
        totals += emitted;
        ctx.observer.on_tick(&state, tick, &step, &emitted);
    }

    let report = VehicleReport {
        id:               state.id,
        name:             state.name.clone(),
        ticks:            clock.ticks(),
        readings_written: totals.written,
        readings_failed:  totals.failed,
        retries:          totals.retries,
        final_state:      state,
    };
    debug!(vehicle = %report.name, ticks = report.ticks, "vehicle loop finished");
    ctx.observer.on_vehicle_done(&report);
    report
}
