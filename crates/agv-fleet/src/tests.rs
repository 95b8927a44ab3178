//! Unit tests for agv-fleet.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use agv_core::{Channel, FleetConfig, VehicleId};
use agv_telemetry::{DataSink, MemorySink, Reading, SinkError, SinkResult};
use async_trait::async_trait;

use crate::{FleetBuilder, FleetReport, StopSignal};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(vehicles: usize, max_ticks: Option<u64>) -> FleetConfig {
    FleetConfig {
        vehicles,
        max_ticks,
        seed: Some(42),
        tick_period_ms: 1_000,
        ..Default::default()
    }
}

/// Config whose sink gets exactly one attempt per reading.
fn single_attempt(mut cfg: FleetConfig, attempt_timeout_ms: u64) -> FleetConfig {
    cfg.delivery.max_attempts = 1;
    cfg.delivery.attempt_timeout_ms = attempt_timeout_ms;
    cfg
}

async fn run(cfg: FleetConfig, sink: Arc<dyn DataSink>, stop: StopSignal) -> FleetReport {
    FleetBuilder::new(cfg).sink(sink).build().unwrap().run(stop).await
}

struct RejectingSink {
    calls: AtomicUsize,
}

#[async_trait]
impl DataSink for RejectingSink {
    fn kind(&self) -> &'static str {
        "rejecting"
    }

    async fn write(&self, _reading: &Reading) -> SinkResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SinkError::Rejected("backend unavailable".into()))
    }
}

struct HangingSink;

#[async_trait]
impl DataSink for HangingSink {
    fn kind(&self) -> &'static str {
        "hanging"
    }

    async fn write(&self, _reading: &Reading) -> SinkResult<()> {
        tokio::time::sleep(Duration::from_secs(24 * 3600)).await;
        Ok(())
    }
}

struct UnflushableSink;

#[async_trait]
impl DataSink for UnflushableSink {
    fn kind(&self) -> &'static str {
        "unflushable"
    }

    async fn write(&self, _reading: &Reading) -> SinkResult<()> {
        Ok(())
    }

    async fn flush(&self) -> SinkResult<()> {
        Err(SinkError::Rejected("flush refused".into()))
    }
}

// ── VehicleClock ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod clock {
    use super::*;
    use crate::VehicleClock;

    #[tokio::test(start_paused = true)]
    async fn first_tick_immediate_then_periodic() {
        let start = tokio::time::Instant::now();
        let mut clock = VehicleClock::new(Duration::from_millis(250));

        assert_eq!(clock.next().await, agv_core::Tick(1));
        assert_eq!(start.elapsed(), Duration::ZERO);

        clock.next().await;
        clock.next().await;
        assert_eq!(clock.ticks(), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(500));
        assert_eq!(clock.period(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn late_tick_delays_instead_of_bursting() {
        let mut clock = VehicleClock::new(Duration::from_millis(100));
        clock.next().await;
        // Overrun the period by a lot.
        tokio::time::sleep(Duration::from_millis(350)).await;
        let late = tokio::time::Instant::now();
        clock.next().await;
        clock.next().await;
        // The tick after the late one is a full period later, not immediate.
        assert_eq!(late.elapsed(), Duration::from_millis(100));
    }
}

// ── StopSignal ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stop {
    use super::*;

    #[tokio::test]
    async fn clones_share_state() {
        let a = StopSignal::new();
        let b = a.clone();
        assert!(!b.is_stopped());
        a.stop();
        assert!(b.is_stopped());
        b.stopped().await;
    }
}

// ── FleetBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use agv_core::CoreError;
    use agv_vehicle::{SensorHandles, VehicleError};

    use super::*;
    use crate::FleetError;

    #[test]
    fn invalid_config_rejected_before_start() {
        let cfg = FleetConfig { tick_period_ms: 0, ..config(2, Some(1)) };
        let err = FleetBuilder::new(cfg).build().err().unwrap();
        assert!(matches!(err, FleetError::Core(CoreError::Config(_))));
    }

    #[test]
    fn sensor_handle_count_checked() {
        let err = FleetBuilder::new(config(2, Some(1)))
            .sensor_handles(vec![SensorHandles::default()])
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, FleetError::Vehicle(VehicleError::SensorCountMismatch { .. })));
    }

    #[test]
    fn explicit_seed_is_kept() {
        let driver = FleetBuilder::new(config(3, Some(1))).build().unwrap();
        assert_eq!(driver.seed(), 42);
        assert_eq!(driver.states().len(), 3);
        assert_eq!(driver.params().charging_threshold, 20.0);
        assert_eq!(driver.locations().len(), 3);
    }
}

// ── FleetDriver ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver {
    use agv_core::Tick;
    use agv_telemetry::EmitOutcome;
    use agv_vehicle::{StepOutcome, VehicleState};

    use super::*;
    use crate::{FleetObserver, VehicleReport};

    #[tokio::test(start_paused = true)]
    async fn bounded_run_delivers_channels_times_ticks() {
        let sink = Arc::new(MemorySink::new());
        let report = run(config(3, Some(5)), sink.clone(), StopSignal::new()).await;

        assert!(!report.stopped);
        assert!(report.flushed);
        assert!(report.aborted.is_empty());
        assert_eq!(report.vehicles.len(), 3);

        let per_vehicle = Channel::DEFAULT_SET.len() * 5;
        for (i, v) in report.vehicles.iter().enumerate() {
            assert_eq!(v.id, VehicleId(i as u32));
            assert_eq!(v.ticks, 5);
            assert_eq!(v.readings_written, per_vehicle);
            assert_eq!(v.readings_failed, 0);
            let stored = sink.readings().iter().filter(|r| r.vehicle == v.name).count();
            assert_eq!(stored, per_vehicle);
        }
        assert_eq!(sink.len(), 3 * per_vehicle);
        assert_eq!(report.readings_written(), 3 * per_vehicle);
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_run_takes_expected_time() {
        let start = tokio::time::Instant::now();
        run(config(2, Some(4)), Arc::new(MemorySink::new()), StopSignal::new()).await;
        // Ticks at 0, 1, 2, 3 s.
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn same_seed_same_final_states() {
        let a = run(config(4, Some(50)), Arc::new(MemorySink::new()), StopSignal::new()).await;
        let b = run(config(4, Some(50)), Arc::new(MemorySink::new()), StopSignal::new()).await;
        let fa: Vec<&VehicleState> = a.vehicles.iter().map(|v| &v.final_state).collect();
        let fb: Vec<&VehicleState> = b.vehicles.iter().map(|v| &v.final_state).collect();
        assert_eq!(fa, fb);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_sink_does_not_stop_ticking() {
        let sink = Arc::new(RejectingSink { calls: AtomicUsize::new(0) });
        let cfg = single_attempt(config(2, Some(6)), 100);
        let report = run(cfg, sink.clone(), StopSignal::new()).await;

        let per_vehicle = Channel::DEFAULT_SET.len() * 6;
        for v in &report.vehicles {
            assert_eq!(v.ticks, 6);
            assert_eq!(v.readings_written, 0);
            assert_eq!(v.readings_failed, per_vehicle);
        }
        assert_eq!(sink.calls.load(Ordering::SeqCst), 2 * per_vehicle);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_sink_times_out_per_write() {
        let cfg = single_attempt(config(2, Some(3)), 50);
        let report = run(cfg, Arc::new(HangingSink), StopSignal::new()).await;

        for v in &report.vehicles {
            assert_eq!(v.ticks, 3);
            assert_eq!(v.readings_failed, Channel::DEFAULT_SET.len() * 3);
        }
        assert!(report.aborted.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_signal_halts_every_loop() {
        let stop = StopSignal::new();
        let trigger = stop.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(5_500)).await;
            trigger.stop();
        });

        let sink = Arc::new(MemorySink::new());
        let report = run(config(3, None), sink.clone(), stop).await;

        assert!(report.stopped);
        assert!(report.aborted.is_empty());
        assert_eq!(report.vehicles.len(), 3);
        for v in &report.vehicles {
            // Ticks at 0..=5 s.
            assert_eq!(v.ticks, 6);
        }
        assert_eq!(sink.len(), 3 * 6 * Channel::DEFAULT_SET.len());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_before_start_runs_no_ticks() {
        let stop = StopSignal::new();
        stop.stop();
        let sink = Arc::new(MemorySink::new());
        let report = run(config(2, None), sink.clone(), stop).await;

        assert!(report.stopped);
        assert_eq!(report.vehicles.len(), 2);
        assert_eq!(report.total_ticks(), 0);
        assert!(sink.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stuck_tasks_are_aborted_after_drain() {
        let mut cfg = single_attempt(config(2, None), 24 * 3600 * 1_000);
        cfg.drain_timeout_ms = 1_000;

        let stop = StopSignal::new();
        let trigger = stop.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            trigger.stop();
        });

        let start = tokio::time::Instant::now();
        let report = run(cfg, Arc::new(HangingSink), stop).await;

        assert!(report.stopped);
        assert!(report.vehicles.is_empty());
        assert_eq!(report.aborted, [VehicleId(0), VehicleId(1)]);
        assert_eq!(start.elapsed(), Duration::from_millis(1_500));
    }

    #[tokio::test(start_paused = true)]
    async fn flush_failure_is_reported() {
        let report = run(config(1, Some(2)), Arc::new(UnflushableSink), StopSignal::new()).await;
        assert!(!report.flushed);
        assert_eq!(report.vehicles[0].readings_written, 2 * Channel::DEFAULT_SET.len());
    }

    #[derive(Default)]
    struct Recorder {
        ticks: AtomicUsize,
        done:  AtomicUsize,
    }

    impl FleetObserver for Recorder {
        fn on_tick(&self, state: &VehicleState, tick: Tick, _: &StepOutcome, emitted: &EmitOutcome) {
            assert!(tick.0 >= 1);
            assert_eq!(emitted.written, state.sensors().len());
            self.ticks.fetch_add(1, Ordering::SeqCst);
        }

        fn on_vehicle_done(&self, report: &VehicleReport) {
            assert_eq!(report.ticks, 7);
            self.done.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn observer_sees_every_tick() {
        let recorder = Arc::new(Recorder::default());
        let driver = FleetBuilder::new(config(3, Some(7)))
            .sink(Arc::new(MemorySink::new()))
            .observer(recorder.clone())
            .build()
            .unwrap();
        driver.run(StopSignal::new()).await;

        assert_eq!(recorder.ticks.load(Ordering::SeqCst), 21);
        assert_eq!(recorder.done.load(Ordering::SeqCst), 3);
    }
}
