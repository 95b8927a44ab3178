//! Fluent builder for constructing a [`FleetDriver`].

use std::sync::Arc;

use agv_core::FleetConfig;
use agv_telemetry::{DataSink, NullSink, ReadingEmitter, RetryPolicy};
use agv_vehicle::{FleetStateBuilder, LocationTable, SensorHandles};
use tracing::debug;

use crate::{FleetDriver, FleetObserver, FleetResult, NoopObserver};

/// Fluent builder for [`FleetDriver`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                              |
/// |------------------------|--------------------------------------|
/// | `.sink(s)`             | `NullSink`                           |
/// | `.observer(o)`         | `NoopObserver`                       |
/// | `.sensor_handles(v)`   | derived `"{vehicle}.{channel}"` ids  |
///
/// # Example
///
/// ```rust,ignore
/// let driver = FleetBuilder::new(config)
///     .sink(Arc::new(CsvSink::create(path)?))
///     .build()?;
/// let report = driver.run(StopSignal::new()).await;
/// ```
pub struct FleetBuilder {
    config:   FleetConfig,
    sink:     Option<Arc<dyn DataSink>>,
    observer: Option<Arc<dyn FleetObserver>>,
    sensors:  Option<Vec<SensorHandles>>,
}

impl FleetBuilder {
    pub fn new(config: FleetConfig) -> Self {
        Self { config, sink: None, observer: None, sensors: None }
    }

    /// Where readings go.  One sink is shared by every vehicle.
    pub fn sink(mut self, sink: Arc<dyn DataSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn observer(mut self, observer: Arc<dyn FleetObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Pre-provisioned sensor handles, one entry per vehicle in ID order.
    pub fn sensor_handles(mut self, handles: Vec<SensorHandles>) -> Self {
        self.sensors = Some(handles);
        self
    }

    /// Validate the config, resolve the seed, and build every vehicle.
    ///
    /// Every configuration error surfaces here, before any task starts.
    pub fn build(self) -> FleetResult<FleetDriver> {
        let config = self.config;
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let locations = LocationTable::from_config(&config)?;
        let params = config.step_params();

        let mut states = FleetStateBuilder::new(&config, seed);
        if let Some(handles) = self.sensors {
            states = states.sensor_handles(handles);
        }
        let (states, rngs) = states.build()?;

        let sink = self.sink.unwrap_or_else(|| Arc::new(NullSink));
        let emitter = ReadingEmitter::new(sink, RetryPolicy::from_config(&config.delivery));

        debug!(vehicles = states.len(), seed, ?params, "fleet built");

        Ok(FleetDriver {
            seed,
            states,
            rngs,
            params:        Arc::new(params),
            locations:     Arc::new(locations),
            emitter,
            observer:      self.observer.unwrap_or_else(|| Arc::new(NoopObserver)),
            tick_period:   config.tick_period(),
            max_ticks:     config.max_ticks,
            drain_timeout: config.drain_timeout(),
        })
    }
}
