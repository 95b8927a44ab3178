//! Top-level fleet configuration.
//!
//! Loaded from a JSON file by the application crate and validated once,
//! before any vehicle task starts.  Every field has a default, so a config
//! file only needs to name what it changes.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{Bounds, Channel, CoreError, CoreResult, Point, Profile, StepOverrides, StepParams};

/// A named reference location on the floor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    pub x:    f64,
    pub y:    f64,
}

impl LocationConfig {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self { name: name.into(), x, y }
    }

    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Sink delivery policy: per-attempt timeout and bounded retry with backoff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Total attempts per reading, including the first.  1 = no retry.
    pub max_attempts:       u32,
    /// Upper bound on a single write attempt.
    pub attempt_timeout_ms: u64,
    /// Backoff before retry `n` is `min(base * 2^n, max)` plus jitter.
    pub backoff_base_ms:    u64,
    pub backoff_max_ms:     u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_attempts:       3,
            attempt_timeout_ms: 2_000,
            backoff_base_ms:    100,
            backoff_max_ms:     1_000,
        }
    }
}

/// Everything the simulator needs to know at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Number of simulated vehicles.
    pub vehicles: usize,

    /// Vehicle names are `"{prefix}-{nn}"`, numbered from 1.
    pub name_prefix: String,

    /// Wall-clock period between ticks, per vehicle.
    pub tick_period_ms: u64,

    /// Stop each vehicle after this many ticks.  `None` runs until stopped.
    pub max_ticks: Option<u64>,

    /// Master RNG seed.  `None` draws one from the OS at startup.
    pub seed: Option<u64>,

    /// The floor rectangle every position is clamped to.
    pub bounds: Bounds,

    /// Named reference locations.  Vehicles start at `start_location`, carry
    /// pallets to `dropoff_location`, and pick mission targets from the rest.
    pub locations:        Vec<LocationConfig>,
    pub start_location:   String,
    pub dropoff_location: String,

    /// Battery level every vehicle starts with.
    pub initial_battery: f64,

    /// Channels provisioned on every vehicle.
    pub channels: Vec<Channel>,

    /// Parameter preset, refined by `step`.
    pub profile: Profile,
    pub step:    StepOverrides,

    pub delivery: DeliveryConfig,

    /// How long in-flight ticks may take to finish after a stop request.
    pub drain_timeout_ms: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            vehicles:         5,
            name_prefix:      "AGV".to_owned(),
            tick_period_ms:   1_000,
            max_ticks:        None,
            seed:             None,
            bounds:           Bounds::default(),
            locations: vec![
                LocationConfig::new("plant-entrance", 10.0, 10.0),
                LocationConfig::new("loading-dock",   50.0, 40.0),
                LocationConfig::new("plant-exit",     90.0, 20.0),
            ],
            start_location:   "plant-entrance".to_owned(),
            dropoff_location: "loading-dock".to_owned(),
            initial_battery:  100.0,
            channels:         Channel::DEFAULT_SET.to_vec(),
            profile:          Profile::default(),
            step:             StepOverrides::default(),
            delivery:         DeliveryConfig::default(),
            drain_timeout_ms: 5_000,
        }
    }
}

impl FleetConfig {
    /// Parse a JSON document.  Does not validate.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read, parse, and validate a JSON config file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    #[inline]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    #[inline]
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }

    /// The profile preset with `step` overrides applied.
    pub fn step_params(&self) -> StepParams {
        self.step.apply(self.profile.params())
    }

    /// Find a location by name.
    pub fn location(&self, name: &str) -> Option<&LocationConfig> {
        self.locations.iter().find(|l| l.name == name)
    }

    /// Check every startup invariant.  The first violation is returned.
    pub fn validate(&self) -> CoreResult<()> {
        if self.vehicles == 0 {
            return Err(config_err("fleet must contain at least one vehicle"));
        }
        if u32::try_from(self.vehicles).is_err() {
            return Err(config_err(format!("fleet size {} is too large", self.vehicles)));
        }
        if self.tick_period_ms == 0 {
            return Err(config_err("tick_period_ms must be greater than zero"));
        }
        if !self.bounds.is_valid() {
            return Err(config_err(format!(
                "bounds are empty or inverted: min {} max {}",
                self.bounds.min, self.bounds.max
            )));
        }

        self.validate_locations()?;

        if !(0.0..=100.0).contains(&self.initial_battery) {
            return Err(config_err(format!(
                "initial_battery must be within [0, 100], got {}",
                self.initial_battery
            )));
        }

        if self.channels.is_empty() {
            return Err(config_err("at least one channel must be provisioned"));
        }
        let mut seen = HashSet::new();
        for ch in &self.channels {
            if !seen.insert(*ch) {
                return Err(config_err(format!("channel {ch} listed twice")));
            }
        }

        self.step_params().validate()?;

        let d = &self.delivery;
        if d.max_attempts == 0 {
            return Err(config_err("delivery.max_attempts must be at least 1"));
        }
        if d.attempt_timeout_ms == 0 {
            return Err(config_err("delivery.attempt_timeout_ms must be greater than zero"));
        }
        if d.backoff_base_ms > d.backoff_max_ms {
            return Err(config_err(format!(
                "delivery.backoff_base_ms ({}) exceeds backoff_max_ms ({})",
                d.backoff_base_ms, d.backoff_max_ms
            )));
        }
        Ok(())
    }

    fn validate_locations(&self) -> CoreResult<()> {
        if self.locations.is_empty() {
            return Err(config_err("at least one location is required"));
        }
        if u16::try_from(self.locations.len()).is_err() {
            return Err(config_err(format!("too many locations ({})", self.locations.len())));
        }

        let mut names = HashSet::new();
        for loc in &self.locations {
            if loc.name.is_empty() {
                return Err(config_err("location names must not be empty"));
            }
            if !names.insert(loc.name.as_str()) {
                return Err(config_err(format!("duplicate location name {:?}", loc.name)));
            }
            if !self.bounds.contains(loc.point()) {
                return Err(config_err(format!(
                    "location {:?} at {} lies outside the floor bounds",
                    loc.name,
                    loc.point()
                )));
            }
        }

        for (role, name) in [("start_location", &self.start_location), ("dropoff_location", &self.dropoff_location)] {
            if self.location(name).is_none() {
                return Err(config_err(format!("{role} {name:?} is not a known location")));
            }
        }
        Ok(())
    }
}

fn config_err(msg: impl Into<String>) -> CoreError {
    CoreError::Config(msg.into())
}
