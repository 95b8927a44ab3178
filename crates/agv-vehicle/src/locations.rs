//! Immutable reference locations and floor bounds.

use agv_core::{Bounds, CoreError, FleetConfig, LocationId, Point};

use crate::{VehicleError, VehicleResult};

/// A named point on the floor.
#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub id:    LocationId,
    pub name:  String,
    pub point: Point,
}

/// Every reference location plus the two designated roles (start and
/// drop-off) and the floor rectangle.
///
/// Built once at startup and shared read-only by every vehicle task.
#[derive(Clone, Debug)]
pub struct LocationTable {
    locations: Vec<Location>,
    start:     LocationId,
    dropoff:   LocationId,
    bounds:    Bounds,
}

impl LocationTable {
    /// Build from a (validated) fleet config.
    pub fn from_config(config: &FleetConfig) -> VehicleResult<Self> {
        let locations = config
            .locations
            .iter()
            .enumerate()
            .map(|(i, l)| -> VehicleResult<Location> {
                let id = LocationId::try_from(i).map_err(|_| {
                    CoreError::Config(format!("too many locations ({})", config.locations.len()))
                })?;
                Ok(Location { id, name: l.name.clone(), point: l.point() })
            })
            .collect::<VehicleResult<Vec<_>>>()?;

        let find = |name: &str| {
            locations
                .iter()
                .find(|l| l.name == name)
                .map(|l| l.id)
                .ok_or_else(|| VehicleError::UnknownLocation(name.to_owned()))
        };
        let start   = find(&config.start_location)?;
        let dropoff = find(&config.dropoff_location)?;

        Ok(Self { locations, start, dropoff, bounds: config.bounds })
    }

    #[inline]
    pub fn start(&self) -> &Location {
        &self.locations[self.start.index()]
    }

    #[inline]
    pub fn dropoff(&self) -> &Location {
        &self.locations[self.dropoff.index()]
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Locations whose point differs from `from`: the eligible targets for a
    /// new mission.
    pub fn others(&self, from: Point) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(move |l| l.point != from)
    }
}
