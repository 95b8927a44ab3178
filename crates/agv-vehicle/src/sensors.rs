//! Channel → sink sensor bindings.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use agv_core::Channel;

/// Opaque sink-side sensor identifier.
///
/// Cloned into every reading, so it is reference counted rather than owned.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SensorId(Arc<str>);

impl SensorId {
    pub fn new(id: impl AsRef<str>) -> Self {
        SensorId(Arc::from(id.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SensorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The sensors provisioned on one vehicle, keyed by channel.
///
/// Built once before the run and never modified; there is no `insert` after
/// construction.  Iteration is in canonical channel order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SensorHandles(BTreeMap<Channel, SensorId>);

impl SensorHandles {
    /// Bind the given channel/sensor pairs.  Later duplicates win.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Channel, SensorId)>) -> Self {
        SensorHandles(pairs.into_iter().collect())
    }

    /// Deterministic handles `"{vehicle}.{channel}"` for sinks that accept
    /// any sensor name.
    pub fn derived(vehicle_name: &str, channels: &[Channel]) -> Self {
        Self::from_pairs(
            channels
                .iter()
                .map(|&ch| (ch, SensorId::new(format!("{vehicle_name}.{ch}")))),
        )
    }

    #[inline]
    pub fn get(&self, channel: Channel) -> Option<&SensorId> {
        self.0.get(&channel)
    }

    /// Bound channels and their sensors, in canonical channel order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &SensorId)> {
        self.0.iter().map(|(&ch, id)| (ch, id))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
