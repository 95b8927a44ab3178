//! Planar floor coordinates.
//!
//! Vehicles move on a flat warehouse floor, so positions are plain Cartesian
//! `f64` pairs and distances are Euclidean.  The unit is whatever the
//! location table uses; the step length is expressed in the same unit.

use serde::{Deserialize, Serialize};

/// A 2D floor coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Advance at most `step` units toward `target`.
    ///
    /// Returns `target` itself once the remaining distance is `<= step`, so
    /// repeated calls never overshoot and converge exactly.
    pub fn step_toward(self, target: Point, step: f64) -> Point {
        let dist = self.distance(target);
        if dist <= step {
            return target;
        }
        let dx = (target.x - self.x) / dist;
        let dy = (target.y - self.y) / dist;
        Point::new(self.x + dx * step, self.y + dy * step)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// Axis-aligned bounding rectangle of the simulated floor.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// `true` when both corners are finite and `min < max` on both axes.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min.x < self.max.x
            && self.min.y < self.max.y
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }

    /// Project `p` onto the rectangle.
    #[inline]
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }
}

impl Default for Bounds {
    /// A 100 × 100 floor anchored at the origin.
    fn default() -> Self {
        Self::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0))
    }
}
