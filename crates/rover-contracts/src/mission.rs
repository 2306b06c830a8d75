//! Waypoints and mission plans.

use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
///
/// On the wire a waypoint is the GeoJSON position array `[lon, lat]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Waypoint {
    pub lon: f64,
    pub lat: f64,
}

impl Waypoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for Waypoint {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Waypoint> for [f64; 2] {
    fn from(wp: Waypoint) -> Self {
        [wp.lon, wp.lat]
    }
}

/// An ordered waypoint sequence. Index order is patrol order.
///
/// No validation is applied: a plan may be empty, repeat points, or
/// self-intersect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionPlan(Vec<Waypoint>);

impl MissionPlan {
    pub fn new(waypoints: Vec<Waypoint>) -> Self {
        Self(waypoints)
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<Waypoint> {
        self.0.first().copied()
    }
}
