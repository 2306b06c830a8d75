//! Geodesy helpers used by the navigation simulator.
//!
//! Two metrics live side by side here:
//!
//! - `haversine_distance` is a true great-circle distance in meters and is
//!   used only to pick the nearest waypoint when the simulator seeds.
//! - `planar_distance` and `move_towards` treat (lon, lat) as a flat plane
//!   measured in degrees. They drive the arrival check and step motion.
//!
//! The mix of units is the reference behavior and is kept as is; changing
//! either side alters simulated trajectories.

use rover_contracts::mission::Waypoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between `a` and `b` in meters.
pub fn haversine_distance(a: Waypoint, b: Waypoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Index of the waypoint closest to `from` by great-circle distance.
///
/// Linear scan; the first index achieving the strict minimum wins, so ties
/// keep the earliest index. Returns `None` for an empty slice, and also when
/// no distance compares below infinity (NaN coordinates).
pub fn nearest_waypoint(from: Waypoint, waypoints: &[Waypoint]) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut min_distance = f64::INFINITY;

    for (idx, wp) in waypoints.iter().enumerate() {
        let distance = haversine_distance(from, *wp);
        if distance < min_distance {
            min_distance = distance;
            best = Some(idx);
        }
    }

    best
}

/// Euclidean distance in coordinate space (degrees).
pub fn planar_distance(a: Waypoint, b: Waypoint) -> f64 {
    (b.lon - a.lon).hypot(b.lat - a.lat)
}

/// Advance `current` by `step` degrees along the straight line to `target`.
///
/// Snaps exactly onto `target` when it is at most `step` away.
pub fn move_towards(current: Waypoint, target: Waypoint, step: f64) -> Waypoint {
    let d_lon = target.lon - current.lon;
    let d_lat = target.lat - current.lat;
    let dist = d_lon.hypot(d_lat);

    if dist <= step {
        return target;
    }

    Waypoint::new(
        current.lon + d_lon / dist * step,
        current.lat + d_lat / dist * step,
    )
}
