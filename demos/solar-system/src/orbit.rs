/// Circular orbit model: pure math, no engine state.
///
/// Orbits are circles in the plane `y = ORBITAL_PLANE_Y` centered on the sun.
/// The angle is `elapsed * speed` with no wrapping, so position depends only
/// on the current clock reading and the current speed.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::bodies::Body;

/// Height of the shared orbital plane.
pub const ORBITAL_PLANE_Y: f64 = 0.0;

/// Segments used to draw one orbit ring.
pub const RING_SEGMENTS: usize = 150;

/// Position of `body` after `elapsed` seconds at angular `speed` (rad/s).
///
/// Zero speed parks the body at `(d, 0, 0)`; negative speed runs retrograde.
/// Non-finite input gives non-finite output.
pub fn compute_position(body: &Body, speed: f64, elapsed: f64) -> DVec3 {
    let angle = elapsed * speed;
    let d = body.orbital_distance;
    DVec3::new(d * angle.cos(), ORBITAL_PLANE_Y, d * angle.sin())
}

/// Seconds per revolution at `speed`, or None when the body does not move.
pub fn orbital_period(speed: f64) -> Option<f64> {
    if speed == 0.0 {
        None
    } else {
        Some(TAU / speed.abs())
    }
}

/// `segments + 1` points around the orbit circle of `radius`; the last point
/// repeats the first so the curve closes.
pub fn ring_points(radius: f64, segments: usize) -> Vec<DVec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let theta = i as f64 / segments as f64 * TAU;
            DVec3::new(radius * theta.cos(), ORBITAL_PLANE_Y, radius * theta.sin())
        })
        .collect()
}
