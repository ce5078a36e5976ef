/// Body registry: the eight planets in orbital order, plus the sun's visuals.
///
/// Sizes, distances and speeds are simple linear progressions by index, not
/// real planetary data. Everything is built once at startup and never changes.

use orrery_engine::{SDFColor, VectorColor};

/// Body index constants.
pub const MERCURY: usize = 0;
pub const VENUS: usize = 1;
pub const EARTH: usize = 2;
pub const MARS: usize = 3;
pub const JUPITER: usize = 4;
pub const SATURN: usize = 5;
pub const URANUS: usize = 6;
pub const NEPTUNE: usize = 7;
pub const BODY_COUNT: usize = 8;

/// Names for UI display (indexed by body constant).
pub const BODY_NAMES: [&str; BODY_COUNT] = [
    "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
];

const BODY_COLORS: [u32; BODY_COUNT] = [
    0xb1b1b1, // Mercury
    0xe5c07b, // Venus
    0x2e70ff, // Earth
    0xc1440e, // Mars
    0xd2b48c, // Jupiter
    0xf5deb3, // Saturn
    0x7fffd4, // Uranus
    0x4169e1, // Neptune
];

const ORBIT_COLORS: [u32; BODY_COUNT] = [
    0x999999, 0xffcc00, 0x3399ff, 0xff3300, 0xff9966, 0xffcc99, 0x66ffff, 0x3333ff,
];

// ── Progressions ─────────────────────────────────────────────────────

const BASE_RADIUS: f32 = 0.7;
const RADIUS_STEP: f32 = 0.2;
const BASE_DISTANCE: f64 = 10.0;
const DISTANCE_STEP: f64 = 5.0;
/// Radians per second.
const BASE_SPEED: f64 = 0.01;
const SPEED_STEP: f64 = 0.002;

// ── Sun ──────────────────────────────────────────────────────────────

pub const SUN_RADIUS: f32 = 5.0;
pub const SUN_COLOR: u32 = 0xffff00;
/// Fully emissive: the sun ignores scene lighting.
pub const SUN_EMISSIVE: f32 = 1.0;

/// Rough, slightly metallic planet surfaces: a broad, dim highlight.
pub const PLANET_SHININESS: f32 = 8.0;

/// Orbit ring stroke width in pixels.
pub const ORBIT_LINE_WIDTH: f32 = 1.0;

/// One orbiting body. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Position in the registry, stable for the whole session.
    pub index: usize,
    pub name: &'static str,
    /// Sphere radius in world units.
    pub display_radius: f32,
    /// Orbit radius in world units.
    pub orbital_distance: f64,
    /// Initial angular speed, radians per second.
    pub default_speed: f64,
    pub body_color: SDFColor,
    pub orbit_color: VectorColor,
}

impl Body {
    fn seed(index: usize) -> Self {
        let i = index as f64;
        Self {
            index,
            name: BODY_NAMES[index],
            display_radius: BASE_RADIUS + index as f32 * RADIUS_STEP,
            orbital_distance: BASE_DISTANCE + i * DISTANCE_STEP,
            default_speed: BASE_SPEED + i * SPEED_STEP,
            body_color: SDFColor::hex(BODY_COLORS[index]),
            orbit_color: VectorColor::hex(ORBIT_COLORS[index]),
        }
    }
}

/// All bodies, ordered by index.
pub fn registry() -> [Body; BODY_COUNT] {
    std::array::from_fn(Body::seed)
}
