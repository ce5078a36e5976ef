//! Static backdrop: the star field and orbit rings.
//!
//! The backdrop is described once in world space and baked (projected into
//! viewport buffers) only when it or the camera changes. `generation` counts
//! edits so the runner can tell when a re-bake is due.

use glam::{Vec2, Vec3};

use crate::api::game::StarFieldConfig;
use crate::renderer::camera::Camera3D;
use crate::renderer::point_instance::{PointBuffer, PointInstance};
use crate::systems::rng::Rng;
use crate::systems::vector::{VectorColor, VectorState};

/// A closed curve in world space, drawn as a thin stroke.
#[derive(Debug, Clone)]
pub struct OrbitRing {
    pub points: Vec<Vec3>,
    pub color: VectorColor,
    /// Stroke width in pixels.
    pub width: f32,
}

/// Counts from one bake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BakeStats {
    pub stars: usize,
    pub ring_vertices: usize,
}

pub struct Backdrop {
    stars: Vec<Vec3>,
    star_color: [f32; 3],
    star_size: f32,
    rings: Vec<OrbitRing>,
    generation: u64,
}

impl Backdrop {
    pub fn new() -> Self {
        Self {
            stars: Vec::new(),
            star_color: [1.0, 1.0, 1.0],
            star_size: 1.0,
            rings: Vec::new(),
            generation: 0,
        }
    }

    /// Replace the star field with `config.count` stars scattered uniformly
    /// in a cube of edge `config.extent` centered on the origin.
    pub fn scatter_stars(&mut self, config: &StarFieldConfig) {
        let mut rng = Rng::new(config.seed);
        let half = config.extent * 0.5;
        self.stars = (0..config.count)
            .map(|_| Vec3::new(rng.centered(half), rng.centered(half), rng.centered(half)))
            .collect();
        self.star_color = config.color;
        self.star_size = config.size;
        self.generation += 1;
    }

    pub fn add_ring(&mut self, points: Vec<Vec3>, color: VectorColor, width: f32) {
        self.rings.push(OrbitRing { points, color, width });
        self.generation += 1;
    }

    pub fn stars(&self) -> &[Vec3] {
        &self.stars
    }

    pub fn rings(&self) -> &[OrbitRing] {
        &self.rings
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Project the backdrop through `camera` into `vectors` and `points`,
    /// replacing their contents. Stars outside the viewport or the clip
    /// range are skipped. Rings partly behind the camera are drawn as the
    /// visible runs.
    pub fn bake(&self, camera: &Camera3D, vectors: &mut VectorState, points: &mut PointBuffer, max_points: usize) -> BakeStats {
        vectors.clear();
        points.clear();

        let viewport = camera.viewport();
        let [r, g, b] = self.star_color;
        for star in &self.stars {
            if points.point_count() >= max_points {
                break;
            }
            let Some(p) = camera.project(*star) else {
                continue;
            };
            if p.pos.x < 0.0 || p.pos.y < 0.0 || p.pos.x > viewport.x || p.pos.y > viewport.y {
                continue;
            }
            points.push(PointInstance {
                x: p.pos.x,
                y: p.pos.y,
                size: (self.star_size * p.scale).max(1.0),
                depth: p.depth,
                r,
                g,
                b,
                a: 1.0,
            });
        }

        for ring in &self.rings {
            bake_ring(ring, camera, vectors);
        }

        BakeStats {
            stars: points.point_count(),
            ring_vertices: vectors.vertex_count(),
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}

fn bake_ring(ring: &OrbitRing, camera: &Camera3D, vectors: &mut VectorState) {
    let mut points = ring.points.as_slice();
    // Closed curves are sampled with the first point repeated at the end.
    if points.len() > 1 && points.first() == points.last() {
        points = &points[..points.len() - 1];
    }

    let projected: Vec<Option<Vec2>> = points
        .iter()
        .map(|p| camera.project(*p).map(|proj| proj.pos))
        .collect();

    if projected.iter().all(Option::is_some) {
        let loop_px: Vec<Vec2> = projected.into_iter().flatten().collect();
        vectors.stroke_polygon(&loop_px, ring.width, ring.color);
        return;
    }

    // Start right after a hidden sample so no visible run wraps past the end.
    let Some(hidden) = projected.iter().position(Option::is_none) else {
        return;
    };
    let n = projected.len();
    let mut run: Vec<Vec2> = Vec::new();
    for p in (1..=n).map(|k| projected[(hidden + k) % n]) {
        match p {
            Some(px) => run.push(px),
            None => {
                vectors.stroke_polyline(&run, ring.width, ring.color);
                run.clear();
            }
        }
    }
    vectors.stroke_polyline(&run, ring.width, ring.color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn circle(radius: f32, segments: usize) -> Vec<Vec3> {
        (0..=segments)
            .map(|i| {
                let theta = i as f32 / segments as f32 * TAU;
                Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin())
            })
            .collect()
    }

    #[test]
    fn scatter_is_seeded_and_bounded() {
        let config = StarFieldConfig { count: 500, ..Default::default() };
        let mut a = Backdrop::new();
        let mut b = Backdrop::new();
        a.scatter_stars(&config);
        b.scatter_stars(&config);
        assert_eq!(a.stars(), b.stars());
        assert_eq!(a.stars().len(), 500);
        assert!(a
            .stars()
            .iter()
            .all(|s| s.abs().max_element() <= config.extent * 0.5));
        assert_eq!(a.generation(), 1);
    }

    #[test]
    fn stars_outside_view_are_not_baked() {
        let mut backdrop = Backdrop::new();
        backdrop.scatter_stars(&StarFieldConfig { count: 2000, ..Default::default() });
        let camera = Camera3D::default();
        let mut vectors = VectorState::new();
        let mut points = PointBuffer::with_capacity(2000);
        let stats = backdrop.bake(&camera, &mut vectors, &mut points, 2000);

        assert!(stats.stars > 0);
        assert!(stats.stars < 2000);
        assert!(points.points().iter().all(|p| p.size >= 1.0 && p.depth > 0.0));
    }

    #[test]
    fn bake_respects_point_budget() {
        let mut backdrop = Backdrop::new();
        backdrop.scatter_stars(&StarFieldConfig { count: 2000, ..Default::default() });
        let mut points = PointBuffer::default();
        let stats = backdrop.bake(&Camera3D::default(), &mut VectorState::new(), &mut points, 10);
        assert_eq!(stats.stars, 10);
    }

    #[test]
    fn visible_ring_bakes_to_triangles() {
        let mut backdrop = Backdrop::new();
        backdrop.add_ring(circle(20.0, 150), VectorColor::hex(0x3399ff), 1.0);
        let mut vectors = VectorState::new();
        let stats = backdrop.bake(&Camera3D::default(), &mut vectors, &mut PointBuffer::default(), 0);

        assert!(stats.ring_vertices > 0);
        assert_eq!(stats.ring_vertices % 3, 0);
        assert!(vectors.vertices().iter().all(|v| (v.b - 1.0).abs() < 1e-6));
    }

    #[test]
    fn ring_crossing_the_camera_is_split() {
        let mut backdrop = Backdrop::new();
        // Radius larger than the camera distance: part of the ring is behind the eye.
        backdrop.add_ring(circle(100.0, 150), VectorColor::WHITE, 1.0);
        let mut vectors = VectorState::new();
        let stats = backdrop.bake(&Camera3D::default(), &mut vectors, &mut PointBuffer::default(), 0);
        assert!(stats.ring_vertices > 0);
    }

    #[test]
    fn split_ring_is_joined_across_its_seam() {
        let camera = Camera3D::new(
            Vec3::new(0.0, 30.0, 70.0),
            Vec3::ZERO,
            75.0,
            0.1,
            2000.0,
            Vec2::new(800.0, 600.0),
        );
        let mut ring = circle(100.0, 64);
        ring[64] = ring[0];
        assert!(camera.project(ring[0]).is_some());
        assert!(camera.project(ring[16]).is_none());

        // Same samples, starting inside the hidden arc.
        let mut rotated = ring[..64].to_vec();
        rotated.rotate_left(16);
        rotated.push(rotated[0]);

        let bake = |points: Vec<Vec3>| {
            let mut backdrop = Backdrop::new();
            backdrop.add_ring(points, VectorColor::WHITE, 1.0);
            let mut vectors = VectorState::new();
            backdrop.bake(&camera, &mut vectors, &mut PointBuffer::default(), 0);
            vectors.vertices().to_vec()
        };
        let from_seam = bake(ring);
        assert!(!from_seam.is_empty());
        assert_eq!(from_seam, bake(rotated));
    }

    #[test]
    fn rebake_replaces_previous_output() {
        let mut backdrop = Backdrop::new();
        backdrop.add_ring(circle(10.0, 150), VectorColor::WHITE, 1.0);
        let camera = Camera3D::default();
        let mut vectors = VectorState::new();
        let mut points = PointBuffer::default();
        let first = backdrop.bake(&camera, &mut vectors, &mut points, 0);
        let second = backdrop.bake(&camera, &mut vectors, &mut points, 0);
        assert_eq!(first, second);
    }
}
