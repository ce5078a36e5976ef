//! The rendering collaborator contract.
//!
//! The engine does all scene work on the CPU: it projects the 3D scene into
//! viewport-space buffers (SDF spheres, tessellated vectors, star points) and
//! hands them over once per frame. A backend only rasterizes what it is given.

use super::camera::CameraUniform;
use super::point_instance::PointInstance;
use super::sdf_instance::SDFInstance;
use crate::api::types::GameEvent;
use crate::systems::lighting::{AmbientLight, PointLight};
use crate::systems::vector::VectorVertex;

/// Bake state for the static backdrop layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BakeState {
    /// Incremented every time the backdrop is re-projected. Backends may
    /// cache their GPU copy of the backdrop until this changes.
    pub generation: u32,
}

/// Timing information from a draw call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawTiming {
    /// Time spent submitting draw calls (microseconds)
    pub draw_us: u32,
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Ticks completed, including the one that built this frame.
    pub frame_index: u64,
    /// Time source reading the frame was built from.
    pub elapsed: f64,
    /// Sun and planets, projected, sorted back to front.
    pub sdf_instances: &'a [SDFInstance],
    /// Baked static vectors (orbit rings).
    pub backdrop_vertices: &'a [VectorVertex],
    /// Vectors drawn by the game this frame.
    pub vector_vertices: &'a [VectorVertex],
    /// Baked star field.
    pub stars: &'a [PointInstance],
    pub bake_state: BakeState,
    pub ambient: AmbientLight,
    pub lights: &'a [PointLight],
    pub camera: CameraUniform,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Game events emitted this frame.
    pub events: &'a [GameEvent],
}

/// Renderer trait for drawing backends.
pub trait Renderer {
    /// Backend identifier (e.g. "js-callback", "headless").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame. Returns timing information for profiling.
    fn draw(&mut self, frame: &FrameData) -> DrawTiming;
}

/// What a `HeadlessRenderer` saw in one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameSummary {
    pub frame_index: u64,
    pub elapsed: f64,
    pub sdf_instances: Vec<SDFInstance>,
    pub backdrop_vertex_count: usize,
    pub vector_vertex_count: usize,
    pub star_count: usize,
    pub light_count: usize,
    pub bake_generation: u32,
    pub events: Vec<GameEvent>,
}

/// Renderer that draws nothing and remembers the last frame.
/// Used by native hosts and tests.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames_drawn: u64,
    last: Option<FrameSummary>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn last_frame(&self) -> Option<&FrameSummary> {
        self.last.as_ref()
    }
}

impl Renderer for HeadlessRenderer {
    fn backend(&self) -> &'static str {
        "headless"
    }

    fn draw(&mut self, frame: &FrameData) -> DrawTiming {
        self.frames_drawn += 1;
        self.last = Some(FrameSummary {
            frame_index: frame.frame_index,
            elapsed: frame.elapsed,
            sdf_instances: frame.sdf_instances.to_vec(),
            backdrop_vertex_count: frame.backdrop_vertices.len(),
            vector_vertex_count: frame.vector_vertices.len(),
            star_count: frame.stars.len(),
            light_count: frame.lights.len(),
            bake_generation: frame.bake_state.generation,
            events: frame.events.to_vec(),
        });
        DrawTiming::default()
    }
}
