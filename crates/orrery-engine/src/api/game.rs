use serde::{Deserialize, Serialize};

use crate::api::types::{EntityId, GameEvent};
use crate::core::scene::Scene;
use crate::error::ConfigError;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Camera3D;
use crate::renderer::sdf_instance::SDFBuffer;
use crate::systems::backdrop::Backdrop;
use crate::systems::lighting::LightState;
use crate::systems::vector::VectorState;

/// Perspective camera settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees (default: 75).
    pub fov_y_degrees: f32,
    /// Near clip distance (default: 0.1).
    pub near: f32,
    /// Far clip distance (default: 2000).
    pub far: f32,
    /// Eye position in world space (default: 0, 0, 70).
    pub position: [f32; 3],
    /// Look-at point (default: origin).
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 2000.0,
            position: [0.0, 0.0, 70.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Background star field settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarFieldConfig {
    /// Number of stars scattered at init (default: 10000).
    pub count: usize,
    /// Edge length of the cube the stars are scattered in, centered on the origin.
    pub extent: f32,
    /// RNG seed, so the same config always produces the same sky.
    pub seed: u64,
    /// Point size in pixels.
    pub size: f32,
    /// Point color (RGB, 0.0-1.0).
    pub color: [f32; 3],
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            extent: 2000.0,
            seed: 42,
            size: 1.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in pixels.
    pub viewport_width: f32,
    /// Viewport height in pixels.
    pub viewport_height: f32,
    /// Maximum number of SDF sphere instances (default: 128).
    pub max_sdf_instances: usize,
    /// Maximum number of vector vertices, baked and dynamic combined (default: 16384).
    pub max_vector_vertices: usize,
    /// Maximum number of star points (default: 10000).
    pub max_star_points: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Maximum number of point lights (default: 8).
    pub max_lights: usize,
    pub camera: CameraConfig,
    pub stars: StarFieldConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_sdf_instances: 128,
            max_vector_vertices: 16384,
            max_star_points: 10_000,
            max_events: 32,
            max_lights: 8,
            camera: CameraConfig::default(),
            stars: StarFieldConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a camera and viewport can actually be built from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport_width > 0.0 && self.viewport_height > 0.0) {
            return Err(ConfigError::Viewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        let cam = &self.camera;
        if !(cam.fov_y_degrees > 0.0 && cam.fov_y_degrees < 180.0) {
            return Err(ConfigError::Camera("fov_y_degrees must be in (0, 180)"));
        }
        if !(cam.near > 0.0 && cam.far > cam.near) {
            return Err(ConfigError::Camera("clip planes must satisfy 0 < near < far"));
        }
        if cam.position == cam.target {
            return Err(ConfigError::Camera("position and target coincide"));
        }
        Ok(())
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, describe the static backdrop.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One animation step. `ctx.elapsed()` holds the time source reading for this step.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass for custom render commands.
    fn render(&self, _ctx: &mut RenderContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub lights: LightState,
    pub backdrop: Backdrop,
    /// Per-frame vectors, cleared before every update.
    pub vectors: VectorState,
    pub camera: Camera3D,
    pub events: Vec<GameEvent>,
    elapsed: f64,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    /// Create a context whose camera and capacities follow `config`.
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            scene: Scene::new(),
            lights: LightState::with_capacity(config.max_lights),
            backdrop: Backdrop::new(),
            vectors: VectorState::with_capacity(config.max_vector_vertices),
            camera: Camera3D::from_config(
                &config.camera,
                config.viewport_width,
                config.viewport_height,
            ),
            events: Vec::with_capacity(config.max_events),
            elapsed: 0.0,
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Seconds reported by the time source for the current step.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Set by the runner before each update.
    pub fn set_elapsed(&mut self, elapsed: f64) {
        self.elapsed = elapsed;
    }

    /// Emit a game event to be forwarded to the UI layer.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (events, dynamic vectors).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.vectors.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for optional custom render commands.
pub struct RenderContext<'a> {
    pub sdf_buffer: &'a mut SDFBuffer,
    pub camera: &'a Camera3D,
}
