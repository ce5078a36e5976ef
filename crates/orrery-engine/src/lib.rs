pub mod api;
pub mod bridge;
pub mod components;
pub mod core;
pub mod error;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{CameraConfig, EngineContext, Game, GameConfig, RenderContext, StarFieldConfig};
pub use api::types::{EntityId, GameEvent};
pub use bridge::protocol::{ProtocolLayout, DEFAULT_MAX_LIGHTS, LIGHT_FLOATS};
pub use components::entity::Entity;
pub use components::mesh::{MeshComponent, SDFColor, SDFShape};
pub use core::scene::Scene;
pub use core::schedule::{run_loop, FixedRateScheduler, FrameCallback, FrameScheduler};
pub use core::time::{ManualClock, TimeSource};
#[cfg(not(target_arch = "wasm32"))]
pub use core::time::InstantClock;
pub use error::{ConfigError, ProtocolError};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::{Camera3D, CameraUniform, Projection};
pub use renderer::point_instance::{PointBuffer, PointInstance};
pub use renderer::sdf_instance::{SDFBuffer, SDFInstance};
pub use renderer::traits::{BakeState, DrawTiming, FrameData, FrameSummary, HeadlessRenderer, Renderer};
pub use systems::backdrop::{Backdrop, BakeStats, OrbitRing};
pub use systems::lighting::{AmbientLight, LightState, PointLight};
pub use systems::sdf_render::build_sdf_buffer;
pub use systems::vector::{VectorColor, VectorState, VectorVertex};
