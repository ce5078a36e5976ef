pub mod camera;
pub mod point_instance;
pub mod sdf_instance;
pub mod traits;

// Re-export key types for convenient access
pub use traits::{BakeState, DrawTiming, FrameData, Renderer};
