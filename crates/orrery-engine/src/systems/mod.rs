pub mod backdrop;
pub mod lighting;
pub mod rng;
pub mod sdf_render;
pub mod vector;
