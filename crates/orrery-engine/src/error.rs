/// Errors raised while loading engine configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid viewport size {width}x{height} (must be positive)")]
    Viewport { width: f32, height: f32 },

    #[error("invalid camera: {0}")]
    Camera(&'static str),
}

/// Errors raised while packing a frame into the shared buffer.
#[derive(thiserror::Error, Debug)]
pub enum ProtocolError {
    #[error("frame buffer holds {actual} floats, layout needs {expected}")]
    BufferSize { expected: usize, actual: usize },
}
