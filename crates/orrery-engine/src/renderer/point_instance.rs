use bytemuck::{Pod, Zeroable};

/// A projected point sprite (stars).
/// 8 floats = 32 bytes per point.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub x: f32,
    pub y: f32,
    /// Diameter in pixels.
    pub size: f32,
    pub depth: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl PointInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Flat buffer of point sprites.
#[derive(Default)]
pub struct PointBuffer {
    points: Vec<PointInstance>,
}

impl PointBuffer {
    pub fn with_capacity(max: usize) -> Self {
        Self {
            points: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn push(&mut self, point: PointInstance) {
        self.points.push(point);
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[PointInstance] {
        &self.points
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }
}
