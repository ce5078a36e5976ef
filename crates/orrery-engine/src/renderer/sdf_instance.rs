use bytemuck::{Pod, Zeroable};

/// Per-instance SDF sphere data, already projected to viewport pixels.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SDFInstance {
    pub x: f32,
    pub y: f32,
    /// Radius in pixels.
    pub radius: f32,
    /// View depth, used for sorting and for depth-aware lighting.
    pub depth: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub shininess: f32,
    pub emissive: f32,
    /// Unprojected world position, so lighting can use the 3D light positions.
    pub world_x: f32,
    pub world_y: f32,
    pub world_z: f32,
}

impl SDFInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Buffer of SDF instances, ordered back to front.
pub struct SDFBuffer {
    instances: Vec<SDFInstance>,
}

impl SDFBuffer {
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: SDFInstance) {
        self.instances.push(instance);
    }

    /// Sort far-to-near so a painter's-algorithm renderer draws correctly.
    pub fn sort_back_to_front(&mut self) {
        self.instances
            .sort_by(|a, b| b.depth.total_cmp(&a.depth));
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn instances(&self) -> &[SDFInstance] {
        &self.instances
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for SDFBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sdf_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<SDFInstance>(), SDFInstance::STRIDE_BYTES);
        assert_eq!(SDFInstance::FLOATS, 12);
    }

    #[test]
    fn sorts_far_first() {
        let mut buf = SDFBuffer::new();
        for depth in [50.0, 90.0, 70.0] {
            buf.push(SDFInstance { depth, ..Default::default() });
        }
        buf.sort_back_to_front();
        let depths: Vec<f32> = buf.instances().iter().map(|i| i.depth).collect();
        assert_eq!(depths, vec![90.0, 70.0, 50.0]);
    }
}
