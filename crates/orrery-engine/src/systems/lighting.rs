/// Point and ambient lighting for the 3D scene.
///
/// Lights are persistent: they stay until explicitly removed.
/// Each frame, the runner hands the active lights to the renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// A point light in world space.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, range]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Distance at which the light has fallen off to zero. 0 means unbounded.
    pub range: f32,
}

impl PointLight {
    /// Create a new point light.
    ///
    /// - `pos`: World-space position
    /// - `color`: RGB color (0.0-1.0)
    /// - `intensity`: Light strength multiplier
    /// - `range`: Falloff distance in world units
    pub fn new(pos: Vec3, color: [f32; 3], intensity: f32, range: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
            range,
        }
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Ambient light applied uniformly to every lit surface.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct AmbientLight {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
}

impl Default for AmbientLight {
    /// White at full intensity: unlit output when no lights are present.
    fn default() -> Self {
        Self { r: 1.0, g: 1.0, b: 1.0, intensity: 1.0 }
    }
}

/// Manages active lights and the ambient term for the scene.
pub struct LightState {
    lights: Vec<PointLight>,
    ambient: AmbientLight,
    capacity: usize,
}

impl LightState {
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    /// Create a LightState holding at most `max_lights` lights.
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            ambient: AmbientLight::default(),
            capacity: max_lights,
        }
    }

    /// Add a point light. Returns false when the light budget is exhausted.
    pub fn add(&mut self, light: PointLight) -> bool {
        if self.lights.len() >= self.capacity {
            log::warn!("light budget of {} exhausted, light dropped", self.capacity);
            return false;
        }
        self.lights.push(light);
        true
    }

    /// Remove all lights.
    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Number of active lights.
    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Set the ambient light. For a dark scene lit by point lights use a
    /// low intensity like 0.3.
    pub fn set_ambient(&mut self, color: [f32; 3], intensity: f32) {
        self.ambient = AmbientLight {
            r: color[0],
            g: color[1],
            b: color[2],
            intensity,
        };
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ambient
    }

    /// Pointer to the lights data for buffer copies.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::LIGHT_FLOATS;

    #[test]
    fn point_light_new() {
        let light = PointLight::new(Vec3::new(1.0, 2.0, 3.0), [1.0, 0.5, 0.0], 2.0, 500.0);
        assert_eq!(light.pos(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(light.g, 0.5);
        assert_eq!(light.intensity, 2.0);
        assert_eq!(light.range, 500.0);
    }

    #[test]
    fn light_state_respects_capacity() {
        let mut state = LightState::with_capacity(1);
        assert!(state.add(PointLight::new(Vec3::ZERO, [1.0; 3], 1.0, 50.0)));
        assert!(!state.add(PointLight::new(Vec3::ONE, [1.0; 3], 1.0, 50.0)));
        assert_eq!(state.count(), 1);

        state.clear();
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn ambient_defaults_to_unlit_white() {
        let mut state = LightState::new();
        assert_eq!(state.ambient(), AmbientLight::default());
        state.set_ambient([1.0, 1.0, 1.0], 0.3);
        assert_eq!(state.ambient().intensity, 0.3);
    }

    #[test]
    fn point_light_is_8_floats() {
        assert_eq!(std::mem::size_of::<PointLight>(), LIGHT_FLOATS * 4);
    }
}
