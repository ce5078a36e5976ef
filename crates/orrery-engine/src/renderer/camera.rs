use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::api::game::CameraConfig;

/// Projection of a world point onto the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Viewport position in pixels, origin top-left, Y down.
    pub pos: Vec2,
    /// Distance in front of the camera along the view axis.
    pub depth: f32,
    /// Pixels per world unit at this depth.
    pub scale: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Perspective camera looking at a fixed target.
///
/// Every change that alters where world points land on screen bumps
/// `generation`, which the backdrop bake uses to decide when to re-project.
#[derive(Debug, Clone)]
pub struct Camera3D {
    eye: Vec3,
    target: Vec3,
    /// Vertical field of view in radians.
    fov_y: f32,
    near: f32,
    far: f32,
    viewport: Vec2,
    generation: u64,
}

impl Camera3D {
    pub fn new(eye: Vec3, target: Vec3, fov_y_degrees: f32, near: f32, far: f32, viewport: Vec2) -> Self {
        Self {
            eye,
            target,
            fov_y: fov_y_degrees.to_radians(),
            near,
            far,
            viewport,
            generation: 0,
        }
    }

    pub fn from_config(config: &CameraConfig, width: f32, height: f32) -> Self {
        Self::new(
            Vec3::from_array(config.position),
            Vec3::from_array(config.target),
            config.fov_y_degrees,
            config.near,
            config.far,
            Vec2::new(width, height),
        )
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Bumped on every change to the view or projection.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Resize the viewport. Returns false (and keeps the generation) when
    /// the size is unchanged or not positive.
    pub fn set_viewport(&mut self, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        let size = Vec2::new(width, height);
        if size == self.viewport {
            return false;
        }
        self.viewport = size;
        self.generation += 1;
        true
    }

    /// Up vector for the current view direction. Falls back to +Z when
    /// looking straight along the Y axis.
    fn up(&self) -> Vec3 {
        let forward = (self.target - self.eye).normalize_or_zero();
        if forward.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            Vec3::Y
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
        }
    }

    /// Distance from the eye to the image plane, in pixels.
    fn focal_length_px(&self) -> f32 {
        0.5 * self.viewport.y / (0.5 * self.fov_y).tan()
    }

    /// Project a world point. Points outside the near/far range are not visible.
    pub fn project(&self, world: Vec3) -> Option<Projection> {
        let view = self.view_matrix().transform_point3(world);
        let depth = -view.z;
        if depth < self.near || depth > self.far {
            return None;
        }
        let clip = self.projection_matrix() * view.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        let pos = Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        );
        Some(Projection {
            pos,
            depth,
            scale: self.focal_length_px() / depth,
        })
    }
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 800.0, 600.0)
    }
}
