use crate::components::entity::Entity;
use crate::renderer::camera::Camera3D;
use crate::renderer::sdf_instance::{SDFBuffer, SDFInstance};

/// Build the SDF instance buffer from entities with mesh components.
///
/// Each sphere is projected through `camera`; its radius is converted to
/// pixels at its depth. Spheres outside the clip range are skipped, at most
/// `max_instances` are kept, and the result is sorted back to front.
pub fn build_sdf_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    camera: &Camera3D,
    buffer: &mut SDFBuffer,
    max_instances: usize,
) {
    buffer.clear();
    for entity in entities {
        if buffer.instance_count() >= max_instances {
            log::warn!("SDF budget of {} instances exhausted", max_instances);
            break;
        }
        if !entity.active {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };
        let Some(proj) = camera.project(entity.pos) else {
            continue;
        };
        buffer.push(SDFInstance {
            x: proj.pos.x,
            y: proj.pos.y,
            radius: mesh.radius() * entity.scale * proj.scale,
            depth: proj.depth,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            shininess: mesh.shininess,
            emissive: mesh.emissive,
            world_x: entity.pos.x,
            world_y: entity.pos.y,
            world_z: entity.pos.z,
        });
    }
    buffer.sort_back_to_front();
}
