/// Flat frame buffer layout shared with the JS side.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 24 floats]
/// [SDF instances: max_sdf_instances × 12 floats]
/// [Vectors: max_vector_vertices × 6 floats]   baked backdrop first, then dynamic
/// [Stars: max_star_points × 8 floats]
/// [Events: max_events × 4 floats]
/// [Lights: max_lights × 8 floats]
/// ```
///
/// Capacities are written into the header on every frame so the reader can
/// compute offsets without a separate handshake.

use crate::api::game::GameConfig;
use crate::error::ProtocolError;
use crate::renderer::traits::FrameData;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 24;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PROTOCOL_VERSION: usize = 2;
pub const HEADER_VIEWPORT_WIDTH: usize = 3;
pub const HEADER_VIEWPORT_HEIGHT: usize = 4;
pub const HEADER_MAX_SDF_INSTANCES: usize = 5;
pub const HEADER_SDF_INSTANCE_COUNT: usize = 6;
pub const HEADER_MAX_VECTOR_VERTICES: usize = 7;
pub const HEADER_BAKED_VECTOR_COUNT: usize = 8;
pub const HEADER_DYNAMIC_VECTOR_COUNT: usize = 9;
pub const HEADER_MAX_STAR_POINTS: usize = 10;
pub const HEADER_STAR_POINT_COUNT: usize = 11;
pub const HEADER_MAX_EVENTS: usize = 12;
pub const HEADER_EVENT_COUNT: usize = 13;
pub const HEADER_MAX_LIGHTS: usize = 14;
pub const HEADER_LIGHT_COUNT: usize = 15;
pub const HEADER_BAKE_GENERATION: usize = 16;
/// Ambient r, g, b, intensity occupy four consecutive slots.
pub const HEADER_AMBIENT: usize = 17;
pub const HEADER_ELAPSED: usize = 21;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per SDF instance: x, y, radius, depth, r, g, b, shininess, emissive, world xyz.
pub const SDF_INSTANCE_FLOATS: usize = 12;

/// Floats per vector vertex: x, y, r, g, b, a.
pub const VECTOR_VERTEX_FLOATS: usize = 6;

/// Floats per star point: x, y, size, depth, r, g, b, a.
pub const STAR_POINT_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Floats per point light: x, y, z, r, g, b, intensity, range.
pub const LIGHT_FLOATS: usize = 8;

pub const DEFAULT_MAX_LIGHTS: usize = 8;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_sdf_instances: usize,
    pub max_vector_vertices: usize,
    pub max_star_points: usize,
    pub max_events: usize,
    pub max_lights: usize,

    /// Offset (in floats) where SDF data begins.
    pub sdf_data_offset: usize,
    /// Offset (in floats) where vector data begins.
    pub vector_data_offset: usize,
    /// Offset (in floats) where star data begins.
    pub star_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,
    /// Offset (in floats) where light data begins.
    pub light_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_sdf_instances: usize,
        max_vector_vertices: usize,
        max_star_points: usize,
        max_events: usize,
        max_lights: usize,
    ) -> Self {
        let sdf_data_offset = HEADER_FLOATS;
        let vector_data_offset = sdf_data_offset + max_sdf_instances * SDF_INSTANCE_FLOATS;
        let star_data_offset = vector_data_offset + max_vector_vertices * VECTOR_VERTEX_FLOATS;
        let event_data_offset = star_data_offset + max_star_points * STAR_POINT_FLOATS;
        let light_data_offset = event_data_offset + max_events * EVENT_FLOATS;
        let buffer_total_floats = light_data_offset + max_lights * LIGHT_FLOATS;

        Self {
            max_sdf_instances,
            max_vector_vertices,
            max_star_points,
            max_events,
            max_lights,
            sdf_data_offset,
            vector_data_offset,
            star_data_offset,
            event_data_offset,
            light_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_sdf_instances,
            config.max_vector_vertices,
            config.max_star_points,
            config.max_events,
            config.max_lights,
        )
    }

    /// Pack a frame into `buf`. Every section is truncated to its capacity;
    /// the header carries the counts actually written.
    pub fn write_frame(&self, frame: &FrameData, buf: &mut [f32]) -> Result<(), ProtocolError> {
        if buf.len() != self.buffer_total_floats {
            return Err(ProtocolError::BufferSize {
                expected: self.buffer_total_floats,
                actual: buf.len(),
            });
        }

        let sdf = &frame.sdf_instances[..frame.sdf_instances.len().min(self.max_sdf_instances)];
        let baked = &frame.backdrop_vertices[..frame.backdrop_vertices.len().min(self.max_vector_vertices)];
        let dynamic_room = self.max_vector_vertices - baked.len();
        let dynamic = &frame.vector_vertices[..frame.vector_vertices.len().min(dynamic_room)];
        let stars = &frame.stars[..frame.stars.len().min(self.max_star_points)];
        let events = &frame.events[..frame.events.len().min(self.max_events)];
        let lights = &frame.lights[..frame.lights.len().min(self.max_lights)];

        let header = &mut buf[..HEADER_FLOATS];
        header.fill(0.0);
        header[HEADER_FRAME_COUNTER] = frame.frame_index as f32;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_VIEWPORT_WIDTH] = frame.viewport_width;
        header[HEADER_VIEWPORT_HEIGHT] = frame.viewport_height;
        header[HEADER_MAX_SDF_INSTANCES] = self.max_sdf_instances as f32;
        header[HEADER_SDF_INSTANCE_COUNT] = sdf.len() as f32;
        header[HEADER_MAX_VECTOR_VERTICES] = self.max_vector_vertices as f32;
        header[HEADER_BAKED_VECTOR_COUNT] = baked.len() as f32;
        header[HEADER_DYNAMIC_VECTOR_COUNT] = dynamic.len() as f32;
        header[HEADER_MAX_STAR_POINTS] = self.max_star_points as f32;
        header[HEADER_STAR_POINT_COUNT] = stars.len() as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = events.len() as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_LIGHT_COUNT] = lights.len() as f32;
        header[HEADER_BAKE_GENERATION] = frame.bake_state.generation as f32;
        let ambient = frame.ambient;
        header[HEADER_AMBIENT..HEADER_AMBIENT + 4]
            .copy_from_slice(&[ambient.r, ambient.g, ambient.b, ambient.intensity]);
        header[HEADER_ELAPSED] = frame.elapsed as f32;

        copy_section(buf, self.sdf_data_offset, bytemuck::cast_slice(sdf));
        let baked_floats: &[f32] = bytemuck::cast_slice(baked);
        copy_section(buf, self.vector_data_offset, baked_floats);
        copy_section(buf, self.vector_data_offset + baked_floats.len(), bytemuck::cast_slice(dynamic));
        copy_section(buf, self.star_data_offset, bytemuck::cast_slice(stars));
        copy_section(buf, self.event_data_offset, bytemuck::cast_slice(events));
        copy_section(buf, self.light_data_offset, bytemuck::cast_slice(lights));
        Ok(())
    }
}

fn copy_section(buf: &mut [f32], offset: usize, data: &[f32]) {
    buf[offset..offset + data.len()].copy_from_slice(data);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameEvent;
    use crate::renderer::camera::Camera3D;
    use crate::renderer::point_instance::PointInstance;
    use crate::renderer::sdf_instance::SDFInstance;
    use crate::renderer::traits::BakeState;
    use crate::systems::lighting::{AmbientLight, PointLight};
    use crate::systems::vector::VectorVertex;

    fn frame<'a>(
        sdf: &'a [SDFInstance],
        baked: &'a [VectorVertex],
        stars: &'a [PointInstance],
        events: &'a [GameEvent],
        lights: &'a [PointLight],
    ) -> FrameData<'a> {
        FrameData {
            frame_index: 9,
            elapsed: 2.5,
            sdf_instances: sdf,
            backdrop_vertices: baked,
            vector_vertices: &[],
            stars,
            bake_state: BakeState { generation: 2 },
            ambient: AmbientLight { r: 1.0, g: 1.0, b: 1.0, intensity: 0.3 },
            lights,
            camera: Camera3D::default().uniform(),
            viewport_width: 800.0,
            viewport_height: 600.0,
            events,
        }
    }

    #[test]
    fn from_default_config() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());
        assert_eq!(layout.max_sdf_instances, 128);
        assert_eq!(layout.max_vector_vertices, 16384);
        assert_eq!(layout.max_star_points, 10_000);
        assert_eq!(layout.max_events, 32);
        assert_eq!(layout.max_lights, DEFAULT_MAX_LIGHTS);
        assert_eq!(layout.sdf_data_offset, HEADER_FLOATS);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 20, 30, 4, 2);
        assert_eq!(layout.vector_data_offset, HEADER_FLOATS + 10 * 12);
        assert_eq!(layout.star_data_offset, layout.vector_data_offset + 20 * 6);
        assert_eq!(layout.event_data_offset, layout.star_data_offset + 30 * 8);
        assert_eq!(layout.light_data_offset, layout.event_data_offset + 4 * 4);
        assert_eq!(layout.buffer_total_floats, layout.light_data_offset + 2 * 8);
    }

    #[test]
    fn header_fits_ambient_and_elapsed() {
        assert!(HEADER_AMBIENT + 4 <= HEADER_ELAPSED);
        assert!(HEADER_ELAPSED < HEADER_FLOATS);
    }

    #[test]
    fn write_frame_packs_sections() {
        let layout = ProtocolLayout::new(4, 8, 4, 2, 1);
        let sdf = [SDFInstance { x: 11.0, radius: 3.0, ..Default::default() }];
        let baked = [VectorVertex { x: 5.0, a: 1.0, ..Default::default() }; 3];
        let stars = [PointInstance { x: 7.0, size: 1.0, ..Default::default() }];
        let events = [GameEvent::new(1.0, 2.0, 3.0, 4.0)];
        let lights = [PointLight { intensity: 2.0, range: 500.0, ..Default::default() }];
        let frame = frame(&sdf, &baked, &stars, &events, &lights);

        let mut buf = vec![0.0; layout.buffer_total_floats];
        layout.write_frame(&frame, &mut buf).unwrap();

        assert_eq!(buf[HEADER_FRAME_COUNTER], 9.0);
        assert_eq!(buf[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(buf[HEADER_SDF_INSTANCE_COUNT], 1.0);
        assert_eq!(buf[HEADER_BAKED_VECTOR_COUNT], 3.0);
        assert_eq!(buf[HEADER_DYNAMIC_VECTOR_COUNT], 0.0);
        assert_eq!(buf[HEADER_STAR_POINT_COUNT], 1.0);
        assert_eq!(buf[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(buf[HEADER_LIGHT_COUNT], 1.0);
        assert_eq!(buf[HEADER_BAKE_GENERATION], 2.0);
        assert_eq!(buf[HEADER_AMBIENT + 3], 0.3);
        assert_eq!(buf[HEADER_ELAPSED], 2.5);

        assert_eq!(buf[layout.sdf_data_offset], 11.0);
        assert_eq!(buf[layout.sdf_data_offset + 2], 3.0);
        assert_eq!(buf[layout.vector_data_offset], 5.0);
        assert_eq!(buf[layout.star_data_offset], 7.0);
        assert_eq!(&buf[layout.event_data_offset..layout.event_data_offset + 4], &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(buf[layout.light_data_offset + 6], 2.0);
        assert_eq!(buf[layout.light_data_offset + 7], 500.0);
    }

    #[test]
    fn write_frame_truncates_to_capacity() {
        let layout = ProtocolLayout::new(1, 2, 1, 1, 0);
        let sdf = [SDFInstance::default(); 3];
        let baked = [VectorVertex::default(); 6];
        let lights = [PointLight::default()];
        let frame = frame(&sdf, &baked, &[], &[], &lights);

        let mut buf = vec![0.0; layout.buffer_total_floats];
        layout.write_frame(&frame, &mut buf).unwrap();
        assert_eq!(buf[HEADER_SDF_INSTANCE_COUNT], 1.0);
        assert_eq!(buf[HEADER_BAKED_VECTOR_COUNT], 2.0);
        assert_eq!(buf[HEADER_LIGHT_COUNT], 0.0);
    }

    #[test]
    fn write_frame_rejects_wrong_buffer() {
        let layout = ProtocolLayout::new(1, 1, 1, 1, 1);
        let frame = frame(&[], &[], &[], &[], &[]);
        let mut buf = vec![0.0; 3];
        let err = layout.write_frame(&frame, &mut buf).unwrap_err();
        assert!(matches!(err, ProtocolError::BufferSize { actual: 3, .. }));
    }
}
