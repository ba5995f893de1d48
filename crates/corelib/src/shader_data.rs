//! Per-draw-call constant block handed to the vertex stage.

use bytemuck::{Pod, Zeroable};

use crate::camera::Camera;
use crate::transform::Transform;
use crate::Vec4;

/// Vertex shader constants for one draw call (16-byte aligned, column-major).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct VertexShaderData {
    pub color_tint: [f32; 4],
    pub world: [[f32; 4]; 4],
    pub world_inverse_transpose: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl VertexShaderData {
    /// Gather one object's matrices plus the camera's cached view/projection.
    pub fn new(tint: Vec4, transform: &mut Transform, camera: &Camera) -> Self {
        let world = transform.world_matrix();
        let world_inverse_transpose = transform.world_inverse_transpose_matrix();
        Self {
            color_tint: tint.to_array(),
            world: world.to_cols_array_2d(),
            world_inverse_transpose: world_inverse_transpose.to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
        }
    }

    /// Constant buffers are sized in 16-byte steps.
    pub const fn buffer_size() -> u64 {
        let size = std::mem::size_of::<Self>() as u64;
        size.div_ceil(16) * 16
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraConfig;
    use crate::{Mat4, vec3};

    #[test]
    fn block_is_sixteen_byte_aligned() {
        assert_eq!(std::mem::size_of::<VertexShaderData>() % 16, 0);
        assert_eq!(
            VertexShaderData::buffer_size(),
            std::mem::size_of::<VertexShaderData>() as u64
        );
    }

    #[test]
    fn carries_camera_and_object_matrices() {
        let camera = Camera::new(CameraConfig::default(), 16.0 / 9.0);
        let mut t = Transform::from_position(vec3(1.0, 2.0, 3.0));
        let data = VertexShaderData::new(Vec4::new(1.0, 0.5, 0.5, 1.0), &mut t, &camera);

        assert_eq!(data.color_tint, [1.0, 0.5, 0.5, 1.0]);
        assert_eq!(Mat4::from_cols_array_2d(&data.world), t.world_matrix());
        assert_eq!(Mat4::from_cols_array_2d(&data.view), camera.view_matrix());
        assert_eq!(
            Mat4::from_cols_array_2d(&data.projection),
            camera.projection_matrix()
        );
        assert_eq!(data.world[3][..3], [1.0, 2.0, 3.0]);
    }

    #[test]
    fn bytes_cover_whole_block() {
        let data = VertexShaderData::zeroed();
        assert_eq!(data.as_bytes().len(), 272);
        assert!(data.as_bytes().iter().all(|b| *b == 0));
    }
}
