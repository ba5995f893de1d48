//! Core types: math re-exports, Transform, Camera, input interface, tiny ECS.

pub use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4, vec3};

pub mod camera;
pub mod ecs;
pub mod error;
pub mod input;
pub mod shader_data;
pub mod transform;

pub use camera::{Camera, CameraConfig, PITCH_LIMIT, Projection};
pub use error::{CoreError, CoreResult};
pub use input::{InputSnapshot, InputState, Key};
pub use shader_data::VertexShaderData;
pub use transform::Transform;
