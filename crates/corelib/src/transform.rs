use crate::{EulerRot, Mat4, Quat, Vec3};

/// Object placement with a lazily rebuilt world matrix.
///
/// Rotation is stored as Euler angles `(pitch, yaw, roll)` in radians and
/// composed roll first, then pitch, then yaw. A quaternion is built from
/// them whenever an orientation is actually needed.
///
/// Every mutator marks the cached matrices dirty; [`Transform::world_matrix`]
/// rebuilds the world matrix and its inverse-transpose together.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    position: Vec3,
    /// Euler angles in radians: x = pitch, y = yaw, z = roll.
    rotation: Vec3,
    scale: Vec3,
    world: Mat4,
    world_inverse_transpose: Mat4,
    matrix_dirty: bool,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            world: Mat4::IDENTITY,
            world_inverse_transpose: Mat4::IDENTITY,
            matrix_dirty: false,
        }
    }

    /// Transform at `position` with no rotation and unit scale.
    #[inline]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            matrix_dirty: true,
            ..Self::identity()
        }
    }

    #[inline]
    pub fn from_trs(position: Vec3, pitch_yaw_roll: Vec3, scale: Vec3) -> Self {
        Self {
            position,
            rotation: pitch_yaw_roll,
            scale,
            matrix_dirty: true,
            ..Self::identity()
        }
    }

    // Setters

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.matrix_dirty = true;
    }

    pub fn set_rotation(&mut self, pitch_yaw_roll: Vec3) {
        self.rotation = pitch_yaw_roll;
        self.matrix_dirty = true;
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.matrix_dirty = true;
    }

    // Getters

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn pitch_yaw_roll(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// True when a mutation happened since the world matrix was last rebuilt.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.matrix_dirty
    }

    /// Orientation quaternion for the current Euler angles (roll, pitch, yaw order).
    #[inline]
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// World matrix, rebuilt first if any mutation happened since the last read.
    pub fn world_matrix(&mut self) -> Mat4 {
        if self.matrix_dirty {
            self.update_world_matrix();
            self.matrix_dirty = false;
        }
        self.world
    }

    /// Inverse-transpose of the world matrix, for transforming normals.
    ///
    /// Refreshes the cache the same way [`Transform::world_matrix`] does, so
    /// it is never stale regardless of call order.
    pub fn world_inverse_transpose_matrix(&mut self) -> Mat4 {
        if self.matrix_dirty {
            self.update_world_matrix();
            self.matrix_dirty = false;
        }
        self.world_inverse_transpose
    }

    /// Scale, then rotate, then translate.
    fn update_world_matrix(&mut self) {
        let world = Mat4::from_scale_rotation_translation(
            self.scale,
            self.orientation(),
            self.position,
        );
        self.world = world;
        self.world_inverse_transpose = world.transpose().inverse();
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.orientation() * Vec3::X
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.orientation() * Vec3::Y
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::Z
    }

    // Transformers

    /// Offset the position along the world axes.
    pub fn move_absolute(&mut self, offset: Vec3) {
        self.position += offset;
        self.matrix_dirty = true;
    }

    /// Offset the position along the transform's own axes.
    pub fn move_relative(&mut self, offset: Vec3) {
        self.position += self.orientation() * offset;
        self.matrix_dirty = true;
    }

    /// Add to the Euler angles. Angles are not wrapped.
    pub fn rotate(&mut self, pitch_yaw_roll: Vec3) {
        self.rotation += pitch_yaw_roll;
        self.matrix_dirty = true;
    }

    /// Multiply the current scale component-wise.
    pub fn scale_by(&mut self, factors: Vec3) {
        self.scale *= factors;
        self.matrix_dirty = true;
    }

    pub fn scale_uniform(&mut self, factor: f32) {
        self.scale_by(Vec3::splat(factor));
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
