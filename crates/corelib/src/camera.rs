use std::f32::consts::PI;

use crate::error::{CoreError, CoreResult};
use crate::input::{InputState, Key};
use crate::transform::Transform;
use crate::{Mat4, Vec3, vec3};

/// Pitch limit in radians, just short of straight up/down.
pub const PITCH_LIMIT: f32 = 1.57;

/// Projection shape used by a [`Camera`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective,
    /// Parallel projection covering `view_height` world units vertically;
    /// the width follows the aspect ratio.
    Orthographic { view_height: f32 },
}

/// Construction parameters for a [`Camera`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// World units per second.
    pub movement_speed: f32,
    /// Radians per pixel of mouse travel.
    pub mouse_look_speed: f32,
    pub projection: Projection,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: vec3(0.0, 0.0, -5.0),
            fov: PI / 3.0,
            near: 0.01,
            far: 1000.0,
            movement_speed: 3.0,
            mouse_look_speed: 0.005,
            projection: Projection::Perspective,
        }
    }
}

impl CameraConfig {
    /// Check that the parameters describe a usable projection.
    ///
    /// [`Camera::new`] never calls this; degenerate values are accepted there
    /// and simply produce a degenerate projection matrix.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(CoreError::InvalidClipPlanes {
                near: self.near,
                far: self.far,
            });
        }
        match self.projection {
            Projection::Perspective if !(self.fov > 0.0 && self.fov < PI) => {
                Err(CoreError::InvalidFov(self.fov))
            }
            Projection::Orthographic { view_height } if !(view_height > 0.0) => {
                Err(CoreError::InvalidViewHeight(view_height))
            }
            _ => Ok(()),
        }
    }
}

/// Free-fly camera (left-handed, +Z forward, +Y up).
///
/// Owns its own [`Transform`]. The view matrix is rebuilt on every
/// [`Camera::update`]; the projection matrix only when the aspect ratio is
/// handed in again through [`Camera::update_projection_matrix`].
#[derive(Clone, Debug)]
pub struct Camera {
    transform: Transform,
    view: Mat4,
    proj: Mat4,
    fov: f32,
    near: f32,
    far: f32,
    aspect_ratio: f32,
    movement_speed: f32,
    mouse_look_speed: f32,
    projection: Projection,
}

impl Camera {
    pub fn new(config: CameraConfig, aspect_ratio: f32) -> Self {
        let mut camera = Self {
            transform: Transform::from_position(config.position),
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
            fov: config.fov,
            near: config.near,
            far: config.far,
            aspect_ratio,
            movement_speed: config.movement_speed,
            mouse_look_speed: config.mouse_look_speed,
            projection: config.projection,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix(aspect_ratio);
        camera
    }

    /// Look along the transform's forward axis with world +Y as up.
    pub fn update_view_matrix(&mut self) {
        self.view = Mat4::look_to_lh(
            self.transform.position(),
            self.transform.forward(),
            Vec3::Y,
        );
    }

    pub fn update_projection_matrix(&mut self, aspect_ratio: f32) {
        if !aspect_ratio.is_finite() || aspect_ratio <= 0.0 {
            log::warn!("Degenerate aspect ratio {aspect_ratio}; projection will be invalid");
        }
        self.aspect_ratio = aspect_ratio;
        self.proj = match self.projection {
            Projection::Perspective => {
                Mat4::perspective_lh(self.fov, aspect_ratio, self.near, self.far)
            }
            Projection::Orthographic { view_height } => {
                let half_h = view_height * 0.5;
                let half_w = half_h * aspect_ratio;
                Mat4::orthographic_lh(-half_w, half_w, -half_h, half_h, self.near, self.far)
            }
        };
        log::debug!(
            "Projection rebuilt: {:?}, aspect={:.3}",
            self.projection,
            aspect_ratio
        );
    }

    /// Per-frame step: keyboard movement, mouse look while the primary button
    /// is held, then a view matrix rebuild.
    ///
    /// Opposite keys do not cancel; the first one checked wins
    /// (forward over backward, left over right, up over down).
    pub fn update(&mut self, input: &impl InputState, dt: f32) {
        let step = dt * self.movement_speed;

        if input.key_down(Key::Forward) {
            self.transform.move_relative(vec3(0.0, 0.0, step));
        } else if input.key_down(Key::Backward) {
            self.transform.move_relative(vec3(0.0, 0.0, -step));
        }
        if input.key_down(Key::Left) {
            self.transform.move_relative(vec3(-step, 0.0, 0.0));
        } else if input.key_down(Key::Right) {
            self.transform.move_relative(vec3(step, 0.0, 0.0));
        }
        if input.key_down(Key::Up) {
            self.transform.move_absolute(vec3(0.0, step, 0.0));
        } else if input.key_down(Key::Down) {
            self.transform.move_absolute(vec3(0.0, -step, 0.0));
        }

        if input.mouse_left_down() {
            let delta = input.mouse_delta() * self.mouse_look_speed;
            self.transform.rotate(vec3(delta.y, delta.x, 0.0));

            let mut rotation = self.transform.pitch_yaw_roll();
            rotation.x = rotation.x.clamp(-PITCH_LIMIT, PITCH_LIMIT);
            self.transform.set_rotation(rotation);
        }

        self.update_view_matrix();
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.proj
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.proj * self.view
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    #[inline]
    pub fn fov(&self) -> f32 {
        self.fov
    }

    #[inline]
    pub fn near(&self) -> f32 {
        self.near
    }

    #[inline]
    pub fn far(&self) -> f32 {
        self.far
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    #[inline]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    #[inline]
    pub fn is_perspective(&self) -> bool {
        matches!(self.projection, Projection::Perspective)
    }

    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputSnapshot;
    use crate::{Vec2, Vec4};
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    fn at_origin() -> CameraConfig {
        CameraConfig {
            position: Vec3::ZERO,
            movement_speed: 2.0,
            mouse_look_speed: 0.01,
            ..CameraConfig::default()
        }
    }

    #[test]
    fn perspective_matches_closed_form() {
        let config = CameraConfig {
            fov: FRAC_PI_2,
            near: 0.1,
            far: 100.0,
            ..CameraConfig::default()
        };
        let cam = Camera::new(config, 1.0);

        let h = 1.0 / (FRAC_PI_2 * 0.5).tan();
        let w = h / 1.0;
        let r = 100.0 / (100.0 - 0.1);
        let expected = Mat4::from_cols(
            Vec4::new(w, 0.0, 0.0, 0.0),
            Vec4::new(0.0, h, 0.0, 0.0),
            Vec4::new(0.0, 0.0, r, 1.0),
            Vec4::new(0.0, 0.0, -r * 0.1, 0.0),
        );
        assert!(cam.projection_matrix().abs_diff_eq(expected, EPS));
    }

    #[test]
    fn holding_forward_moves_along_positive_z() {
        let mut cam = Camera::new(at_origin(), 1.0);
        let input = InputSnapshot::new().with_key(Key::Forward);
        cam.update(&input, 1.0);
        assert!(cam.position().abs_diff_eq(vec3(0.0, 0.0, 2.0), EPS));
    }

    #[test]
    fn first_checked_key_wins() {
        let mut cam = Camera::new(at_origin(), 1.0);
        let input = InputSnapshot::new()
            .with_key(Key::Forward)
            .with_key(Key::Backward)
            .with_key(Key::Left)
            .with_key(Key::Right)
            .with_key(Key::Up)
            .with_key(Key::Down);
        cam.update(&input, 0.5);
        assert!(cam.position().abs_diff_eq(vec3(-1.0, 1.0, 1.0), EPS));
    }

    #[test]
    fn vertical_movement_ignores_orientation() {
        let mut cam = Camera::new(at_origin(), 1.0);
        let look = InputSnapshot::new().with_mouse_drag(Vec2::new(0.0, 100.0));
        cam.update(&look, 0.0);
        assert!(cam.transform().pitch_yaw_roll().x > 0.9);

        cam.update(&InputSnapshot::new().with_key(Key::Up), 1.0);
        assert!(cam.position().abs_diff_eq(vec3(0.0, 2.0, 0.0), EPS));
    }

    #[test]
    fn strafe_follows_yaw() {
        let mut cam = Camera::new(at_origin(), 1.0);
        let turn = InputSnapshot::new().with_mouse_drag(Vec2::new(FRAC_PI_2 / 0.01, 0.0));
        cam.update(&turn, 0.0);

        cam.update(&InputSnapshot::new().with_key(Key::Right), 1.0);
        assert!(cam.position().abs_diff_eq(vec3(0.0, 0.0, -2.0), 1e-4));
    }

    #[test]
    fn mouse_motion_without_button_is_ignored() {
        let mut cam = Camera::new(at_origin(), 1.0);
        let before = cam.view_matrix();
        let input = InputSnapshot::new().with_mouse_delta(Vec2::new(40.0, -25.0));
        cam.update(&input, 0.016);
        assert_eq!(cam.transform().pitch_yaw_roll(), Vec3::ZERO);
        assert_eq!(cam.view_matrix(), before);
    }

    #[test]
    fn mouse_drag_maps_x_to_yaw_and_y_to_pitch() {
        let mut cam = Camera::new(at_origin(), 1.0);
        let input = InputSnapshot::new().with_mouse_drag(Vec2::new(10.0, 20.0));
        cam.update(&input, 0.016);
        let pyr = cam.transform().pitch_yaw_roll();
        assert!((pyr.x - 0.2).abs() < EPS);
        assert!((pyr.y - 0.1).abs() < EPS);
        assert_eq!(pyr.z, 0.0);
    }

    #[test]
    fn pitch_stays_clamped_under_any_drag_sequence() {
        let mut cam = Camera::new(at_origin(), 1.0);
        let deltas = [
            500.0, 500.0, -20.0, 3000.0, -9000.0, 40.0, -1.0, 12000.0, -300.0, 7.5,
        ];
        for (i, dy) in deltas.into_iter().enumerate() {
            let input = InputSnapshot::new().with_mouse_drag(Vec2::new(i as f32 * 50.0, dy));
            cam.update(&input, 0.016);
            let pitch = cam.transform().pitch_yaw_roll().x;
            assert!((-PITCH_LIMIT..=PITCH_LIMIT).contains(&pitch), "pitch {pitch}");
        }
    }

    #[test]
    fn yaw_is_not_clamped() {
        let mut cam = Camera::new(at_origin(), 1.0);
        let input = InputSnapshot::new().with_mouse_drag(Vec2::new(1000.0, 0.0));
        cam.update(&input, 0.016);
        assert!((cam.transform().pitch_yaw_roll().y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let config = CameraConfig {
            position: vec3(3.0, -1.0, 7.0),
            ..CameraConfig::default()
        };
        let cam = Camera::new(config, 16.0 / 9.0);
        let eye_in_view = cam.view_matrix().transform_point3(cam.position());
        assert!(eye_in_view.abs_diff_eq(Vec3::ZERO, 1e-4));

        // A point straight ahead lands on +Z in view space.
        let ahead = cam.view_matrix().transform_point3(cam.position() + Vec3::Z * 4.0);
        assert!(ahead.abs_diff_eq(vec3(0.0, 0.0, 4.0), 1e-4));
    }

    #[test]
    fn update_rebuilds_view_even_without_input() {
        let mut cam = Camera::new(at_origin(), 1.0);
        let before = cam.view_matrix();
        cam.update(&InputSnapshot::new(), 0.016);
        assert_eq!(cam.view_matrix(), before);
    }

    #[test]
    fn aspect_change_rebuilds_projection_only() {
        let mut cam = Camera::new(at_origin(), 1.0);
        let view = cam.view_matrix();
        let proj = cam.projection_matrix();
        cam.update_projection_matrix(2.0);
        assert_eq!(cam.view_matrix(), view);
        assert_ne!(cam.projection_matrix(), proj);
        assert!((cam.projection_matrix().x_axis.x * 2.0 - proj.x_axis.x).abs() < EPS);
        assert_eq!(cam.aspect_ratio(), 2.0);
    }

    #[test]
    fn orthographic_covers_view_height() {
        let config = CameraConfig {
            position: Vec3::ZERO,
            near: 0.1,
            far: 10.0,
            projection: Projection::Orthographic { view_height: 4.0 },
            ..CameraConfig::default()
        };
        let cam = Camera::new(config, 2.0);
        assert!(!cam.is_perspective());

        let corner = cam.view_projection().project_point3(vec3(4.0, 2.0, 5.0));
        assert!((corner.x - 1.0).abs() < EPS);
        assert!((corner.y - 1.0).abs() < EPS);
    }

    #[test]
    fn default_config_validates() {
        assert!(CameraConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_far_not_beyond_near() {
        let config = CameraConfig {
            near: 5.0,
            far: 5.0,
            ..CameraConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidClipPlanes { .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_fov_and_view_height() {
        let wide = CameraConfig {
            fov: PI,
            ..CameraConfig::default()
        };
        assert!(matches!(wide.validate(), Err(CoreError::InvalidFov(_))));

        let flat = CameraConfig {
            projection: Projection::Orthographic { view_height: 0.0 },
            ..CameraConfig::default()
        };
        assert!(matches!(flat.validate(), Err(CoreError::InvalidViewHeight(_))));
    }

    #[test]
    fn degenerate_clip_planes_are_accepted() {
        let config = CameraConfig {
            near: 1.0,
            far: 1.0,
            ..CameraConfig::default()
        };
        let cam = Camera::new(config, 1.0);
        assert!(!cam.projection_matrix().is_finite());
    }
}
