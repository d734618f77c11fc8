use fetch_core::{look_rotation, Quat, Ray, ScreenProjector, Tween, Vec2, Vec3};
use tracing::debug;

use crate::CameraConfig;

/// Perspective camera with the screen origin at the bottom-left.
///
/// The pose can glide to a new transform with [`PinholeCamera::move_to`]; the owner advances the
/// glide with [`PinholeCamera::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinholeCamera {
    position: Vec3,
    rotation: Quat,
    tan_half_fov: f32,
    viewport: Vec2,
    glide: Option<CameraGlide>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CameraGlide {
    position: Tween<Vec3>,
    rotation: Tween<Quat>,
}

impl PinholeCamera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            rotation: look_rotation(config.look_at - config.position).unwrap_or(Quat::IDENTITY),
            tan_half_fov: (config.fov_degrees.to_radians() * 0.5).tan(),
            viewport: config.viewport,
            glide: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    pub fn is_moving(&self) -> bool {
        self.glide.is_some()
    }

    /// Where the running glide ends, if any.
    pub fn move_target(&self) -> Option<(Vec3, Quat)> {
        self.glide
            .map(|glide| (glide.position.target(), glide.rotation.target()))
    }

    /// Start gliding from the current pose to `position`/`rotation` over `duration` seconds,
    /// replacing any glide in progress. A non-positive duration snaps on the next tick.
    pub fn move_to(&mut self, position: Vec3, rotation: Quat, duration: f32) {
        debug!(x = position.x, y = position.y, z = position.z, duration, "camera move");
        self.glide = Some(CameraGlide {
            position: Tween::new(self.position, position, duration),
            rotation: Tween::new(self.rotation, rotation, duration),
        });
    }

    /// [`PinholeCamera::move_to`] facing `look_at` from `position`. A degenerate direction keeps
    /// the current rotation.
    pub fn move_to_look_at(&mut self, position: Vec3, look_at: Vec3, duration: f32) {
        let rotation = look_rotation(look_at - position).unwrap_or(self.rotation);
        self.move_to(position, rotation, duration);
    }

    pub fn cancel_move(&mut self) {
        self.glide = None;
    }

    /// Advance a running glide. Returns whether it is still running.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(glide) = self.glide.as_mut() else {
            return false;
        };
        let position = glide.position.advance(dt);
        let rotation = glide.rotation.advance(dt);
        self.position = position.value();
        self.rotation = rotation.value();

        if position.is_finished() && rotation.is_finished() {
            self.glide = None;
            return false;
        }
        true
    }

    fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// Inverse of [`ScreenProjector::screen_point_to_ray`]. `None` behind the camera.
    pub fn world_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let local = self.rotation.inverse() * (point - self.position);
        if local.z <= f32::EPSILON {
            return None;
        }
        let ndc = Vec2::new(
            local.x / (local.z * self.aspect() * self.tan_half_fov),
            local.y / (local.z * self.tan_half_fov),
        );
        Some((ndc + Vec2::ONE) * 0.5 * self.viewport)
    }
}

impl ScreenProjector for PinholeCamera {
    fn screen_point_to_ray(&self, screen: Vec2) -> Ray {
        let ndc = screen / self.viewport * 2.0 - Vec2::ONE;
        let local = Vec3::new(
            ndc.x * self.aspect() * self.tan_half_fov,
            ndc.y * self.tan_half_fov,
            1.0,
        );
        Ray::new(self.position, self.rotation * local)
    }
}
