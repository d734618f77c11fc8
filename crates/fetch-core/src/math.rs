//! Thin helpers over `glam` for straight-line motion and facing.

use glam::EulerRot;
pub use glam::{Quat, Vec2, Vec3};

/// Rotation whose forward axis (+Z) points along `direction`, with +Y kept up and no roll.
///
/// Returns `None` for a zero (or non-finite) direction; callers treat that as "keep the current
/// rotation".
pub fn look_rotation(direction: Vec3) -> Option<Quat> {
    let length = direction.length();
    if !length.is_finite() || length <= f32::EPSILON {
        return None;
    }

    let dir = direction / length;
    let yaw = dir.x.atan2(dir.z);
    let pitch = (-dir.y).clamp(-1.0, 1.0).asin();
    Some(Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0))
}

/// Move `current` toward `target` by at most `max_delta`, never past it.
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let to_target = target - current;
    let distance = to_target.length();
    let max_delta = max_delta.max(0.0);

    if distance <= max_delta || distance <= f32::EPSILON {
        return target;
    }

    current + to_target * (max_delta / distance)
}

/// Values a [`crate::Tween`] can blend between.
pub trait Interpolate: Copy {
    /// Blend toward `to`; `t` is clamped to `[0, 1]` by the caller.
    fn interpolate(self, to: Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Interpolate for Vec2 {
    fn interpolate(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

impl Interpolate for Vec3 {
    fn interpolate(self, to: Self, t: f32) -> Self {
        self.lerp(to, t)
    }
}

impl Interpolate for Quat {
    fn interpolate(self, to: Self, t: f32) -> Self {
        self.slerp(to, t)
    }
}
