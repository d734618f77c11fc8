use fetch_core::{ConfigError, PhysicsBody, ThrowConfig, Vec2, Vec3};
use tracing::{debug, info};

use crate::{ObjectDeliveryTracker, SwipeSample};

/// What a resolved swipe did to the ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowImpulse {
    pub force: Vec3,
    /// Pixels per second, clamped. Reported for tuning only; it does not scale the force.
    pub swipe_speed: f32,
}

/// Maps swipe samples to forces and launches the ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpulseResolver {
    lateral_force_scale: f32,
    depth_force_scale: f32,
    min_swipe_seconds: f32,
    max_swipe_speed: f32,
}

impl ImpulseResolver {
    pub fn new(config: &ThrowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            lateral_force_scale: config.lateral_force_scale,
            depth_force_scale: config.depth_force_scale,
            min_swipe_seconds: config.min_swipe_seconds,
            max_swipe_speed: config.max_swipe_speed,
        })
    }

    pub fn swipe_speed(&self, sample: &SwipeSample) -> f32 {
        let speed = sample.displacement().length() / self.elapsed_of(sample);
        speed.clamp(0.0, self.max_swipe_speed)
    }

    /// Swipe duration floored at `min_swipe_seconds`; hand-built samples may carry zero or NaN.
    fn elapsed_of(&self, sample: &SwipeSample) -> f32 {
        sample.elapsed.max(self.min_swipe_seconds)
    }

    /// Pure swipe-to-force mapping. `None` for a zero-length swipe.
    ///
    /// Lateral force opposes the screen displacement, so dragging up pushes the ball up. Depth
    /// force is inversely proportional to the swipe duration: a quick flick throws further.
    pub fn force_for(&self, sample: &SwipeSample) -> Option<Vec3> {
        let d = sample.displacement();
        if d == Vec2::ZERO {
            return None;
        }
        Some(Vec3::new(
            -d.x * self.lateral_force_scale,
            -d.y * self.lateral_force_scale,
            self.depth_force_scale / self.elapsed_of(sample),
        ))
    }

    /// Apply `sample` to the ball exactly once.
    ///
    /// Returns `None` (and leaves the ball untouched) when the swipe did not move or the ball is
    /// not in a throwable phase, e.g. a second release while it is already flying.
    pub fn resolve<B: PhysicsBody>(
        &self,
        sample: &SwipeSample,
        ball: &mut ObjectDeliveryTracker<B>,
    ) -> Option<ThrowImpulse> {
        if !ball.can_throw() {
            debug!(phase = ?ball.phase(), "throw ignored: ball not throwable");
            return None;
        }
        let force = self.force_for(sample)?;
        let swipe_speed = self.swipe_speed(sample);
        debug!(swipe_speed, "swipe speed");

        ball.launch(force);
        info!(
            fx = force.x,
            fy = force.y,
            fz = force.z,
            elapsed = sample.elapsed,
            "ball thrown"
        );
        Some(ThrowImpulse { force, swipe_speed })
    }
}
