//! Procedural head look: turn toward a tapped point, hold, turn back.
//!
//! Purely cosmetic and independent of the fetch task. While a look is running the animator is
//! disabled so it does not fight over the head bone.

use fetch_core::{look_rotation, ConfigError, HeadLookConfig, Quat, Tween, TweenStep, Vec3};
use tracing::debug;

use crate::Animator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadLookStage {
    Turning(Tween<Quat>),
    Holding { remaining: f32 },
    Returning(Tween<Quat>),
}

#[derive(Debug, Clone)]
pub struct HeadLookController {
    default_rotation: Quat,
    rotation: Quat,
    target: Quat,
    rotation_speed: f32,
    rotation_duration: f32,
    hold_duration: f32,
    stage: Option<HeadLookStage>,
}

impl HeadLookController {
    pub fn new(default_rotation: Quat, config: &HeadLookConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            default_rotation,
            rotation: default_rotation,
            target: default_rotation,
            rotation_speed: config.rotation_speed,
            rotation_duration: config.rotation_duration,
            hold_duration: config.hold_duration,
            stage: None,
        })
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn default_rotation(&self) -> Quat {
        self.default_rotation
    }

    pub fn stage(&self) -> Option<HeadLookStage> {
        self.stage
    }

    pub fn is_active(&self) -> bool {
        self.stage.is_some()
    }

    /// Start looking from `head` toward `point`, replacing any look in progress.
    ///
    /// Returns false (and changes nothing) when the two points coincide.
    pub fn look_at(
        &mut self,
        head: Vec3,
        point: Vec3,
        animator: Option<&mut dyn Animator>,
    ) -> bool {
        let Some(target) = look_rotation(point - head) else {
            return false;
        };

        if let Some(animator) = animator {
            animator.set_enabled(false);
        }
        self.target = target;
        self.stage = Some(HeadLookStage::Turning(Tween::new(
            self.default_rotation,
            target,
            self.rotation_duration,
        )));
        debug!("head look started");
        true
    }

    /// Advance the running look. Returns true on the tick it completes.
    pub fn tick(&mut self, dt: f32, animator: Option<&mut dyn Animator>) -> bool {
        let Some(stage) = self.stage.as_mut() else {
            return false;
        };
        let dt = dt.max(0.0);

        match stage {
            HeadLookStage::Turning(tween) => {
                let step = tween.advance(dt * self.rotation_speed);
                self.rotation = step.value();
                if step.is_finished() {
                    *stage = HeadLookStage::Holding {
                        remaining: self.hold_duration,
                    };
                }
                false
            }
            HeadLookStage::Holding { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    *stage = HeadLookStage::Returning(Tween::new(
                        self.target,
                        self.default_rotation,
                        self.rotation_duration,
                    ));
                }
                false
            }
            HeadLookStage::Returning(tween) => match tween.advance(dt * self.rotation_speed) {
                TweenStep::Running(rotation) => {
                    self.rotation = rotation;
                    false
                }
                TweenStep::Finished(rotation) => {
                    self.rotation = rotation;
                    self.finish(animator);
                    true
                }
            },
        }
    }

    /// Drop the running look and snap back to the default rotation.
    pub fn cancel(&mut self, animator: Option<&mut dyn Animator>) {
        if self.stage.is_some() {
            self.rotation = self.default_rotation;
            self.finish(animator);
        }
    }

    fn finish(&mut self, animator: Option<&mut dyn Animator>) {
        self.stage = None;
        if let Some(animator) = animator {
            animator.set_enabled(true);
        }
        debug!("head look finished");
    }
}
