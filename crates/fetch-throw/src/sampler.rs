use fetch_core::{ConfigError, ThrowConfig, Vec2};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::PRIMARY_POINTER;

/// A resolved swipe: where it started and ended on screen and how long it took.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwipeSample {
    pub start: Vec2,
    pub end: Vec2,
    /// Seconds. The sampler floors it to the configured minimum.
    pub elapsed: f32,
    pub pointer: u32,
}

impl SwipeSample {
    /// `start - end`: positive when the finger moved toward the screen origin.
    pub fn displacement(&self) -> Vec2 {
        self.start - self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTouch {
    position: Vec2,
    time: f32,
}

/// Turns primary-pointer down/up pairs into [`SwipeSample`]s.
#[derive(Debug, Clone)]
pub struct GestureSampler {
    min_elapsed: f32,
    pending: Option<PendingTouch>,
}

impl GestureSampler {
    pub fn new(min_elapsed: f32) -> Self {
        Self {
            min_elapsed: min_elapsed.max(f32::EPSILON),
            pending: None,
        }
    }

    pub fn from_config(config: &ThrowConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.min_swipe_seconds))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Record the swipe start. Returns whether it was recorded.
    pub fn on_pointer_down(&mut self, pointer: u32, position: Vec2, time: f32) -> bool {
        if pointer != PRIMARY_POINTER || self.pending.is_some() {
            return false;
        }
        debug!(x = position.x, y = position.y, time, "swipe started");
        self.pending = Some(PendingTouch { position, time });
        true
    }

    /// Close the swipe.
    ///
    /// A primary pointer-up always consumes the pending start, so a rejected release never leaves
    /// a stale start behind. A sample is produced only when `throw_resolved` is false and the
    /// finger actually moved.
    pub fn on_pointer_up(
        &mut self,
        pointer: u32,
        position: Vec2,
        time: f32,
        throw_resolved: bool,
    ) -> Option<SwipeSample> {
        if pointer != PRIMARY_POINTER {
            return None;
        }
        let start = self.pending.take()?;
        if throw_resolved {
            debug!("swipe ignored: throw already resolved");
            return None;
        }

        let sample = SwipeSample {
            start: start.position,
            end: position,
            elapsed: (time - start.time).max(self.min_elapsed),
            pointer,
        };
        if sample.displacement() == Vec2::ZERO {
            debug!("swipe ignored: no movement");
            return None;
        }
        Some(sample)
    }
}

impl Default for GestureSampler {
    fn default() -> Self {
        Self::new(ThrowConfig::default().min_swipe_seconds)
    }
}
