//! Tuning configuration, fixed at setup and loaded from YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_positive};
use crate::{ConfigError, Vec3};

/// All tuning for one fetch session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub agent: AgentConfig,
    pub throw: ThrowConfig,
    pub ball: BallConfig,
    pub animation: AnimationConfig,
    pub head_look: HeadLookConfig,
}

/// Agent placement, arrival thresholds and movement caps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Where the agent sits at startup; captured once as its home.
    pub start_position: Vec3,

    /// Where the ball is brought back to. Required.
    pub delivery_point: Option<Vec3>,

    /// Distance within which the agent can grab the ball
    pub catch_range: f32,

    /// Distance to the delivery point that counts as delivered
    pub deliver_range: f32,

    /// Distance to home that counts as back
    pub return_range: f32,

    /// Crawl speed per unit of remaining distance
    pub acceleration: f32,

    /// Crawl speed cap
    pub max_speed: f32,

    /// Fraction of the remaining turn applied per second
    pub rotation_speed: f32,

    /// Hand frame, local to the agent
    pub hand_offset: Vec3,

    /// Head pivot, local to the agent
    pub head_offset: Vec3,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(0.0, 0.0, 7.0),
            delivery_point: Some(Vec3::new(0.0, 0.0, 1.5)),
            catch_range: 1.0,
            deliver_range: 1.0,
            return_range: 2.0,
            acceleration: 1.0,
            max_speed: 5.0,
            rotation_speed: 5.0,
            hand_offset: Vec3::new(0.0, 0.3, 0.35),
            head_offset: Vec3::new(0.0, 0.55, 0.1),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_finite("agent.start_position", self.start_position)?;
        let delivery = self
            .delivery_point
            .ok_or(ConfigError::MissingReference("agent.delivery_point"))?;
        require_finite("agent.delivery_point", delivery)?;
        require_positive("agent.catch_range", self.catch_range)?;
        require_positive("agent.deliver_range", self.deliver_range)?;
        require_positive("agent.return_range", self.return_range)?;
        require_positive("agent.acceleration", self.acceleration)?;
        require_positive("agent.max_speed", self.max_speed)?;
        require_positive("agent.rotation_speed", self.rotation_speed)?;
        require_finite("agent.hand_offset", self.hand_offset)?;
        require_finite("agent.head_offset", self.head_offset)?;
        Ok(())
    }
}

/// Swipe-to-force mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowConfig {
    /// Force per pixel of swipe along screen x/y
    pub lateral_force_scale: f32,

    /// Depth force numerator; divided by swipe seconds
    pub depth_force_scale: f32,

    /// Floor for swipe duration
    pub min_swipe_seconds: f32,

    /// Clamp for the reported swipe speed (pixels per second)
    pub max_swipe_speed: f32,
}

impl Default for ThrowConfig {
    fn default() -> Self {
        Self {
            lateral_force_scale: 1.0,
            depth_force_scale: 50.0,
            min_swipe_seconds: 0.1,
            max_swipe_speed: 500.0,
        }
    }
}

impl ThrowConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("throw.lateral_force_scale", self.lateral_force_scale)?;
        require_positive("throw.depth_force_scale", self.depth_force_scale)?;
        require_positive("throw.min_swipe_seconds", self.min_swipe_seconds)?;
        require_positive("throw.max_swipe_speed", self.max_swipe_speed)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    /// Resting spot the ball is reset to
    pub anchor: Vec3,

    /// Seconds for the smooth move back to the anchor
    pub reset_duration: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            anchor: Vec3::new(0.0, 0.5, 0.5),
            reset_duration: 1.0,
        }
    }
}

impl BallConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_finite("ball.anchor", self.anchor)?;
        require_positive("ball.reset_duration", self.reset_duration)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seconds for a clip crossfade
    pub crossfade_duration: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            crossfade_duration: 0.25,
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("animation.crossfade_duration", self.crossfade_duration)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadLookConfig {
    /// Multiplier on elapsed time while turning
    pub rotation_speed: f32,

    /// Nominal turn duration (before the speed multiplier)
    pub rotation_duration: f32,

    /// Seconds to keep looking before turning back
    pub hold_duration: f32,
}

impl Default for HeadLookConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 5.0,
            rotation_duration: 1.0,
            hold_duration: 1.0,
        }
    }
}

impl HeadLookConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("head_look.rotation_speed", self.rotation_speed)?;
        require_positive("head_look.rotation_duration", self.rotation_duration)?;
        require_positive("head_look.hold_duration", self.hold_duration)?;
        Ok(())
    }
}

impl FetchConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate every section. The first offending field wins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.agent.validate()?;
        self.throw.validate()?;
        self.ball.validate()?;
        self.animation.validate()?;
        self.head_look.validate()?;
        Ok(())
    }
}
