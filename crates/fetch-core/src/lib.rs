//! Deterministic, engine-agnostic kernel primitives for the fetch agent.
//!
//! Everything here is plain data plus a few seam traits: the throw, agent and simulation crates
//! build on these without depending on each other's internals.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod math;
pub mod physics;
pub mod tick;
pub mod tween;

pub use config::{
    AgentConfig, AnimationConfig, BallConfig, FetchConfig, HeadLookConfig, ThrowConfig,
};
pub use error::{require_finite, require_positive, require_range, ConfigError, FetchError};
pub use math::{look_rotation, move_towards, Interpolate, Quat, Vec2, Vec3};
pub use physics::{BodyMode, ContactTag, HitTarget, PhysicsBody, Ray, RayHit, Raycast, ScreenProjector};
pub use tick::TickContext;
pub use tween::{Tween, TweenStep};
