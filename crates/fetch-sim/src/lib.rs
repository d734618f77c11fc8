//! Headless composition of the fetch loop.
//!
//! [`PhysicsWorld`] integrates the ball against a ground plane and room walls, [`PinholeCamera`]
//! turns taps into rays and glides between poses, and [`FetchScene`] wires the throw pipeline,
//! the agent and the head look together in a fixed per-tick order. [`Scenario`] bundles
//! configuration with a scripted gesture list so a whole session can be replayed without an
//! engine.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod animation;
pub mod body;
pub mod camera;
pub mod config;
pub mod geometry;
pub mod scenario;
pub mod scene;
pub mod world;

pub use animation::HeadlessRig;
pub use body::SimBall;
pub use camera::PinholeCamera;
pub use config::{CameraConfig, SimConfig};
pub use geometry::SceneGeometry;
pub use scenario::{
    RunSummary, Scenario, ScriptedCameraMove, ScriptedSwipe, ScriptedTap, TapTarget,
};
pub use scene::{FetchScene, TickReport};
pub use world::PhysicsWorld;
