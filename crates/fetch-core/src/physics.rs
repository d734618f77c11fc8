//! Seams toward the physics engine and ray queries.
//!
//! The core never simulates anything itself. A backend (see `fetch-sim`) owns the rigid body and
//! implements these traits; the delivery tracker decides who holds position authority.

use serde::{Deserialize, Serialize};

use crate::{Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyMode {
    /// Moved explicitly by code; the simulation leaves it alone.
    Kinematic,
    /// Integrated by the simulation; forces apply.
    Dynamic,
}

pub trait PhysicsBody {
    fn mode(&self) -> BodyMode;
    fn set_mode(&mut self, mode: BodyMode);
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    /// Queue a force for the next simulation step. Ignored while kinematic.
    fn apply_force(&mut self, force: Vec3);
}

/// Tag of the surface a body touched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactTag {
    Ground,
    Wall,
    Other(String),
}

impl ContactTag {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Ground" => ContactTag::Ground,
            "Wall" => ContactTag::Wall,
            other => ContactTag::Other(other.to_string()),
        }
    }

    pub fn is_ground(&self) -> bool {
        matches!(self, ContactTag::Ground)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length, or zero for a degenerate ray that hits nothing.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    Agent,
    Ball,
    Ground,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    pub target: HitTarget,
}

pub trait Raycast {
    /// Closest hit along `ray`, if any.
    fn raycast(&self, ray: Ray) -> Option<RayHit>;
}

pub trait ScreenProjector {
    /// World-space ray through a screen point (pixels, origin bottom-left).
    fn screen_point_to_ray(&self, screen: Vec2) -> Ray;
}
