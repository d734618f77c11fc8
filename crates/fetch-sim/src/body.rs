use fetch_core::{BodyMode, PhysicsBody, Vec3};

use crate::SimConfig;

/// Rigid sphere simulated by [`crate::PhysicsWorld`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimBall {
    mode: BodyMode,
    position: Vec3,
    velocity: Vec3,
    pending_force: Vec3,
    mass: f32,
    radius: f32,
    grounded: bool,
}

impl SimBall {
    pub fn new(mass: f32, radius: f32) -> Self {
        Self {
            mode: BodyMode::Kinematic,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            pending_force: Vec3::ZERO,
            mass,
            radius,
            grounded: false,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.ball_mass, config.ball_radius)
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Whether the last step left the ball resting on or touching the ground.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub(crate) fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub(crate) fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    pub(crate) fn take_force(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending_force)
    }
}

impl PhysicsBody for SimBall {
    fn mode(&self) -> BodyMode {
        self.mode
    }

    /// Switching mode always starts from rest: contacts re-arm and velocity is dropped when
    /// code takes over.
    fn set_mode(&mut self, mode: BodyMode) {
        self.mode = mode;
        self.grounded = false;
        if mode == BodyMode::Kinematic {
            self.velocity = Vec3::ZERO;
            self.pending_force = Vec3::ZERO;
        }
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn apply_force(&mut self, force: Vec3) {
        if self.mode == BodyMode::Dynamic {
            self.pending_force += force;
        }
    }
}
