use fetch_core::{BodyMode, ContactTag, PhysicsBody, Vec3};
use tracing::trace;

use crate::{SimBall, SimConfig};

/// Gap above the resting height that still counts as touching the ground.
const CONTACT_SLOP: f32 = 1e-3;

/// Bounces slower than this stick to the ground instead.
const MIN_BOUNCE_SPEED: f32 = 0.3;

/// Semi-implicit Euler over a ground plane inside four walls.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsWorld {
    gravity: Vec3,
    ground_height: f32,
    half_extents: Vec3,
    restitution: f32,
    friction: f32,
    sleep_speed: f32,
}

impl PhysicsWorld {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            gravity: config.gravity,
            ground_height: config.ground_height,
            half_extents: config.room_half_extents,
            restitution: config.restitution,
            friction: config.friction,
            sleep_speed: config.sleep_speed,
        }
    }

    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Advance `ball` by `dt` and return the contacts that began during the step.
    ///
    /// Ground is reported once per airborne-to-touching transition. A wall is reported each time
    /// the ball is moving into it. Kinematic bodies are left untouched.
    pub fn step(&self, ball: &mut SimBall, dt: f32) -> Vec<ContactTag> {
        let mut contacts = Vec::new();
        if ball.mode() != BodyMode::Dynamic || dt <= 0.0 {
            return contacts;
        }

        let force = ball.take_force();
        let mut velocity = ball.velocity() + (force / ball.mass() + self.gravity) * dt;
        let mut position = ball.position() + velocity * dt;
        let radius = ball.radius();

        let rest_height = self.ground_height + radius;
        if position.y <= rest_height {
            position.y = rest_height;
            if velocity.y < 0.0 {
                velocity.y = -velocity.y * self.restitution;
                if velocity.y < MIN_BOUNCE_SPEED {
                    velocity.y = 0.0;
                }
            }
            if !ball.is_grounded() {
                trace!(x = position.x, z = position.z, "ground contact");
                contacts.push(ContactTag::Ground);
            }
            ball.set_grounded(true);

            let damping = (1.0 - self.friction * dt).max(0.0);
            velocity.x *= damping;
            velocity.z *= damping;
            if velocity.y == 0.0 && velocity.length() < self.sleep_speed {
                velocity = Vec3::ZERO;
            }
        } else if position.y > rest_height + CONTACT_SLOP {
            ball.set_grounded(false);
        }

        let limit_x = self.half_extents.x - radius;
        if position.x.abs() > limit_x {
            position.x = position.x.clamp(-limit_x, limit_x);
            if velocity.x * position.x > 0.0 {
                velocity.x = -velocity.x * self.restitution;
                contacts.push(ContactTag::Wall);
            }
        }
        let limit_z = self.half_extents.z - radius;
        if position.z.abs() > limit_z {
            position.z = position.z.clamp(-limit_z, limit_z);
            if velocity.z * position.z > 0.0 {
                velocity.z = -velocity.z * self.restitution;
                contacts.push(ContactTag::Wall);
            }
        }

        ball.set_velocity(velocity);
        ball.set_position(position);
        contacts
    }
}
