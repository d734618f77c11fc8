use fetch_core::{
    BallConfig, BodyMode, ConfigError, ContactTag, PhysicsBody, Tween, TweenStep, Vec3,
};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle phase of the carriable ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BallPhase {
    AtRest,
    /// The primary pointer is down and a swipe is being drawn.
    Held,
    InFlight,
    GroundedAwaitingPickup,
    CarriedByAgent,
    /// Released at the delivery point; gliding back to the anchor.
    DeliveredPendingReset,
}

/// Who currently owns the ball's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionAuthority {
    World,
    Physics,
    AgentHand,
    ResetTween,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Parent {
    World,
    AgentHand { local_offset: Vec3 },
}

/// Owns the ball body and enforces a single owner of its position at any time.
pub struct ObjectDeliveryTracker<B> {
    body: B,
    phase: BallPhase,
    parent: Parent,
    anchor: Vec3,
    reset_duration: f32,
    reset: Option<Tween<Vec3>>,
}

impl<B: PhysicsBody> ObjectDeliveryTracker<B> {
    /// Take ownership of `body` and place it at the anchor, kinematic and at rest.
    pub fn new(body: B, config: &BallConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut tracker = Self {
            body,
            phase: BallPhase::AtRest,
            parent: Parent::World,
            anchor: config.anchor,
            reset_duration: config.reset_duration,
            reset: None,
        };
        tracker.reset_immediate();
        Ok(tracker)
    }

    pub fn phase(&self) -> BallPhase {
        self.phase
    }

    pub fn mode(&self) -> BodyMode {
        self.body.mode()
    }

    pub fn position(&self) -> Vec3 {
        self.body.position()
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    /// Raw access for the simulation step. Only meaningful while the physics owns the ball.
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.parent, Parent::AgentHand { .. })
    }

    pub fn is_resetting(&self) -> bool {
        self.reset.is_some()
    }

    pub fn authority(&self) -> PositionAuthority {
        if self.is_attached() {
            PositionAuthority::AgentHand
        } else if self.reset.is_some() {
            PositionAuthority::ResetTween
        } else if self.body.mode() == BodyMode::Dynamic {
            PositionAuthority::Physics
        } else {
            PositionAuthority::World
        }
    }

    /// Whether a new swipe may still launch the ball.
    pub fn can_throw(&self) -> bool {
        matches!(self.phase, BallPhase::AtRest | BallPhase::Held)
    }

    /// The player started drawing a swipe on a resting ball.
    pub fn hold(&mut self) -> bool {
        if self.phase != BallPhase::AtRest {
            return false;
        }
        self.phase = BallPhase::Held;
        true
    }

    /// The swipe ended without a throw.
    pub fn cancel_hold(&mut self) {
        if self.phase == BallPhase::Held {
            self.phase = BallPhase::AtRest;
        }
    }

    /// Hand the ball to the physics simulation with `force` queued.
    pub(crate) fn launch(&mut self, force: Vec3) {
        self.parent = Parent::World;
        self.reset = None;
        self.body.set_mode(BodyMode::Dynamic);
        self.body.apply_force(force);
        self.phase = BallPhase::InFlight;
    }

    /// Feed a contact reported by the simulation.
    ///
    /// Returns true when the contact should wake the agent: the ball is simulated and touched
    /// the ground. The agent's own state decides whether that actually starts a chase.
    pub fn on_contact(&mut self, tag: &ContactTag) -> bool {
        if !tag.is_ground() || self.body.mode() != BodyMode::Dynamic {
            return false;
        }
        if self.phase == BallPhase::InFlight {
            debug!("ball grounded");
            self.phase = BallPhase::GroundedAwaitingPickup;
        }
        true
    }

    /// Parent the ball to the agent's hand frame with zero local offset.
    pub fn attach_to_agent_hand(&mut self, hand: Vec3) {
        self.reset = None;
        self.body.set_mode(BodyMode::Kinematic);
        self.parent = Parent::AgentHand {
            local_offset: Vec3::ZERO,
        };
        self.body.set_position(hand);
        self.phase = BallPhase::CarriedByAgent;
    }

    /// Drop the parent link. The body mode is left as the caller set it.
    pub fn release(&mut self) {
        self.parent = Parent::World;
        if self.phase == BallPhase::CarriedByAgent {
            self.phase = BallPhase::DeliveredPendingReset;
        }
    }

    /// Start the smooth glide back to the anchor.
    pub fn reset_to_anchor(&mut self) {
        self.parent = Parent::World;
        self.body.set_mode(BodyMode::Kinematic);
        self.reset = Some(Tween::new(
            self.body.position(),
            self.anchor,
            self.reset_duration,
        ));
        self.phase = BallPhase::DeliveredPendingReset;
        info!("ball resetting to anchor");
    }

    /// Snap straight to the anchor, cancelling any glide or attachment.
    pub fn reset_immediate(&mut self) {
        self.reset = None;
        self.parent = Parent::World;
        self.body.set_mode(BodyMode::Kinematic);
        self.body.set_position(self.anchor);
        self.phase = BallPhase::AtRest;
    }

    /// Per-tick upkeep for whichever non-physics owner holds the ball.
    pub fn tick(&mut self, dt: f32, hand: Vec3) {
        if let Parent::AgentHand { local_offset } = self.parent {
            self.body.set_position(hand + local_offset);
            return;
        }

        let Some(reset) = self.reset.as_mut() else {
            return;
        };
        match reset.advance(dt) {
            TweenStep::Running(position) => self.body.set_position(position),
            TweenStep::Finished(position) => {
                self.body.set_position(position);
                self.reset = None;
                self.phase = BallPhase::AtRest;
                info!("ball back at anchor");
            }
        }
    }
}
