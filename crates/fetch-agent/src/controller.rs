use fetch_core::{AgentConfig, ConfigError, FetchError, PhysicsBody, Quat, TickContext, Vec3};
use fetch_throw::ObjectDeliveryTracker;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{AnimationClip, Animator, MotionStepper};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BehaviorState {
    Idle,
    Chase,
    /// Pass-through: entered and left within the tick that caught the ball.
    PickUp,
    Deliver,
    ReturnToIdle,
}

impl BehaviorState {
    pub fn name(self) -> &'static str {
        match self {
            BehaviorState::Idle => "Idle",
            BehaviorState::Chase => "Chase",
            BehaviorState::PickUp => "PickUp",
            BehaviorState::Deliver => "Deliver",
            BehaviorState::ReturnToIdle => "ReturnToIdle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transition {
    pub tick: u64,
    pub from: BehaviorState,
    pub to: BehaviorState,
}

/// Per-phase arrival thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrivalRanges {
    pub catch: f32,
    pub deliver: f32,
    pub return_home: f32,
}

/// The fetch task state machine.
///
/// Owns the agent's pose. The ball tracker and animator are borrowed per call rather than held,
/// so whoever composes the scene decides their lifetimes.
#[derive(Debug, Clone)]
pub struct AgentBehaviorController {
    state: BehaviorState,
    position: Vec3,
    rotation: Quat,
    home: Vec3,
    home_rotation: Quat,
    delivery_point: Vec3,
    ranges: ArrivalRanges,
    stepper: MotionStepper,
    hand_offset: Vec3,
    head_offset: Vec3,
}

impl AgentBehaviorController {
    /// Build from config; the start position is captured as home.
    pub fn new(config: &AgentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let delivery_point = config
            .delivery_point
            .ok_or(ConfigError::MissingReference("agent.delivery_point"))?;

        Ok(Self {
            state: BehaviorState::Idle,
            position: config.start_position,
            rotation: Quat::IDENTITY,
            home: config.start_position,
            home_rotation: Quat::IDENTITY,
            delivery_point,
            ranges: ArrivalRanges {
                catch: config.catch_range,
                deliver: config.deliver_range,
                return_home: config.return_range,
            },
            stepper: MotionStepper::from_config(config)?,
            hand_offset: config.hand_offset,
            head_offset: config.head_offset,
        })
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn home(&self) -> Vec3 {
        self.home
    }

    pub fn delivery_point(&self) -> Vec3 {
        self.delivery_point
    }

    pub fn ranges(&self) -> ArrivalRanges {
        self.ranges
    }

    pub fn stepper(&self) -> &MotionStepper {
        &self.stepper
    }

    /// World position of the hand frame the ball is parented to.
    pub fn hand_position(&self) -> Vec3 {
        self.position + self.rotation * self.hand_offset
    }

    pub fn head_position(&self) -> Vec3 {
        self.position + self.rotation * self.head_offset
    }

    /// The ball touched the ground. Starts a chase only from `Idle`; anything else is a stale
    /// or duplicate trigger and is dropped.
    pub fn on_ball_grounded(
        &mut self,
        ctx: &TickContext,
        mut animator: Option<&mut dyn Animator>,
    ) -> Option<Transition> {
        if self.state != BehaviorState::Idle {
            debug!(state = self.state.name(), "grounded trigger ignored");
            return None;
        }
        play(&mut animator, AnimationClip::Crawl);
        Some(self.transition(ctx, BehaviorState::Chase))
    }

    /// Evaluate one tick. Returns the transitions taken, in order.
    pub fn tick<B: PhysicsBody>(
        &mut self,
        ctx: &TickContext,
        ball: &mut ObjectDeliveryTracker<B>,
        mut animator: Option<&mut dyn Animator>,
    ) -> Result<Vec<Transition>, FetchError> {
        let dt = ctx.dt();
        let mut transitions = Vec::new();

        match self.state {
            BehaviorState::Idle => {
                let to_delivery = self.delivery_point - self.position;
                self.rotation = self.stepper.face(self.rotation, to_delivery, dt);
            }
            BehaviorState::Chase => {
                play(&mut animator, AnimationClip::Crawl);
                if self.move_towards(ball.position(), self.ranges.catch, dt) {
                    transitions.push(self.transition(ctx, BehaviorState::PickUp));
                    play(&mut animator, AnimationClip::PickBall);
                    ball.attach_to_agent_hand(self.hand_position());
                    transitions.push(self.transition(ctx, BehaviorState::Deliver));
                }
            }
            BehaviorState::PickUp => {
                return Err(FetchError::UnreachableState(BehaviorState::PickUp.name()));
            }
            BehaviorState::Deliver => {
                play(&mut animator, AnimationClip::Crawl);
                if self.move_towards(self.delivery_point, self.ranges.deliver, dt) {
                    ball.release();
                    ball.reset_to_anchor();
                    transitions.push(self.transition(ctx, BehaviorState::ReturnToIdle));
                }
            }
            BehaviorState::ReturnToIdle => {
                play(&mut animator, AnimationClip::Crawl);
                if self.move_towards(self.home, self.ranges.return_home, dt) {
                    play(&mut animator, AnimationClip::CrawlToSit);
                    transitions.push(self.transition(ctx, BehaviorState::Idle));
                }
            }
        }

        Ok(transitions)
    }

    /// Back to `Idle` at home, as at session start.
    pub fn reset(&mut self) {
        self.state = BehaviorState::Idle;
        self.position = self.home;
        self.rotation = self.home_rotation;
    }

    /// Test and tooling hook: force the resident state.
    pub fn force_state(&mut self, state: BehaviorState) {
        self.state = state;
    }

    fn move_towards(&mut self, target: Vec3, threshold: f32, dt: f32) -> bool {
        let step = self.stepper.step(self.position, target, threshold, dt);
        self.position = step.position;
        self.rotation = self.stepper.face(self.rotation, step.direction, dt);
        step.arrived
    }

    fn transition(&mut self, ctx: &TickContext, to: BehaviorState) -> Transition {
        let from = self.state;
        self.state = to;
        info!(tick = ctx.tick, from = from.name(), to = to.name(), "behavior transition");
        Transition {
            tick: ctx.tick,
            from,
            to,
        }
    }
}

fn play(animator: &mut Option<&mut dyn Animator>, clip: AnimationClip) {
    match animator {
        Some(animator) => animator.play(clip),
        None => warn!(clip = clip.name(), "no animator attached; skipping clip"),
    }
}
