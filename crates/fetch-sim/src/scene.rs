use fetch_agent::{
    AgentBehaviorController, AnimationClip, Animator, BehaviorState, HeadLookController,
    Transition,
};
use fetch_core::{
    require_positive, BodyMode, ContactTag, FetchConfig, FetchError, HitTarget, Quat, Raycast,
    ScreenProjector, TickContext, Vec2, Vec3,
};
use fetch_throw::{
    BallPhase, GestureSampler, ImpulseResolver, ObjectDeliveryTracker, PointerEvent, PointerHub,
    PointerPhase, SubscriptionId, ThrowImpulse, PRIMARY_POINTER,
};
use tracing::{debug, info};

use crate::{PhysicsWorld, PinholeCamera, SceneGeometry, SimBall, SimConfig};

/// What happened during one [`FetchScene::tick`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub throw: Option<ThrowImpulse>,
    pub contacts: Vec<ContactTag>,
    pub transitions: Vec<Transition>,
    pub head_look_started: bool,
}

/// Composition root: owns every collaborator and runs them in a fixed order each tick.
///
/// 1. pointer input (throw gestures, then head-look taps)
/// 2. physics step and contact dispatch
/// 3. agent behavior
/// 4. ball upkeep (hand following, reset glide)
/// 5. head look
/// 6. camera glide
pub struct FetchScene {
    config: FetchConfig,
    world: PhysicsWorld,
    camera: PinholeCamera,
    camera_move_duration: f32,
    agent_radius: f32,
    sampler: GestureSampler,
    resolver: ImpulseResolver,
    ball: ObjectDeliveryTracker<SimBall>,
    agent: AgentBehaviorController,
    head_look: HeadLookController,
    animator: Option<Box<dyn Animator>>,
    throw_input: Option<SubscriptionId>,
    look_input: Option<SubscriptionId>,
    ctx: TickContext,
    throws: u32,
    completed_cycles: u32,
}

impl FetchScene {
    /// Validate everything up front; a scene that fails here never ticks.
    pub fn new(config: FetchConfig, sim: &SimConfig, dt: f32) -> Result<Self, FetchError> {
        config.validate()?;
        sim.validate()?;
        require_positive("sim.dt", dt)?;

        let ball = ObjectDeliveryTracker::new(SimBall::from_config(sim), &config.ball)?;
        let agent = AgentBehaviorController::new(&config.agent)?;
        let head_look = HeadLookController::new(Quat::IDENTITY, &config.head_look)?;

        Ok(Self {
            world: PhysicsWorld::new(sim),
            camera: PinholeCamera::new(&sim.camera),
            camera_move_duration: sim.camera.move_duration,
            agent_radius: sim.agent_radius,
            sampler: GestureSampler::from_config(&config.throw)?,
            resolver: ImpulseResolver::new(&config.throw)?,
            ball,
            agent,
            head_look,
            animator: None,
            throw_input: None,
            look_input: None,
            ctx: TickContext::new(0, dt),
            throws: 0,
            completed_cycles: 0,
            config,
        })
    }

    pub fn with_animator(mut self, animator: Box<dyn Animator>) -> Self {
        self.animator = Some(animator);
        self
    }

    pub fn set_animator(&mut self, animator: Option<Box<dyn Animator>>) {
        self.animator = animator;
    }

    /// Subscribe the throw and head-look inputs.
    pub fn attach(&mut self, hub: &mut PointerHub) {
        if self.throw_input.is_none() {
            self.throw_input = Some(hub.subscribe());
        }
        if self.look_input.is_none() {
            self.look_input = Some(hub.subscribe());
        }
    }

    /// Unsubscribe both inputs and drop any half-drawn swipe.
    pub fn detach(&mut self, hub: &mut PointerHub) {
        for id in [self.throw_input.take(), self.look_input.take()]
            .into_iter()
            .flatten()
        {
            hub.unsubscribe(id);
        }
        self.sampler.cancel();
        self.ball.cancel_hold();
    }

    pub fn is_attached(&self) -> bool {
        self.throw_input.is_some()
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    pub fn context(&self) -> TickContext {
        self.ctx
    }

    /// Seconds since the scene started.
    pub fn time(&self) -> f32 {
        self.ctx.time()
    }

    pub fn agent(&self) -> &AgentBehaviorController {
        &self.agent
    }

    pub fn ball(&self) -> &ObjectDeliveryTracker<SimBall> {
        &self.ball
    }

    pub fn head_look(&self) -> &HeadLookController {
        &self.head_look
    }

    pub fn camera(&self) -> &PinholeCamera {
        &self.camera
    }

    pub fn ball_phase(&self) -> BallPhase {
        self.ball.phase()
    }

    pub fn agent_state(&self) -> BehaviorState {
        self.agent.state()
    }

    /// Glide the camera to `position`, facing `look_at`, over the configured move duration.
    pub fn move_camera_to(&mut self, position: Vec3, look_at: Vec3) {
        self.camera
            .move_to_look_at(position, look_at, self.camera_move_duration);
    }

    /// Screen position of a world point, for scripting taps on scene objects.
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        self.camera.world_to_screen(point)
    }

    pub fn throws(&self) -> u32 {
        self.throws
    }

    /// Fetch cycles that ended with the agent back at rest.
    pub fn completed_cycles(&self) -> u32 {
        self.completed_cycles
    }

    pub fn geometry(&self) -> SceneGeometry {
        SceneGeometry {
            agent_center: self.agent.position() + Vec3::Y * self.agent_radius,
            agent_radius: self.agent_radius,
            ball_center: self.ball.position(),
            ball_radius: self.ball.body().radius(),
            ground_height: self.world.ground_height(),
            half_extents: self.world.half_extents(),
        }
    }

    pub fn tick(&mut self, hub: &mut PointerHub) -> Result<TickReport, FetchError> {
        let ctx = self.ctx;
        let dt = ctx.dt();
        let mut report = TickReport {
            tick: ctx.tick,
            ..TickReport::default()
        };

        if let Some(id) = self.throw_input {
            for event in hub.drain(id) {
                if let Some(impulse) = self.on_throw_input(event) {
                    report.throw = Some(impulse);
                }
            }
        }
        if let Some(id) = self.look_input {
            for event in hub.drain(id) {
                report.head_look_started |= self.on_look_input(event);
            }
        }

        report.contacts = self.world.step(self.ball.body_mut(), dt);
        for contact in &report.contacts {
            if self.ball.on_contact(contact) {
                let grounded = self
                    .agent
                    .on_ball_grounded(&ctx, animator_of(&mut self.animator));
                report.transitions.extend(grounded);
            }
        }
        report.transitions.extend(self.renotify_waiting_ball(&ctx));

        let transitions = self
            .agent
            .tick(&ctx, &mut self.ball, animator_of(&mut self.animator))?;
        for transition in &transitions {
            if transition.from == BehaviorState::ReturnToIdle && transition.to == BehaviorState::Idle
            {
                self.completed_cycles += 1;
                info!(cycles = self.completed_cycles, "fetch cycle complete");
            }
        }
        report.transitions.extend(transitions);

        self.ball.tick(dt, self.agent.hand_position());
        self.head_look.tick(dt, animator_of(&mut self.animator));
        self.camera.tick(dt);

        self.ctx = ctx.next();
        Ok(report)
    }

    /// Put the ball back on its anchor and the agent back home, cancelling any gesture, glide
    /// or head look in progress.
    pub fn reset_all(&mut self) {
        self.sampler.cancel();
        self.ball.reset_immediate();
        self.agent.reset();
        self.head_look.cancel(animator_of(&mut self.animator));
        if let Some(animator) = animator_of(&mut self.animator) {
            animator.play(AnimationClip::CrawlToSit);
        }
        info!("scene reset");
    }

    /// Ground contact is reported once per landing and dropped if the agent is busy. An idle
    /// agent with the ball still waiting on the ground gets the landing again, like a
    /// contact-stay.
    fn renotify_waiting_ball(&mut self, ctx: &TickContext) -> Option<Transition> {
        if self.agent.state() != BehaviorState::Idle
            || self.ball.phase() != BallPhase::GroundedAwaitingPickup
            || self.ball.mode() != BodyMode::Dynamic
        {
            return None;
        }
        debug!("ball still waiting on the ground");
        self.agent
            .on_ball_grounded(ctx, animator_of(&mut self.animator))
    }

    fn on_throw_input(&mut self, event: PointerEvent) -> Option<ThrowImpulse> {
        match event.phase {
            PointerPhase::Down => {
                if self
                    .sampler
                    .on_pointer_down(event.pointer, event.position, event.time)
                {
                    self.ball.hold();
                }
                None
            }
            PointerPhase::Up => {
                let sample = self.sampler.on_pointer_up(
                    event.pointer,
                    event.position,
                    event.time,
                    !self.ball.can_throw(),
                );
                let impulse =
                    sample.and_then(|sample| self.resolver.resolve(&sample, &mut self.ball));
                match impulse {
                    Some(_) => self.throws += 1,
                    None if event.pointer == PRIMARY_POINTER => self.ball.cancel_hold(),
                    None => {}
                }
                impulse
            }
        }
    }

    fn on_look_input(&mut self, event: PointerEvent) -> bool {
        if event.phase != PointerPhase::Down || !event.is_primary() {
            return false;
        }
        let ray = self.camera.screen_point_to_ray(event.position);
        let Some(hit) = self.geometry().raycast(ray) else {
            return false;
        };
        if hit.target != HitTarget::Agent {
            debug!(target = ?hit.target, "tap missed the agent");
            return false;
        }
        self.head_look.look_at(
            self.agent.head_position(),
            hit.point,
            animator_of(&mut self.animator),
        )
    }
}

fn animator_of(slot: &mut Option<Box<dyn Animator>>) -> Option<&mut dyn Animator> {
    match slot {
        Some(animator) => Some(animator.as_mut()),
        None => None,
    }
}
