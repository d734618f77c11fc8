use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fetch_agent::{AgentBehaviorController, AnimationClip, Animator, BehaviorState};
use fetch_core::{AgentConfig, BallConfig, BodyMode, PhysicsBody, TickContext, Vec3};
use fetch_throw::ObjectDeliveryTracker;

#[derive(Default)]
struct Body {
    mode: Option<BodyMode>,
    position: Vec3,
}

impl PhysicsBody for Body {
    fn mode(&self) -> BodyMode {
        self.mode.unwrap_or(BodyMode::Kinematic)
    }

    fn set_mode(&mut self, mode: BodyMode) {
        self.mode = Some(mode);
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn apply_force(&mut self, _force: Vec3) {}
}

#[derive(Default)]
struct NullAnimator {
    last: Option<AnimationClip>,
}

impl Animator for NullAnimator {
    fn play(&mut self, clip: AnimationClip) {
        self.last = Some(clip);
    }
}

fn bench_fetch_cycle(c: &mut Criterion) {
    let config = AgentConfig {
        start_position: Vec3::ZERO,
        delivery_point: Some(Vec3::new(0.0, 0.0, 10.0)),
        ..AgentConfig::default()
    };
    let mut agent = AgentBehaviorController::new(&config).unwrap();
    let mut ball = ObjectDeliveryTracker::new(Body::default(), &BallConfig::default()).unwrap();
    let mut animator = NullAnimator::default();

    let mut ctx = TickContext::new(0, 1.0 / 60.0);
    c.bench_function("fetch-agent/tick(full cycle)", |b| {
        b.iter(|| {
            if agent.state() == BehaviorState::Idle {
                ball.body_mut().set_mode(BodyMode::Dynamic);
                ball.body_mut().set_position(Vec3::new(1.0, 0.0, 6.0));
                agent.on_ball_grounded(&ctx, Some(&mut animator));
            }
            let transitions = agent.tick(&ctx, &mut ball, Some(&mut animator)).unwrap();
            ball.tick(ctx.dt(), agent.hand_position());
            black_box(transitions);
            ctx = ctx.next();
        })
    });
}

criterion_group!(benches, bench_fetch_cycle);
criterion_main!(benches);
