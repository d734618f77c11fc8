use fetch_agent::{BehaviorState, CrossfadeAnimator};
use fetch_core::{
    look_rotation, AgentConfig, AnimationConfig, ConfigError, FetchConfig, FetchError, Vec2, Vec3,
};
use fetch_sim::{FetchScene, HeadlessRig, SimConfig};
use fetch_throw::{BallPhase, PointerHub};

const DT: f32 = 1.0 / 60.0;

fn scene() -> FetchScene {
    FetchScene::new(FetchConfig::default(), &SimConfig::default(), DT).unwrap()
}

fn throw(scene: &mut FetchScene, hub: &mut PointerHub) {
    let start = scene.time();
    hub.pointer_down(0, Vec2::new(540.0, 300.0), start);
    scene.tick(hub).unwrap();
    assert_eq!(scene.ball_phase(), BallPhase::Held);

    hub.pointer_up(0, Vec2::new(560.0, 500.0), start + 0.2);
    let report = scene.tick(hub).unwrap();
    assert!(report.throw.is_some());
}

#[test]
fn missing_delivery_point_refuses_to_build() {
    let config = FetchConfig {
        agent: AgentConfig {
            delivery_point: None,
            ..AgentConfig::default()
        },
        ..FetchConfig::default()
    };
    let result = FetchScene::new(config, &SimConfig::default(), DT);
    assert!(matches!(
        result,
        Err(FetchError::Config(ConfigError::MissingReference(_)))
    ));
}

#[test]
fn non_positive_step_is_rejected() {
    assert!(FetchScene::new(FetchConfig::default(), &SimConfig::default(), 0.0).is_err());
}

#[test]
fn swipe_throws_the_ball_once() {
    let mut hub = PointerHub::new();
    let mut scene = scene();
    scene.attach(&mut hub);

    throw(&mut scene, &mut hub);
    assert_eq!(scene.ball_phase(), BallPhase::InFlight);
    assert_eq!(scene.throws(), 1);

    hub.pointer_down(0, Vec2::new(100.0, 100.0), scene.time());
    scene.tick(&mut hub).unwrap();
    hub.pointer_up(0, Vec2::new(300.0, 300.0), scene.time());
    let report = scene.tick(&mut hub).unwrap();
    assert!(report.throw.is_none());
    assert_eq!(scene.throws(), 1);
}

#[test]
fn landing_starts_the_chase() {
    let mut hub = PointerHub::new();
    let mut scene = scene();
    scene.attach(&mut hub);
    throw(&mut scene, &mut hub);

    for _ in 0..300 {
        let report = scene.tick(&mut hub).unwrap();
        if report
            .transitions
            .iter()
            .any(|t| t.from == BehaviorState::Idle && t.to == BehaviorState::Chase)
        {
            assert!(report.contacts.iter().any(|c| c.is_ground()));
            assert_eq!(scene.ball_phase(), BallPhase::GroundedAwaitingPickup);
            return;
        }
    }
    panic!("ball never landed");
}

#[test]
fn full_fetch_returns_ball_to_anchor() {
    let mut hub = PointerHub::new();
    let animator = CrossfadeAnimator::new(HeadlessRig::new(), &AnimationConfig::default()).unwrap();
    let mut scene = scene().with_animator(Box::new(animator));
    scene.attach(&mut hub);
    throw(&mut scene, &mut hub);

    for _ in 0..3000 {
        scene.tick(&mut hub).unwrap();
        if scene.completed_cycles() == 1 && scene.ball_phase() == BallPhase::AtRest {
            break;
        }
    }
    assert_eq!(scene.completed_cycles(), 1);
    assert_eq!(scene.agent_state(), BehaviorState::Idle);
    assert_eq!(scene.ball().position(), scene.config().ball.anchor);
}

#[test]
fn secondary_pointer_does_not_throw() {
    let mut hub = PointerHub::new();
    let mut scene = scene();
    scene.attach(&mut hub);

    hub.pointer_down(1, Vec2::new(540.0, 300.0), 0.0);
    scene.tick(&mut hub).unwrap();
    hub.pointer_up(1, Vec2::new(560.0, 500.0), 0.2);
    let report = scene.tick(&mut hub).unwrap();

    assert!(report.throw.is_none());
    assert_eq!(scene.ball_phase(), BallPhase::AtRest);
}

#[test]
fn tap_without_movement_releases_the_hold() {
    let mut hub = PointerHub::new();
    let mut scene = scene();
    scene.attach(&mut hub);

    hub.pointer_down(0, Vec2::new(10.0, 10.0), 0.0);
    scene.tick(&mut hub).unwrap();
    assert_eq!(scene.ball_phase(), BallPhase::Held);

    hub.pointer_up(0, Vec2::new(10.0, 10.0), 0.1);
    scene.tick(&mut hub).unwrap();
    assert_eq!(scene.ball_phase(), BallPhase::AtRest);
}

#[test]
fn detached_scene_ignores_input() {
    let mut hub = PointerHub::new();
    let mut scene = scene();
    scene.attach(&mut hub);
    assert_eq!(hub.subscriber_count(), 2);

    scene.detach(&mut hub);
    assert_eq!(hub.subscriber_count(), 0);
    assert!(!scene.is_attached());

    hub.pointer_down(0, Vec2::new(540.0, 300.0), 0.0);
    hub.pointer_up(0, Vec2::new(560.0, 500.0), 0.2);
    let report = scene.tick(&mut hub).unwrap();
    assert!(report.throw.is_none());
    assert_eq!(scene.ball_phase(), BallPhase::AtRest);
}

#[test]
fn tapping_the_agent_turns_its_head() {
    let mut hub = PointerHub::new();
    let mut scene = scene();
    scene.attach(&mut hub);

    let at = scene.project(scene.geometry().agent_center).unwrap();
    hub.pointer_down(0, at, 0.0);
    let report = scene.tick(&mut hub).unwrap();

    assert!(report.head_look_started);
    assert!(scene.head_look().is_active());
}

#[test]
fn tapping_empty_floor_does_not_turn_the_head() {
    let mut hub = PointerHub::new();
    let mut scene = scene();
    scene.attach(&mut hub);

    hub.pointer_down(0, Vec2::new(50.0, 50.0), 0.0);
    let report = scene.tick(&mut hub).unwrap();
    assert!(!report.head_look_started);
}

#[test]
fn reset_all_restores_initial_layout() {
    let mut hub = PointerHub::new();
    let mut scene = scene();
    scene.attach(&mut hub);
    throw(&mut scene, &mut hub);
    for _ in 0..120 {
        scene.tick(&mut hub).unwrap();
    }

    scene.reset_all();
    assert_eq!(scene.ball_phase(), BallPhase::AtRest);
    assert_eq!(scene.ball().position(), scene.config().ball.anchor);
    assert_eq!(scene.agent_state(), BehaviorState::Idle);
    assert_eq!(scene.agent().position(), scene.agent().home());
    assert!(!scene.head_look().is_active());
}

#[test]
fn ball_landing_during_return_is_fetched_once_idle() {
    let config = FetchConfig {
        agent: AgentConfig {
            acceleration: 0.3,
            ..AgentConfig::default()
        },
        ..FetchConfig::default()
    };
    let mut hub = PointerHub::new();
    let mut scene = FetchScene::new(config, &SimConfig::default(), DT).unwrap();
    scene.attach(&mut hub);
    throw(&mut scene, &mut hub);

    let mut rethrown = false;
    let mut landed_while_returning = false;
    for _ in 0..20_000 {
        if !rethrown
            && scene.agent_state() == BehaviorState::ReturnToIdle
            && scene.ball_phase() == BallPhase::AtRest
        {
            throw(&mut scene, &mut hub);
            rethrown = true;
            continue;
        }

        let report = scene.tick(&mut hub).unwrap();
        if rethrown
            && report.contacts.iter().any(|c| c.is_ground())
            && scene.agent_state() == BehaviorState::ReturnToIdle
        {
            landed_while_returning = true;
        }
        if scene.completed_cycles() == 2 && scene.ball_phase() == BallPhase::AtRest {
            break;
        }
    }

    assert!(rethrown, "ball never came back while the agent was returning");
    assert!(landed_while_returning);
    assert_eq!(scene.throws(), 2);
    assert_eq!(scene.completed_cycles(), 2);
    assert_eq!(scene.agent_state(), BehaviorState::Idle);
    assert!(scene.ball().can_throw());
}

#[test]
fn camera_move_is_advanced_by_the_scene() {
    let mut hub = PointerHub::new();
    let mut scene = scene();
    scene.attach(&mut hub);

    let position = Vec3::new(2.0, 2.5, -1.0);
    let look_at = scene.agent().position();
    scene.move_camera_to(position, look_at);
    assert!(scene.camera().is_moving());

    for _ in 0..60 {
        scene.tick(&mut hub).unwrap();
    }
    assert!(!scene.camera().is_moving());
    assert_eq!(scene.camera().position(), position);
    assert_eq!(
        scene.camera().rotation(),
        look_rotation(look_at - position).unwrap()
    );
}
