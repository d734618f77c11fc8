use std::io::Write;

use fetch_agent::BehaviorState;
use fetch_core::{ConfigError, Vec3};
use fetch_sim::{FetchScene, Scenario, ScriptedCameraMove, TapTarget};
use fetch_throw::{BallPhase, PointerPhase};

#[test]
fn default_scenario_is_valid() {
    let scenario = Scenario::default();
    scenario.validate().unwrap();
    assert_eq!(scenario.last_scripted_tick(), 72);
}

#[test]
fn script_emits_down_and_up_on_schedule() {
    let scenario = Scenario::default();
    let scene = FetchScene::new(scenario.fetch.clone(), &scenario.sim, scenario.dt).unwrap();

    let down = scenario.events_at(60, &scene);
    assert_eq!(down.len(), 1);
    assert_eq!(down[0].phase, PointerPhase::Down);

    let up = scenario.events_at(72, &scene);
    assert_eq!(up.len(), 1);
    assert_eq!(up[0].phase, PointerPhase::Up);
    assert!((up[0].time - down[0].time - 0.2).abs() < 1e-4);

    assert!(scenario.events_at(61, &scene).is_empty());
}

#[test]
fn agent_tap_resolves_to_a_screen_point() {
    let scenario = Scenario::default();
    assert_eq!(scenario.taps[0].target, TapTarget::Agent);
    let scene = FetchScene::new(scenario.fetch.clone(), &scenario.sim, scenario.dt).unwrap();

    let events = scenario.events_at(10, &scene);
    assert_eq!(events.len(), 1);
    let viewport = scenario.sim.camera.viewport;
    assert!(events[0].position.x > 0.0 && events[0].position.x < viewport.x);
    assert!(events[0].position.y > 0.0 && events[0].position.y < viewport.y);
}

#[test]
fn default_scenario_completes_a_fetch() {
    let summary = Scenario::default().run(3600, None).unwrap();

    assert!(summary.finished);
    assert_eq!(summary.throws, 1);
    assert_eq!(summary.completed_cycles, 1);
    assert_eq!(summary.head_looks, 1);
    assert!(summary.ground_contacts >= 1);
    assert_eq!(summary.final_state, BehaviorState::Idle);
    assert_eq!(summary.ball_phase, BallPhase::AtRest);

    let states: Vec<_> = summary.transitions.iter().map(|t| t.to).collect();
    assert_eq!(
        states,
        vec![
            BehaviorState::Chase,
            BehaviorState::PickUp,
            BehaviorState::Deliver,
            BehaviorState::ReturnToIdle,
            BehaviorState::Idle,
        ]
    );
}

#[test]
fn tick_limit_stops_an_unfinished_run() {
    let summary = Scenario::default().run(100, None).unwrap();
    assert!(!summary.finished);
    assert_eq!(summary.ticks, 100);
}

#[test]
fn scenario_without_script_finishes_immediately() {
    let scenario = Scenario {
        swipes: Vec::new(),
        taps: Vec::new(),
        ..Scenario::default()
    };
    let summary = scenario.run(100, None).unwrap();
    assert!(summary.finished);
    assert_eq!(summary.ticks, 1);
    assert_eq!(summary.throws, 0);
}

#[test]
fn scenario_round_trips_through_yaml_file() {
    let scenario = Scenario::default();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", scenario.to_yaml().unwrap()).unwrap();

    assert_eq!(Scenario::load(file.path()).unwrap(), scenario);
}

#[test]
fn partial_yaml_keeps_defaults() {
    let scenario = Scenario::from_yaml("dt: 0.02\nswipes: []\n").unwrap();
    assert_eq!(scenario.dt, 0.02);
    assert!(scenario.swipes.is_empty());
    assert_eq!(scenario.taps.len(), 1);
}

#[test]
fn invalid_restitution_is_rejected() {
    let scenario = Scenario::from_yaml("sim:\n  restitution: 1.5\n").unwrap();
    assert!(matches!(
        scenario.validate(),
        Err(ConfigError::OutOfRange {
            field: "sim.restitution",
            ..
        })
    ));
}

#[test]
fn scripted_camera_move_finishes_before_the_run_ends() {
    let position = Vec3::new(1.0, 2.0, -2.0);
    let scenario = Scenario {
        swipes: Vec::new(),
        taps: Vec::new(),
        camera_moves: vec![ScriptedCameraMove {
            at_tick: 5,
            position,
            look_at: Vec3::new(0.0, 0.0, 7.0),
        }],
        ..Scenario::default()
    };
    assert_eq!(scenario.last_scripted_tick(), 5);

    let summary = scenario.run(600, None).unwrap();
    assert!(summary.finished);
    assert!(summary.ticks > 5 + 20, "run ended mid-glide after {} ticks", summary.ticks);
    assert_eq!(summary.camera_position, position);
}

#[test]
fn zero_camera_move_duration_is_rejected() {
    let scenario = Scenario::from_yaml("sim:\n  camera:\n    move_duration: 0.0\n").unwrap();
    assert!(matches!(
        scenario.validate(),
        Err(ConfigError::NonPositive {
            field: "camera.move_duration",
            ..
        })
    ));
}
