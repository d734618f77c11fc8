use fetch_core::{look_rotation, ConfigError, Quat, Vec3};
use fetch_agent::MotionStepper;
use proptest::prelude::*;

fn stepper() -> MotionStepper {
    MotionStepper::new(1.0, 5.0, 5.0).unwrap()
}

#[test]
fn speed_is_proportional_to_distance_and_capped() {
    let stepper = stepper();
    assert_eq!(stepper.speed_at(2.0), 2.0);
    assert_eq!(stepper.speed_at(100.0), 5.0);
    assert_eq!(stepper.speed_at(0.0), 0.0);
}

fn point() -> impl Strategy<Value = Vec3> {
    (-50.0f32..50.0, -5.0f32..5.0, -50.0f32..50.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn step_never_overshoots(
        position in point(),
        target in point(),
        threshold in 0.01f32..3.0,
        dt in 0.0f32..5.0,
    ) {
        let stepper = stepper();
        let before = position.distance(target);
        let step = stepper.step(position, target, threshold, dt);
        let after = step.position.distance(target);

        prop_assert!(after <= before + 1e-4, "moved away: {} -> {}", before, after);
        prop_assert!(
            position.distance(step.position) <= stepper.speed_at(before) * dt + 1e-4,
            "travelled past the speed cap"
        );
        prop_assert!(
            (position.distance(step.position) + after - before).abs() <= 1e-3,
            "left the straight line"
        );
        prop_assert_eq!(step.arrived, before <= threshold);
    }
}

#[test]
fn step_lands_exactly_on_a_close_target() {
    let target = Vec3::new(0.0, 0.0, 0.5);
    let step = stepper().step(Vec3::ZERO, target, 0.1, 10.0);
    assert_eq!(step.position, target);
}

#[test]
fn long_step_is_limited_by_max_speed() {
    let step = stepper().step(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 1.0, 1.0);
    assert!((step.position.x - 5.0).abs() < 1e-5);
    assert!(!step.arrived);
    assert_eq!(step.distance, 100.0);
}

#[test]
fn arrival_uses_the_distance_before_moving() {
    let stepper = stepper();
    let target = Vec3::new(0.0, 0.0, 1.5);

    let first = stepper.step(Vec3::ZERO, target, 1.0, 1.0);
    assert!(!first.arrived, "1.5 away is outside a range of 1");
    assert_eq!(first.position, target);

    let second = stepper.step(first.position, target, 1.0, 1.0);
    assert!(second.arrived);
}

#[test]
fn negative_dt_does_not_move() {
    let step = stepper().step(Vec3::ZERO, Vec3::X * 3.0, 0.5, -1.0);
    assert_eq!(step.position, Vec3::ZERO);
}

#[test]
fn face_with_zero_direction_keeps_rotation() {
    let rotation = Quat::from_rotation_y(0.7);
    assert_eq!(stepper().face(rotation, Vec3::ZERO, 0.1), rotation);
}

#[test]
fn face_completes_turn_when_step_is_long_enough() {
    let direction = Vec3::new(1.0, 0.0, 1.0);
    let target = look_rotation(direction).unwrap();
    let faced = stepper().face(Quat::IDENTITY, direction, 1.0);
    assert!(faced.angle_between(target) < 1e-3);
}

#[test]
fn face_turns_partially_on_short_steps() {
    let direction = Vec3::X;
    let target = look_rotation(direction).unwrap();
    let faced = stepper().face(Quat::IDENTITY, direction, 0.05);
    let remaining = faced.angle_between(target);
    assert!(remaining > 0.1);
    assert!(remaining < Quat::IDENTITY.angle_between(target));
}

#[test]
fn rejects_non_positive_caps() {
    let err = MotionStepper::new(1.0, 0.0, 5.0).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NonPositive {
            field: "agent.max_speed",
            ..
        }
    ));
}
