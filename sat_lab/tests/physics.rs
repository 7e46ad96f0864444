use glam::{Quat, Vec3};
use sat_lab::physics::{Body, GravitySet, Motion, SceneError};
use sat_lab::satellite::Satellite;
use std::f32::consts::FRAC_PI_2;

/// Build a two-body set separated by `dist` along x
fn two_body_set(dist: f32, m1: f32, m2: f32, g: f32) -> GravitySet {
    let mut set = GravitySet::new(g);
    set.bodies.push(
        Body::new(Vec3::new(-dist / 2.0, 0.0, 0.0), Vec3::ZERO, m1).with_name("a"),
    );
    set.bodies.push(
        Body::new(Vec3::new(dist / 2.0, 0.0, 0.0), Vec3::ZERO, m2).with_name("b"),
    );
    set
}

// ============================================================================
// Gravity forces
// ============================================================================

#[test]
fn two_unit_masses_at_distance_two_pull_with_quarter_force() {
    let set = two_body_set(2.0, 1.0, 1.0, 1.0);
    let forces = set.gravity_forces();

    // F = G*m1*m2/r^2 = 1/4, attraction along the separation axis
    assert!((forces[0].length() - 0.25).abs() < 1e-6);
    assert!((forces[0] - Vec3::new(0.25, 0.0, 0.0)).length() < 1e-6);
    assert!((forces[1] - Vec3::new(-0.25, 0.0, 0.0)).length() < 1e-6);
}

#[test]
fn pairwise_forces_obey_newtons_third_law() {
    let set = two_body_set(1.7, 2.0, 3.0, 0.1);
    let forces = set.gravity_forces();

    assert!((forces[0] + forces[1]).length() < 1e-6);
    assert!(forces[0].length() > 0.0);
}

#[test]
fn force_magnitude_matches_inverse_square_law() {
    let set = two_body_set(3.0, 5.0, 7.0, 0.5);
    let forces = set.gravity_forces();

    let expected = 0.5 * 5.0 * 7.0 / 9.0;
    assert!((forces[0].length() - expected).abs() < 1e-4);
}

#[test]
fn balanced_outer_masses_cancel_on_the_center_body() {
    let mut set = GravitySet::new(1.0);
    set.bodies.push(Body::new(Vec3::new(-4.0, 0.0, 0.0), Vec3::ZERO, 10.0));
    set.bodies.push(Body::new(Vec3::ZERO, Vec3::ZERO, 1.0).with_name("center"));
    set.bodies.push(Body::new(Vec3::new(4.0, 0.0, 0.0), Vec3::ZERO, 10.0));

    let forces = set.gravity_forces();
    assert!(forces[1].length() < 1e-6);
}

#[test]
fn net_force_is_the_sum_over_all_other_bodies() {
    let mut set = GravitySet::new(1.0);
    set.bodies.push(Body::new(Vec3::ZERO, Vec3::ZERO, 1.0));
    set.bodies.push(Body::new(Vec3::new(2.0, 0.0, 0.0), Vec3::ZERO, 1.0));
    set.bodies.push(Body::new(Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO, 1.0));

    let forces = set.gravity_forces();
    // Two independent 0.25 pulls at right angles on body 0
    let expected = Vec3::new(0.25, 0.25, 0.0);
    assert!((forces[0] - expected).length() < 1e-6);
}

// ============================================================================
// Degenerate geometry
// ============================================================================

#[test]
fn coincident_pair_contributes_no_force_and_no_nan() {
    let mut set = GravitySet::new(1.0);
    set.bodies.push(Body::new(Vec3::ONE, Vec3::ZERO, 1.0));
    set.bodies.push(Body::new(Vec3::ONE, Vec3::ZERO, 1.0));

    let forces = set.gravity_forces();
    assert_eq!(forces[0], Vec3::ZERO);
    assert_eq!(forces[1], Vec3::ZERO);

    set.step(0.01);
    for body in &set.bodies {
        assert!(body.position.is_finite());
        assert!(body.velocity.is_finite());
    }
}

#[test]
fn validate_rejects_non_positive_mass() {
    let mut set = GravitySet::new(1.0);
    set.bodies.push(Body::new(Vec3::ZERO, Vec3::ZERO, 0.0).with_name("ghost"));

    match set.validate() {
        Err(SceneError::NonPositiveMass { body, .. }) => assert_eq!(body, "ghost"),
        other => panic!("expected NonPositiveMass, got {other:?}"),
    }
}

#[test]
fn validate_rejects_coincident_bodies() {
    let mut set = two_body_set(2.0, 1.0, 1.0, 1.0);
    set.bodies[1].position = set.bodies[0].position;

    assert!(matches!(
        set.validate(),
        Err(SceneError::CoincidentBodies { .. })
    ));
}

#[test]
fn valid_set_passes_validation() {
    let set = two_body_set(2.0, 1.0, 1.0, 1.0);
    assert!(set.validate().is_ok());
}

// ============================================================================
// Integration
// ============================================================================

#[test]
fn one_step_applies_force_over_mass_times_dt() {
    let mut set = two_body_set(2.0, 1.0, 1.0, 1.0);
    let dt = 0.01;
    set.step(dt);

    // v = F/m * dt with F = 0.25; both bodies fall toward each other
    assert!((set.bodies[0].velocity.x - 0.25 * dt).abs() < 1e-6);
    assert!((set.bodies[1].velocity.x + 0.25 * dt).abs() < 1e-6);
    assert!(set.bodies[0].position.x > -1.0);
    assert!(set.bodies[1].position.x < 1.0);
}

#[test]
fn externally_integrated_body_keeps_its_force_and_does_not_move() {
    let mut set = two_body_set(2.0, 1.0, 1.0, 1.0);
    set.bodies[0].motion = Motion::External;
    let start = set.bodies[0].position;

    set.step(0.01);

    assert_eq!(set.bodies[0].position, start);
    assert_eq!(set.bodies[0].velocity, Vec3::ZERO);
    // The accumulated net force is waiting for the backend
    let force = set.bodies[0].take_force();
    assert!((force.x - 0.25).abs() < 1e-6);
    assert_eq!(set.bodies[0].force, Vec3::ZERO);
}

#[test]
fn applied_force_is_additive_on_top_of_gravity() {
    let mut set = GravitySet::new(1.0);
    set.bodies.push(Body::new(Vec3::ZERO, Vec3::ZERO, 2.0));

    let dt = 0.5;
    set.bodies[0].apply_force(Vec3::new(4.0, 0.0, 0.0));
    set.step(dt);

    // No gravity partners: v = F/m * dt = 1.0
    assert!((set.bodies[0].velocity.x - 1.0).abs() < 1e-6);
    // Accumulator cleared after the step
    assert_eq!(set.bodies[0].force, Vec3::ZERO);
}

#[test]
fn applied_torque_turns_a_self_integrated_body() {
    let mut set = GravitySet::new(1.0);
    set.bodies.push(Body::new(Vec3::ZERO, Vec3::ZERO, 1.0));

    set.bodies[0].apply_torque(Vec3::new(0.0, 1.0, 0.0));
    set.step(0.1);
    set.step(0.1);

    let turned = set.bodies[0].orientation * Vec3::NEG_Z;
    assert!((turned - Vec3::NEG_Z).length() > 1e-4);
    assert!(set.bodies[0].orientation.is_finite());
    assert!((set.bodies[0].orientation.length() - 1.0).abs() < 1e-4);
}

// ============================================================================
// Satellite commands
// ============================================================================

#[test]
fn satellite_thrust_is_rotated_into_world_space() {
    let mut set = GravitySet::new(1.0);
    set.bodies.push(
        Body::new(Vec3::ZERO, Vec3::ZERO, 1.0)
            .with_name("Sat01")
            .with_orientation(Quat::from_rotation_y(FRAC_PI_2)),
    );
    let sat = Satellite::new(0);

    // Local -Z thrust on a 90-degree-yawed body points along world -X
    sat.apply_commands(&mut set, Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO);
    let force = set.bodies[0].force;
    assert!(force.x < 0.0);
    assert!(force.z.abs() < 1e-4);
    assert!((force.length() - sat.thrust_strength).abs() < 1e-4);
}

#[test]
fn satellite_commands_accumulate_into_the_same_step() {
    let mut set = two_body_set(2.0, 1.0, 1.0, 1.0);
    let sat = Satellite::new(0);

    sat.apply_commands(&mut set, Vec3::new(0.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 0.0));
    let dt = 0.01;
    set.step(dt);

    // Gravity pulled along +x while the thruster pushed along -z
    assert!(set.bodies[0].velocity.x > 0.0);
    assert!(set.bodies[0].velocity.z < 0.0);
    assert!(set.bodies[0].angular_velocity.length() > 0.0);
}
