use super::*;

fn body() -> RigidBody {
    RigidBody::new("ball", Vec3::ONE, 2.0, Vec3::ZERO)
}

#[test]
fn test_new_body_is_still_and_unflagged() {
    let b = body();
    assert_eq!(b.model_id(), "ball");
    assert_eq!(b.instance_id(), "");
    assert_eq!(b.velocity(), Vec3::ZERO);
    assert_eq!(b.acceleration(), Vec3::ZERO);
    assert!(b.states().is_empty());
}

#[test]
fn test_position_and_size_mutators_flag_moved() {
    let mut b = body();
    b.translate(Vec3::X);
    assert!(b.is_moved());
    assert_eq!(b.position(), Vec3::X);

    b.clear_moved();
    b.set_size(Vec3::splat(3.0));
    assert!(b.is_moved());
    assert_eq!(b.size(), Vec3::splat(3.0));
}

#[test]
fn test_apply_force_divides_by_mass() {
    let mut b = body();
    b.apply_force(Vec3::new(4.0, 0.0, 0.0));
    b.apply_acceleration(Vec3::new(0.0, -1.0, 0.0));
    assert_eq!(b.acceleration(), Vec3::new(2.0, -1.0, 0.0));
    assert!(!b.is_moved());
}

#[test]
fn test_apply_impulse() {
    let mut b = body();
    b.apply_impulse(Vec3::new(0.0, 10.0, 0.0), 0.5);
    assert_eq!(b.velocity(), Vec3::new(0.0, 2.5, 0.0));
}

#[test]
fn test_transfer_energy_sign_sets_direction() {
    // 1/2 * m * v^2 = 16 J with m = 2 gives v = 4
    let mut b = body();
    b.transfer_energy(16.0, Vec3::X);
    assert!((b.velocity() - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-6);

    let mut b = body();
    b.transfer_energy(-16.0, Vec3::X);
    assert!((b.velocity() - Vec3::new(-4.0, 0.0, 0.0)).length() < 1e-6);
}

#[test]
fn test_integrate_uses_constant_acceleration() {
    let mut b = body();
    b.set_motion(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, -2.0, 0.0));

    b.integrate(0.5);

    assert_eq!(b.position(), Vec3::new(0.5, -0.25, 0.0));
    assert_eq!(b.velocity(), Vec3::new(1.0, -1.0, 0.0));
    assert!(b.is_moved());
}

#[test]
fn test_integrate_flags_moved_even_at_rest() {
    let mut b = body();
    b.integrate(1.0);
    assert_eq!(b.position(), Vec3::ZERO);
    assert!(b.is_moved());
}
