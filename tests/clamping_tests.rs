use sprung::{EventLog, FloatSpring, NoOpObserver, Scalar, Spring, SpringConfig, Vec3, Vector3Spring};

fn bounded(stop_on_clamp: bool, clamp_target: bool) -> FloatSpring<f64> {
    let mut spring: FloatSpring<f64> = Spring::with_force_and_drag(Scalar(0.0), 150.0, 10.0);
    spring.set_min_value(0.0);
    spring.set_max_value(1.0);
    spring.set_clamp_current_value(true);
    spring.set_stop_on_clamp(stop_on_clamp);
    spring.set_clamp_target(clamp_target);
    spring
}

#[test]
fn saturates_at_bound_and_stops_dead() {
    let mut spring = bounded(true, true);
    spring.set_target(Scalar(5.0));
    let config = SpringConfig::new();

    let mut first_hit = None;
    for tick in 0..300 {
        spring.update(1.0 / 60.0, &config, &mut NoOpObserver);
        spring.commit_candidates();
        if spring.current_value().0 == 1.0 && first_hit.is_none() {
            assert_eq!(spring.velocity().0, 0.0, "velocity must stop on the clamping tick");
            first_hit = Some(tick);
        }
        assert!(spring.current_value().0 <= 1.0);
    }
    assert!(first_hit.is_some());
    assert_eq!(spring.target().0, 1.0);
    assert_eq!(spring.current_value().0, 1.0);
    assert_eq!(spring.velocity().0, 0.0);
}

#[test]
fn unclamped_target_keeps_pushing_against_bound() {
    let mut spring = bounded(true, false);
    spring.set_target(Scalar(5.0));
    let config = SpringConfig::new();
    for _ in 0..120 {
        spring.update(1.0 / 60.0, &config, &mut NoOpObserver);
        spring.commit_candidates();
    }
    assert_eq!(spring.target().0, 5.0);
    assert_eq!(spring.current_value().0, 1.0);
    assert!(spring.is_clamped());
    assert_eq!(spring.velocity().0, 0.0);
}

#[test]
fn clamp_without_stop_keeps_velocity() {
    let mut spring = bounded(false, false);
    spring.set_target(Scalar(5.0));
    let config = SpringConfig::new();
    let mut clamped_with_motion = false;
    for _ in 0..120 {
        spring.update(1.0 / 60.0, &config, &mut NoOpObserver);
        spring.commit_candidates();
        if spring.is_clamped() && spring.velocity().0 != 0.0 {
            clamped_with_motion = true;
        }
    }
    assert!(clamped_with_motion);
    assert_eq!(spring.current_value().0, 1.0);
}

#[test]
fn values_stay_within_bounds_for_any_settings() {
    let config_sets = [SpringConfig::new(), SpringConfig::new().with_always_analytical()];
    for config in &config_sets {
        for &(force, drag) in &[(30.0, 0.0), (150.0, 10.0), (5000.0, 5.0), (20000.0, 1.0)] {
            for &target in &[-3.0, 0.5, 7.0] {
                let mut spring: Vector3Spring<f64> =
                    Spring::with_force_and_drag(Vec3::new(0.2, 0.5, 0.8), force, drag);
                spring.set_min_value(-1.0);
                spring.set_max_value(2.0);
                spring.set_clamp_current_value(true);
                spring.set_target(Vec3::new(target, -target, target * 0.5));
                spring.add_velocity(Vec3::new(50.0, -50.0, 10.0));
                for _ in 0..200 {
                    spring.update(1.0 / 60.0, config, &mut NoOpObserver);
                    spring.commit_candidates();
                    let v = spring.current_value();
                    for c in [v.x, v.y, v.z] {
                        assert!((-1.0..=2.0).contains(&c), "{} escaped bounds", c);
                    }
                }
            }
        }
    }
}

#[test]
fn inverted_bounds_are_swapped() {
    let mut spring: FloatSpring<f64> = Spring::new(Scalar(0.5));
    spring.set_min_value(1.0);
    spring.set_max_value(0.0);
    spring.set_clamp_current_value(true);
    spring.set_target(Scalar(4.0));
    let config = SpringConfig::new();
    for _ in 0..120 {
        spring.update(1.0 / 60.0, &config, &mut NoOpObserver);
        spring.commit_candidates();
    }
    assert_eq!(spring.current_value().0, 1.0);
}

#[test]
fn disabling_clamping_lets_value_through() {
    let mut spring = bounded(true, true);
    spring.set_clamping_enabled(false);
    spring.set_target(Scalar(5.0));
    let mut log = EventLog::new();
    for _ in 0..300 {
        spring.update(1.0 / 60.0, &SpringConfig::new(), &mut log);
        spring.commit_candidates();
    }
    assert!((spring.current_value().0 - 5.0).abs() < 0.005);
    assert!(!spring.is_clamped());
}

#[test]
fn per_component_clamp_flags() {
    let mut spring: Vector3Spring<f64> = Spring::new(Vec3::new(0.0, 0.0, 0.0));
    spring.set_max_value(1.0);
    spring.set_clamping_at(1, (false, true, true));
    spring.set_target(Vec3::new(3.0, 3.0, 3.0));
    let config = SpringConfig::new();
    for _ in 0..300 {
        spring.update(1.0 / 60.0, &config, &mut NoOpObserver);
        spring.commit_candidates();
    }
    let v = spring.current_value();
    assert!((v.x - 3.0).abs() < 0.005);
    assert_eq!(v.y, 1.0);
    assert!((v.z - 3.0).abs() < 0.005);
}

#[test]
fn clamped_target_stays_clamped_after_widening_bounds() {
    let mut spring = bounded(false, true);
    spring.set_target(Scalar(5.0));
    spring.update(1.0 / 60.0, &SpringConfig::new(), &mut NoOpObserver);
    assert_eq!(spring.target().0, 1.0);

    spring.set_max_value(10.0);
    spring.update(1.0 / 60.0, &SpringConfig::new(), &mut NoOpObserver);
    assert_eq!(spring.target().0, 1.0);
}
