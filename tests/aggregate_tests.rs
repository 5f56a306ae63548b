use sprung::{
    ColorSpring, Color, EventLog, NoOpObserver, ScalarSpring, Spring, SpringAggregate, SpringConfig,
    SpringError, Vec4, Vector4Spring,
};

#[test]
fn common_force_and_drag_override_members() {
    let mut a: Vector4Spring<f64> = Spring::new(Vec4::new(0.0, 0.0, 0.0, 0.0));
    a.set_force_per_component(Vec4::new(10.0, 50.0, 200.0, 900.0));
    a.set_common_force_and_drag(true);
    a.set_common_force(300.0);
    a.set_common_drag(20.0);
    a.set_target(Vec4::new(1.0, 1.0, 1.0, 1.0));

    let config = SpringConfig::new();
    for _ in 0..10 {
        a.update(1.0 / 60.0, &config, &mut NoOpObserver);
        a.commit_candidates();
    }
    let v = a.current_value();
    assert_eq!(v.x, v.y);
    assert_eq!(v.y, v.z);
    assert_eq!(v.z, v.w);

    a.set_common_force_and_drag(false);
    for _ in 0..10 {
        a.update(1.0 / 60.0, &config, &mut NoOpObserver);
        a.commit_candidates();
    }
    let v = a.current_value();
    assert!(v.x != v.w);
}

#[test]
fn force_change_takes_effect_next_update() {
    let mut slow: Vector4Spring<f64> = Spring::with_force_and_drag(Vec4::new(0.0, 0.0, 0.0, 0.0), 10.0, 1.0);
    let mut fast = slow.clone();
    slow.set_target(Vec4::new(1.0, 1.0, 1.0, 1.0));
    fast.set_target(Vec4::new(1.0, 1.0, 1.0, 1.0));
    let config = SpringConfig::new();
    slow.update(1.0 / 60.0, &config, &mut NoOpObserver);
    fast.update(1.0 / 60.0, &config, &mut NoOpObserver);

    fast.set_force(500.0);
    slow.update(1.0 / 60.0, &config, &mut NoOpObserver);
    fast.update(1.0 / 60.0, &config, &mut NoOpObserver);
    assert!(fast.candidate_value().x > slow.candidate_value().x);
}

#[test]
fn wrong_member_count_is_repaired_on_update() {
    let mut aggregate: SpringAggregate<f64> = SpringAggregate::new(4);
    aggregate.replace_members((0..2).map(|_| ScalarSpring::new(3.0)).collect());
    let mut log = EventLog::new();
    aggregate.update(1.0 / 60.0, &SpringConfig::new(), &mut log);

    assert_eq!(aggregate.len(), 4);
    assert_eq!(log.faults(), &[SpringError::SizeMismatch { expected: 4, found: 2 }]);
    assert!(aggregate.members().iter().all(|m| m.current_value == 0.0));
}

#[test]
fn check_correct_size_repairs_typed_spring() {
    let mut spring: ColorSpring<f64> = Spring::new(Color::white());
    spring.aggregate_mut().replace_members((0..7).map(|_| ScalarSpring::default()).collect());
    let mut log = EventLog::new();
    assert!(spring.check_correct_size(&mut log));
    assert_eq!(spring.aggregate().len(), 4);
    assert_eq!(spring.current_value(), Color::transparent());
    assert!(!spring.check_correct_size(&mut log));
    assert_eq!(log.faults().len(), 1);
}

#[test]
fn numerical_fault_is_isolated_to_one_member() {
    let mut spring: Vector4Spring<f64> = Spring::new(Vec4::new(0.0, 0.0, 0.0, 0.0));
    spring.set_target(Vec4::new(1.0, 1.0, 1.0, 1.0));
    spring.aggregate_mut().set_current_value(2, f64::INFINITY);

    let mut log = EventLog::new();
    spring.update(1.0 / 60.0, &SpringConfig::new(), &mut log);
    spring.commit_candidates();

    let v = spring.current_value();
    assert_eq!(v.z, 1.0, "faulty member snaps to target");
    assert_eq!(spring.velocity().z, 0.0);
    assert!(v.x > 0.0 && v.x < 1.0);
    assert_eq!(v.x, v.w);
    assert!(matches!(log.faults(), [SpringError::NonFiniteState { index: 2, .. }]));
}

#[test]
fn one_faulty_aggregate_does_not_affect_another() {
    let mut broken: Vector4Spring<f64> = Spring::new(Vec4::new(0.0, 0.0, 0.0, 0.0));
    let mut healthy = broken.clone();
    broken.set_current_value(Vec4::new(f64::NAN, f64::NAN, f64::NAN, f64::NAN));
    healthy.set_target(Vec4::new(1.0, 1.0, 1.0, 1.0));

    let mut log = EventLog::new();
    let config = SpringConfig::new();
    broken.update(1.0 / 60.0, &config, &mut log);
    healthy.update(1.0 / 60.0, &config, &mut log);
    broken.commit_candidates();
    healthy.commit_candidates();

    assert_eq!(log.faults().len(), 4);
    assert_eq!(broken.current_value(), Vec4::new(0.0, 0.0, 0.0, 0.0));
    assert!(healthy.current_value().x > 0.0);
}

#[test]
fn commit_is_separate_from_update() {
    let mut spring: Vector4Spring<f64> = Spring::new(Vec4::new(0.0, 0.0, 0.0, 0.0));
    spring.set_target(Vec4::new(1.0, 2.0, 3.0, 4.0));
    spring.update(1.0 / 60.0, &SpringConfig::new(), &mut NoOpObserver);
    assert_eq!(spring.current_value(), Vec4::new(0.0, 0.0, 0.0, 0.0));
    let candidate = spring.candidate_value();
    spring.commit_candidates();
    assert_eq!(spring.current_value(), candidate);
}

#[test]
fn disabling_takes_effect_on_next_update() {
    let mut spring: Vector4Spring<f64> = Spring::new(Vec4::new(0.0, 0.0, 0.0, 0.0));
    spring.set_target(Vec4::new(1.0, 1.0, 1.0, 1.0));
    spring.update(1.0 / 60.0, &SpringConfig::new(), &mut NoOpObserver);
    spring.set_spring_enabled(false);
    spring.commit_candidates();
    let frozen = spring.current_value();
    assert!(frozen.x > 0.0);
    for _ in 0..10 {
        spring.update(1.0 / 60.0, &SpringConfig::new(), &mut NoOpObserver);
        spring.commit_candidates();
    }
    assert_eq!(spring.current_value(), frozen);
}

#[test]
fn add_velocity_nudges_a_resting_spring() {
    let mut spring: Vector4Spring<f64> = Spring::new(Vec4::new(0.0, 0.0, 0.0, 0.0));
    spring.add_velocity(Vec4::new(5.0, 0.0, 0.0, -5.0));
    spring.update(1.0 / 60.0, &SpringConfig::new(), &mut NoOpObserver);
    spring.commit_candidates();
    let v = spring.current_value();
    assert!(v.x > 0.0);
    assert_eq!(v.y, 0.0);
    assert!(v.w < 0.0);
}
