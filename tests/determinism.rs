use sprung::{
    NoOpObserver, Quat, RotationSpring, Spring, SpringConfig, Vec3, Vector3Spring,
};

#[test]
fn vector_spring_deterministic() {
    let config = SpringConfig::new();
    let results: Vec<_> = (0..10).map(|_| {
        let mut spring: Vector3Spring<f32> = Spring::new(Vec3::new(0.0, 0.0, 0.0));
        spring.set_target(Vec3::new(10.0, 5.0, -3.0));
        for _ in 0..500 {
            spring.update(1.0 / 60.0, &config, &mut NoOpObserver);
            spring.commit_candidates();
        }
        spring.current_value()
    }).collect();

    for r in &results[1..] {
        assert_eq!(results[0].x, r.x);
        assert_eq!(results[0].y, r.y);
        assert_eq!(results[0].z, r.z);
    }
}

#[test]
fn analytical_spring_deterministic() {
    let config = SpringConfig::new().with_always_analytical();
    let results: Vec<_> = (0..10).map(|_| {
        let mut spring: Vector3Spring<f64> =
            Spring::with_force_and_drag(Vec3::new(0.0, 0.0, 0.0), 400.0, 12.0);
        spring.set_target(Vec3::new(1.0, -2.0, 0.5));
        for _ in 0..120 {
            spring.update(1.0 / 60.0, &config, &mut NoOpObserver);
            spring.commit_candidates();
        }
        spring.current_value()
    }).collect();

    for r in &results[1..] {
        assert_eq!(results[0], *r);
    }
}

#[test]
fn rotation_spring_deterministic() {
    let config = SpringConfig::new();
    let target = Quat::from_axis_angle(Vec3::new(0.3, 1.0, 0.2), 2.0);
    let results: Vec<_> = (0..5).map(|_| {
        let mut spring: RotationSpring<f64> = RotationSpring::default();
        spring.set_target(target);
        for _ in 0..240 {
            spring.update(1.0 / 60.0, &config, &mut NoOpObserver);
            spring.commit_candidates();
        }
        spring.current_value()
    }).collect();

    for r in &results[1..] {
        assert_eq!(results[0], *r);
    }
}
