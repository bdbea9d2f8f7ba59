use logoloop_wasm::{LoopConfig, MotionController};

fn controller(config: LoopConfig, unit: f64) -> MotionController {
    let mut m = MotionController::new(&config);
    m.set_unit_width(unit);
    m
}

#[test]
fn offset_stays_within_one_unit() {
    let dts = [0.0, 0.001, 0.016, 0.033, 0.25, 1.0, 3.7];
    for speed in [80.0, 400.0, -120.0, 5000.0] {
        let mut m = controller(LoopConfig::default().with_speed(speed), 173.0);
        for step in 0..2000 {
            let dt = dts[step % dts.len()];
            let paused = step % 97 < 20;
            let offset = m.advance(dt, paused);
            assert!(
                (0.0..173.0).contains(&offset),
                "speed={speed} step={step} offset={offset}"
            );
        }
    }
}

#[test]
fn velocity_converges_without_overshoot() {
    let mut m = controller(LoopConfig::default(), 200.0);
    let mut prev = m.velocity();
    for _ in 0..600 {
        m.advance(1.0 / 60.0, false);
        let v = m.velocity();
        assert!(v >= prev, "velocity decreased: {prev} -> {v}");
        assert!(v <= 80.0, "velocity overshot: {v}");
        prev = v;
    }
    assert!((80.0 - prev).abs() < 1e-6);
}

#[test]
fn reverse_speed_converges_from_above() {
    let mut m = controller(LoopConfig::default().with_speed(-50.0), 200.0);
    let mut prev = m.velocity();
    for _ in 0..300 {
        m.advance(1.0 / 60.0, false);
        let v = m.velocity();
        assert!(v <= prev && v >= -50.0);
        prev = v;
    }
}

#[test]
fn pause_and_resume_are_symmetric_and_continuous() {
    let dt = 1.0 / 60.0;
    let mut m = controller(LoopConfig::default(), 300.0);
    for _ in 0..240 {
        m.advance(dt, false);
    }
    let cruising = m.velocity();
    assert!((cruising - 80.0).abs() < 0.01);

    // Each frame can move the track at most velocity * dt; a pause/resume
    // pair must never jump further than that.
    let max_step = 80.0 * dt + 1e-9;
    let mut prev = m.offset();
    let mut check = |m: &mut MotionController, paused: bool| {
        let offset = m.advance(dt, paused);
        let mut step = (offset - prev).abs();
        step = step.min(300.0 - step);
        assert!(step <= max_step, "jump of {step}px");
        prev = offset;
    };

    for _ in 0..240 {
        check(&mut m, true);
    }
    assert!(m.velocity() < 0.01);
    for _ in 0..240 {
        check(&mut m, false);
    }
    assert!((m.velocity() - 80.0).abs() < 0.01);
}

#[test]
fn negative_and_non_finite_dt_do_nothing() {
    let mut m = controller(LoopConfig::default(), 200.0);
    m.advance(0.5, false);
    let (offset, velocity) = (m.offset(), m.velocity());
    m.advance(-0.2, false);
    m.advance(f64::NAN, false);
    assert_eq!(m.offset(), offset);
    assert_eq!(m.velocity(), velocity);
}
