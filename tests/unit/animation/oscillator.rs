use super::*;

const EPS: f64 = 1e-9;

fn timing(phase_offset: f64, duration_ms: f64) -> RayTiming {
    RayTiming {
        phase_offset,
        duration_ms,
    }
}

#[test]
fn outputs_stay_within_bounds() {
    let scale = Bounds::new(0.6, 1.5).unwrap();
    let opacity = Bounds::new(0.2, 0.9).unwrap();
    let mut rng = SplitMix64::new(3);
    for _ in 0..200 {
        let t = RayTiming::sample(&mut rng, Bounds::new(3000.0, 6000.0).unwrap());
        for ts in [0.0, 16.7, 1234.5, 99_999.0] {
            let o = advance(ts, t, 4.0, scale, opacity);
            assert!(o.scale >= scale.min - EPS && o.scale <= scale.max + EPS);
            assert!(o.opacity >= opacity.min - EPS && o.opacity <= opacity.max + EPS);
        }
    }
}

#[test]
fn period_is_duration_over_speed() {
    let scale = Bounds::new(0.6, 1.0).unwrap();
    let opacity = Bounds::new(0.5, 1.0).unwrap();
    let t = timing(1.1, 4000.0);
    for speed in [0.5, 1.0, 4.0] {
        for ts in [0.0, 250.0, 3333.0] {
            let a = advance(ts, t, speed, scale, opacity);
            let b = advance(ts + t.duration_ms / speed, t, speed, scale, opacity);
            assert!((a.scale - b.scale).abs() < 1e-9);
            assert!((a.opacity - b.opacity).abs() < 1e-9);
        }
    }
}

#[test]
fn quarter_turn_peaks_at_max() {
    let scale = Bounds::new(0.0, 1.0).unwrap();
    let opacity = Bounds::new(0.0, 1.0).unwrap();
    let o = advance(1000.0, timing(0.0, 4000.0), 1.0, scale, opacity);
    assert!((o.scale - 1.0).abs() < 1e-12);
    assert!((progress_factor(0.0, timing(0.0, 4000.0), 1.0) - 0.5).abs() < 1e-12);
}

#[test]
fn coincident_bounds_degenerate_to_constants() {
    let scale = Bounds { min: 1.0, max: 1.0 };
    let opacity = Bounds { min: 0.5, max: 0.5 };
    for ts in [0.0, 17.0, 5000.0, 123_456.0] {
        let o = advance(ts, timing(2.0, 3500.0), 4.0, scale, opacity);
        assert_eq!(o.scale, 1.0);
        assert_eq!(o.opacity, 0.5);
    }
}

#[test]
fn zero_speed_freezes_at_phase() {
    let scale = Bounds::new(0.0, 1.0).unwrap();
    let opacity = Bounds::new(0.0, 1.0).unwrap();
    let t = timing(0.3, 3000.0);
    let a = advance(0.0, t, 0.0, scale, opacity);
    let b = advance(10_000.0, t, 0.0, scale, opacity);
    assert_eq!(a, b);
}

#[test]
fn sampled_timing_respects_ranges() {
    let mut rng = SplitMix64::new(11);
    for _ in 0..500 {
        let t = RayTiming::sample(&mut rng, Bounds::new(3000.0, 6000.0).unwrap());
        assert!((3000.0..6000.0).contains(&t.duration_ms));
        assert!((0.0..TAU).contains(&t.phase_offset));
    }
}

#[test]
fn static_rays_do_not_step() {
    let opts = EffectOptions::default();
    let mut s = RayRuntimeState::STATIC;
    assert_eq!(s.step(500.0, &opts), None);
    assert_eq!(s, RayRuntimeState::STATIC);
}

#[test]
fn animated_rays_write_back_their_state() {
    let opts = EffectOptions {
        speed_multiplier: 1.0,
        ..EffectOptions::default()
    };
    let mut s = RayRuntimeState::animated(timing(0.0, 4000.0), &opts);
    assert_eq!(s.opacity, opts.min_opacity);
    let o = s.step(1000.0, &opts).unwrap();
    assert_eq!(s.opacity, o.opacity);
    assert_eq!(s.scale, o.scale);
    assert!((s.opacity - opts.max_opacity).abs() < 1e-9);
}

#[test]
fn default_speed_cycles_over_tau_duration_quarters() {
    let opts = EffectOptions::default();
    let t = timing(0.4, 3000.0);
    let cycle_ms = TAU * t.duration_ms / 4.0;
    let mut s = RayRuntimeState::animated(t, &opts);
    for ts in [0.0, 120.0, 2750.0] {
        let a = s.step(ts, &opts).unwrap();
        let b = s.step(ts + cycle_ms, &opts).unwrap();
        assert!((a.opacity - b.opacity).abs() < 1e-9);
        assert!((a.scale - b.scale).abs() < 1e-9);
    }
    // half a cycle later the phase is mirrored, not repeated
    let a = s.step(1000.0, &opts).unwrap();
    let b = s.step(1000.0 + cycle_ms / 2.0, &opts).unwrap();
    assert!((progress_factor(1000.0, t, opts.speed_multiplier)
        + progress_factor(1000.0 + cycle_ms / 2.0, t, opts.speed_multiplier)
        - 1.0)
        .abs()
        < 1e-9);
    assert_ne!(a, b);
}
