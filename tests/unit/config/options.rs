use super::*;

#[test]
fn defaults_validate() {
    let o = EffectOptions::default();
    assert!(o.validate().is_ok());
    assert_eq!(o.scale_bounds(), Bounds { min: 0.6, max: 1.0 });
    assert_eq!(o.color, "--color-neutral-100");
    assert!((o.speed_multiplier - 4.0 / std::f64::consts::TAU).abs() < 1e-12);
}

#[test]
fn json_uses_camel_case_and_fills_defaults() {
    let o = EffectOptions::from_json(r#"{ "minOpacity": 0.2, "maskSoftness": 8, "centered": true }"#)
        .unwrap();
    assert_eq!(o.min_opacity, 0.2);
    assert_eq!(o.mask_softness, 8.0);
    assert!(o.centered);
    assert_eq!(o.max_opacity, EffectOptions::default().max_opacity);
}

#[test]
fn inverted_bounds_are_rejected() {
    let o = EffectOptions {
        min_scale: 2.0,
        max_scale: 1.0,
        ..EffectOptions::default()
    };
    let err = o.validate().unwrap_err();
    assert!(err.to_string().contains("scale min must be <= max"));
}

#[test]
fn non_finite_and_zero_duration_are_rejected() {
    let nan = EffectOptions {
        mask_intensity: f64::NAN,
        ..EffectOptions::default()
    };
    assert!(nan.validate().is_err());

    let zero = EffectOptions {
        min_duration_ms: 0.0,
        ..EffectOptions::default()
    };
    assert!(zero.validate().is_err());

    let blank = EffectOptions {
        color: "  ".to_string(),
        ..EffectOptions::default()
    };
    assert!(blank.validate().is_err());
}

#[test]
fn merge_replaces_only_present_fields() {
    let base = EffectOptions {
        min_opacity: 0.3,
        seed: Some(9),
        ..EffectOptions::default()
    };
    let patch = OptionsPatch::from_json(r#"{ "color": "red", "speedMultiplier": 2 }"#).unwrap();
    let merged = base.merged(&patch);
    assert_eq!(merged.color, "red");
    assert_eq!(merged.speed_multiplier, 2.0);
    assert_eq!(merged.min_opacity, 0.3);
    assert_eq!(merged.seed, Some(9));
}

#[test]
fn empty_patch_is_identity() {
    let base = EffectOptions::default();
    assert_eq!(base.merged(&OptionsPatch::default()), base);
}
