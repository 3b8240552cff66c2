use super::*;

#[test]
fn standard_catalog_shape() {
    let c = Catalog::standard();
    assert_eq!(c.rays.len(), 10);
    assert_eq!(c.animated_count(), 5);
    assert_eq!(c.light_sources.len(), 3);
    assert!(c.validate().is_ok());
}

#[test]
fn standard_catalog_first_ray_is_vertical_and_animated() {
    let c = Catalog::standard();
    let first = &c.rays[0];
    assert_eq!(first.rotation, 0.0);
    assert!(first.animated);
    assert_eq!(first.placement.width.as_deref(), Some("36px"));
    assert_eq!(first.placement.height.as_deref(), Some("1865px"));
    assert_eq!(first.placement.bottom, None);
}

#[test]
fn declarations_follow_fixed_order_and_skip_missing() {
    let c = Catalog::standard();
    let keys: Vec<&str> = c.rays[1].placement.declarations().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["left", "top", "bottom", "width"]);
}

#[test]
fn json_catalog_uses_flat_placement_keys() {
    let c = Catalog::from_json(
        r#"{
            "rays": [
                { "left": "10px", "top": "0px", "height": "100px", "width": "20px", "rotation": 15, "animated": true },
                { "left": "40px", "top": "0px", "height": "100px", "width": "8px" }
            ]
        }"#,
    )
    .unwrap();
    assert_eq!(c.rays.len(), 2);
    assert_eq!(c.rays[0].rotation, 15.0);
    assert!(!c.rays[1].animated);
    assert_eq!(c.rays[1].rotation, 0.0);
    assert!(c.light_sources.is_empty());
}

#[test]
fn invalid_light_opacity_is_rejected() {
    let light = LightSourceDefinition {
        placement: Placement::default(),
        opacity: 1.5,
    };
    let err = Catalog::new(Vec::new(), vec![light]).unwrap_err();
    assert!(err.to_string().contains("catalog error:"));
}
