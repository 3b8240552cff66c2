use super::*;
use crate::catalog::rays::Placement;
use crate::dom::host::ElementSpec;
use crate::dom::memory::MemoryHost;

fn def(rotation: f64, width: Option<&str>) -> RayDefinition {
    RayDefinition {
        placement: Placement {
            width: width.map(str::to_string),
            ..Placement::default()
        },
        rotation,
        animated: false,
    }
}

fn centered_rect(cx: f64, cy: f64, w: f64, h: f64) -> Rect {
    Rect::new(cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0)
}

#[test]
fn vertical_ray_gets_horizontal_band() {
    let ray = centered_rect(500.0, 100.0, 36.0, 400.0);
    let target = centered_rect(500.0, 600.0, 800.0, 120.0);
    let g = resolve_ray_geometry(ray, target, 0.0, 0.0, 36.0);
    assert_eq!(g.angle, 90.0);
    // purely vertical separation lies along the ray, not across it
    assert!(g.offset.abs() < 1e-9);
    assert_eq!(g.width, 36.0);
}

#[test]
fn horizontal_separation_projects_with_sign() {
    let target = centered_rect(500.0, 600.0, 800.0, 120.0);
    let right = resolve_ray_geometry(centered_rect(640.0, 100.0, 20.0, 300.0), target, 0.0, 0.0, 20.0);
    assert!((right.offset - 140.0).abs() < 1e-9);
    let left = resolve_ray_geometry(centered_rect(430.0, 100.0, 20.0, 300.0), target, 0.0, 0.0, 20.0);
    assert!((left.offset + 70.0).abs() < 1e-9);
}

#[test]
fn rotations_compose_before_projection() {
    assert_eq!(gradient_angle(-33.0, 25.0), 82.0);

    // 90deg total rotation: the ray lies horizontally, so its band runs vertically (180deg = down)
    let target = centered_rect(0.0, 0.0, 100.0, 100.0);
    let ray = centered_rect(0.0, 50.0, 300.0, 20.0);
    let g = resolve_ray_geometry(ray, target, 45.0, 45.0, 20.0);
    assert_eq!(g.angle, 180.0);
    assert!((g.offset - 50.0).abs() < 1e-9);
}

#[test]
fn declared_width_falls_back_to_zero() {
    assert_eq!(declared_width(&def(0.0, Some("36px"))), 36.0);
    assert_eq!(declared_width(&def(0.0, Some("calc(10% + 2px)"))), 0.0);
    assert_eq!(declared_width(&def(0.0, Some("NaN"))), 0.0);
    assert_eq!(declared_width(&def(0.0, None)), 0.0);
}

#[test]
fn recompute_needs_a_measurable_target() {
    let mut host = MemoryHost::new();
    let target = host.create_root("h1");
    let defs = vec![def(0.0, Some("10px"))];
    assert_eq!(recompute(&host, &[], &defs, &target, 0.0), None);

    host.set_rect(target, centered_rect(0.0, 0.0, 10.0, 10.0));
    let g = recompute(&host, &[], &defs, &target, 0.0).unwrap();
    assert_eq!(g, vec![RayGeometry::FALLBACK]);
}

#[test]
fn recompute_uses_fallback_for_unmounted_rays() {
    let mut host = MemoryHost::new();
    let container = host.create_root("div");
    let target = host.create_root("h1");
    host.set_rect(target, centered_rect(200.0, 300.0, 200.0, 50.0));

    let mounted = host.create_element(&ElementSpec::div());
    host.append_child(&container, &mounted);
    host.set_rect(mounted, centered_rect(260.0, 0.0, 24.0, 400.0));
    let detached = host.create_element(&ElementSpec::div());
    host.set_rect(detached, centered_rect(0.0, 0.0, 24.0, 400.0));

    let defs = vec![def(0.0, Some("24px")), def(10.0, Some("24px"))];
    let g = recompute(&host, &[mounted, detached], &defs, &target, 0.0).unwrap();
    assert_eq!(g.len(), 2);
    assert_eq!(g[0].angle, 90.0);
    assert!((g[0].offset - 60.0).abs() < 1e-9);
    assert_eq!(g[1], RayGeometry::FALLBACK);
}

#[test]
fn recompute_is_idempotent_without_layout_change() {
    let mut host = MemoryHost::new();
    let container = host.create_root("div");
    let target = host.create_root("h1");
    host.set_rect(target, centered_rect(400.0, 500.0, 600.0, 80.0));

    let defs: Vec<RayDefinition> = [(-24.0, "35px"), (6.0, "14px"), (18.0, "14px")]
        .into_iter()
        .map(|(r, w)| def(r, Some(w)))
        .collect();
    let nodes: Vec<_> = defs
        .iter()
        .enumerate()
        .map(|(i, _)| {
            let n = host.create_element(&ElementSpec::div());
            host.append_child(&container, &n);
            host.set_rect(n, centered_rect(300.0 + 40.0 * i as f64, 90.0, 30.0, 500.0));
            n
        })
        .collect();

    let a = recompute(&host, &nodes, &defs, &target, -33.0).unwrap();
    let b = recompute(&host, &nodes, &defs, &target, -33.0).unwrap();
    assert_eq!(a, b);
}
