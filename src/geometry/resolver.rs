//! Projection of each ray onto the mask target's gradient space.
//!
//! The math here works on plain rectangles; [`recompute`] is the thin shell that measures live
//! elements through a [`Host`] and feeds the result in.

use crate::{
    catalog::rays::RayDefinition,
    dom::host::Host,
    foundation::core::{Rect, css_angle_direction, parse_px},
};

/// Where one ray's light band sits relative to the mask target.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RayGeometry {
    /// CSS `linear-gradient` angle in degrees, perpendicular to the ray's long axis.
    pub angle: f64,
    /// Signed distance in px from the target's center to the ray's center along `angle`.
    pub offset: f64,
    /// Declared ray width in px.
    pub width: f64,
}

impl RayGeometry {
    /// Used for rays whose element is not (yet) laid out.
    pub const FALLBACK: Self = Self {
        angle: 0.0,
        offset: 0.0,
        width: 20.0,
    };
}

/// Angle of the band that crosses a ray rotated by `container_rotation_deg + ray_rotation_deg`.
pub fn gradient_angle(container_rotation_deg: f64, ray_rotation_deg: f64) -> f64 {
    container_rotation_deg + ray_rotation_deg + 90.0
}

/// Declared width in px; missing or non-pixel values count as `0`.
pub fn declared_width(def: &RayDefinition) -> f64 {
    def.placement
        .width
        .as_deref()
        .and_then(parse_px)
        .unwrap_or(0.0)
}

/// Project the center of `ray_rect` onto the band normal through the center of `target_rect`.
pub fn resolve_ray_geometry(
    ray_rect: Rect,
    target_rect: Rect,
    container_rotation_deg: f64,
    ray_rotation_deg: f64,
    width: f64,
) -> RayGeometry {
    let angle = gradient_angle(container_rotation_deg, ray_rotation_deg);
    let normal = css_angle_direction(angle);
    let delta = ray_rect.center() - target_rect.center();
    let offset = delta.dot(normal);
    RayGeometry {
        angle,
        offset: if offset.is_finite() { offset } else { 0.0 },
        width: if width.is_finite() { width } else { 0.0 },
    }
}

/// Measure every ray against `target` and rebuild the whole geometry list.
///
/// Returns `None` when the target cannot be measured; geometry is undefined without a target.
/// The result is index-aligned with `defs`; rays without a measurable element get
/// [`RayGeometry::FALLBACK`].
#[tracing::instrument(skip_all, fields(rays = defs.len()))]
pub fn recompute<H: Host>(
    host: &H,
    ray_nodes: &[H::Node],
    defs: &[RayDefinition],
    target: &H::Node,
    container_rotation_deg: f64,
) -> Option<Vec<RayGeometry>> {
    let Some(target_rect) = host.bounding_rect(target) else {
        tracing::debug!("mask target is not laid out; geometry left undefined");
        return None;
    };

    let geometry = defs
        .iter()
        .enumerate()
        .map(|(idx, def)| {
            let Some(rect) = ray_nodes.get(idx).and_then(|n| host.bounding_rect(n)) else {
                return RayGeometry::FALLBACK;
            };
            resolve_ray_geometry(
                rect,
                target_rect,
                container_rotation_deg,
                def.rotation,
                declared_width(def),
            )
        })
        .collect();
    Some(geometry)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/resolver.rs"]
mod tests;
