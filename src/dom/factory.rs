use crate::{
    catalog::rays::{LightSourceDefinition, Placement, RayDefinition},
    config::options::EffectOptions,
    dom::host::{ElementSpec, Host},
    foundation::core::css_number,
};

/// Rotation of the whole ray field when it is not centered.
pub const CONTAINER_TILT_DEG: f64 = -33.0;

const FIELD_SIZE: &str = "1200px";

/// Field rotation in degrees that the geometry resolver composes with each ray's own rotation.
pub fn container_rotation_deg(centered: bool) -> f64 {
    if centered { 0.0 } else { CONTAINER_TILT_DEG }
}

/// `--token` becomes `var(--token)`; anything else is already a CSS color.
pub fn resolve_color(token: &str) -> String {
    let token = token.trim();
    if token.starts_with("--") {
        format!("var({token})")
    } else {
        token.to_string()
    }
}

/// Radial glow fading from `color` at the center to transparent at the edge.
pub fn glow_gradient(color: &str) -> String {
    let c = resolve_color(color);
    format!(
        "radial-gradient(50% 50% at 50% 50%, {c} 0%, color-mix(in srgb, {c} 0%, transparent 100%) 100%)"
    )
}

/// CSS `rotate()` transform for `deg` degrees.
pub fn rotate(deg: f64) -> String {
    format!("rotate({}deg)", css_number(deg))
}

fn positioned(spec: ElementSpec, placement: &Placement, color: &str) -> ElementSpec {
    let mut spec = spec
        .style("position", "absolute")
        .style("z-index", "1")
        .style("overflow", "hidden")
        .style("background", glow_gradient(color));
    for (property, value) in placement.declarations() {
        spec = spec.style(property, value);
    }
    spec
}

/// Element description of one catalog ray, with the glow background in `color`.
///
/// Animated rays also carry the `animated` class and a `will-change` hint.
pub fn ray_element_spec(def: &RayDefinition, color: &str) -> ElementSpec {
    let mut spec = ElementSpec::div().class("ray");
    if def.animated {
        spec = spec.class("animated");
    }
    let mut spec = positioned(spec, &def.placement, color)
        .style("transform-origin", "100% 0% 0px")
        .style("transform", rotate(def.rotation));
    if def.animated {
        spec = spec.style("will-change", "transform, opacity");
    }
    spec
}

/// Element description of one light source. Its opacity is fixed for the effect's lifetime.
pub fn light_source_element_spec(def: &LightSourceDefinition, color: &str) -> ElementSpec {
    positioned(ElementSpec::div().class("light-source"), &def.placement, color)
        .style("flex", "none")
        .style("opacity", css_number(def.opacity))
}

/// Materialize [`ray_element_spec`] through `host`. The element is returned unattached.
pub fn create_ray_element<H: Host>(host: &mut H, def: &RayDefinition, color: &str) -> H::Node {
    host.create_element(&ray_element_spec(def, color))
}

/// Materialize [`light_source_element_spec`] through `host`. The element is returned unattached.
pub fn create_light_source_element<H: Host>(
    host: &mut H,
    def: &LightSourceDefinition,
    color: &str,
) -> H::Node {
    host.create_element(&light_source_element_spec(def, color))
}

/// Styles of the element hosting the field. Everything is inline so no stylesheet is needed.
///
/// The field is a fixed 1200px square hung above the page top. Only the tilted layout sets a
/// `left` offset.
pub fn container_styles(opts: &EffectOptions) -> Vec<(&'static str, String)> {
    let field_mask = if opts.centered {
        "radial-gradient(50% 50% at 40% 50%, rgb(0, 0, 0) 0%, rgba(0, 0, 0, 1) 0%, transparent 100%)"
    } else {
        "radial-gradient(90% 50% at 60% 50%, rgb(0, 0, 0) 0%, rgba(0, 0, 0, 1) 0%, transparent 100%)"
    };
    let mut styles = vec![
        ("position", "absolute".to_string()),
        ("overflow", "hidden".to_string()),
        ("z-index", "1".to_string()),
        ("flex", "none".to_string()),
        ("pointer-events", "none".to_string()),
        ("width", FIELD_SIZE.to_string()),
        ("height", FIELD_SIZE.to_string()),
        ("min-width", "100vw".to_string()),
        ("top", "-620px".to_string()),
    ];
    if !opts.centered {
        styles.push(("left", "-20rem".to_string()));
    }
    styles.extend([
        ("filter", format!("blur({})", opts.blur.trim())),
        ("mix-blend-mode", opts.blend_mode.trim().to_string()),
        ("transform", rotate(container_rotation_deg(opts.centered))),
        ("mask-image", field_mask.to_string()),
        ("-webkit-mask-image", field_mask.to_string()),
    ]);
    styles
}

/// Apply [`container_styles`] to `container`, dropping a `left` offset left over from a tilted
/// layout.
pub fn style_container<H: Host>(host: &mut H, container: &H::Node, opts: &EffectOptions) {
    host.set_class_name(container, "ray-field");
    host.set_attribute(container, "aria-hidden", "true");
    if opts.centered {
        host.remove_style(container, "left");
    }
    for (property, value) in container_styles(opts) {
        host.set_style(container, property, &value);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/factory.rs"]
mod tests;
