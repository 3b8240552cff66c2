use std::fmt;

use crate::{
    animation::oscillator::RayRuntimeState,
    dom::host::Host,
    foundation::core::css_number,
    geometry::resolver::RayGeometry,
};

/// Channel color of a band's peak. Masks only read alpha; the debug overlay needs a visible hue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandInk {
    /// Black, for `mask-image`.
    Mask,
    /// Magenta, for the debug overlay.
    Debug,
}

impl BandInk {
    fn rgb(self) -> &'static str {
        match self {
            Self::Mask => "0, 0, 0",
            Self::Debug => "255, 0, 170",
        }
    }
}

/// One ray's contribution: a soft line across the target at the ray's projected position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskBand {
    /// Gradient angle in degrees.
    pub angle: f64,
    /// Peak position relative to the target's center, in px.
    pub offset: f64,
    /// Half-width from the peak to full transparency, softness included.
    pub radius: f64,
    /// Peak alpha in `[0, 1]`.
    pub alpha: f64,
}

impl MaskBand {
    /// Band for one ray: `radius = max(2, width / 2) * scale + softness` and
    /// `alpha = clamp(opacity * intensity, 0, 1)`.
    pub fn new(geometry: RayGeometry, state: RayRuntimeState, softness: f64, intensity: f64) -> Self {
        let band_radius = (geometry.width / 2.0).max(2.0) * state.scale;
        let alpha = (state.opacity * intensity).clamp(0.0, 1.0);
        Self {
            angle: geometry.angle,
            offset: geometry.offset,
            radius: band_radius + softness,
            alpha: if alpha.is_finite() { alpha } else { 0.0 },
        }
    }

    /// One `linear-gradient` layer: transparent, peak, transparent.
    pub fn to_css(self, ink: BandInk) -> String {
        format!(
            "linear-gradient({}deg, transparent calc(50% + {}px), rgba({}, {}) calc(50% + {}px), transparent calc(50% + {}px))",
            css_number(self.angle),
            css_number(self.offset - self.radius),
            ink.rgb(),
            css_number(self.alpha),
            css_number(self.offset),
            css_number(self.offset + self.radius),
        )
    }
}

/// Value of a target's `mask-image`.
#[derive(Clone, Debug, PartialEq)]
pub enum MaskImage {
    /// Geometry not computed yet; the target stays unmasked.
    None,
    /// One layer per catalog ray.
    Bands(Vec<MaskBand>),
}

impl MaskImage {
    /// Whether the target is left unmasked.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// CSS value with every layer inked in `ink`, or `none`.
    pub fn to_css(&self, ink: BandInk) -> String {
        match self {
            Self::None => "none".to_string(),
            Self::Bands(bands) => bands
                .iter()
                .map(|b| b.to_css(ink))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

impl fmt::Display for MaskImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css(BandInk::Mask))
    }
}

/// Combine cached geometry with the current animation state into one layered mask.
///
/// `geometry` and `runtime` are index-aligned with the catalog. A ray without a runtime slot is
/// treated as static.
pub fn build_mask_expression(
    geometry: Option<&[RayGeometry]>,
    runtime: &[RayRuntimeState],
    softness: f64,
    intensity: f64,
) -> MaskImage {
    let Some(geometry) = geometry.filter(|g| !g.is_empty()) else {
        return MaskImage::None;
    };
    let bands = geometry
        .iter()
        .enumerate()
        .map(|(idx, g)| {
            let state = runtime
                .get(idx)
                .copied()
                .unwrap_or(RayRuntimeState::STATIC);
            MaskBand::new(*g, state, softness, intensity)
        })
        .collect();
    MaskImage::Bands(bands)
}

/// Mask properties written on the text target, so they can be cleared again on teardown.
pub const MASK_PROPERTIES: [&str; 6] = [
    "mask-image",
    "-webkit-mask-image",
    "mask-composite",
    "-webkit-mask-composite",
    "mask-repeat",
    "mask-size",
];

/// Write `mask` and the fixed compositing properties on `target`.
pub fn apply_mask<H: Host>(host: &mut H, target: &H::Node, mask: &MaskImage) {
    let value = mask.to_css(BandInk::Mask);
    host.set_style(target, "mask-image", &value);
    host.set_style(target, "-webkit-mask-image", &value);
    // bands union rather than intersect
    host.set_style(target, "mask-composite", "add");
    host.set_style(target, "-webkit-mask-composite", "source-over");
    host.set_style(target, "mask-repeat", "no-repeat");
    host.set_style(target, "mask-size", "100% 100%");
}

/// Paint `mask` as the visible background of `overlay`.
pub fn apply_debug_overlay<H: Host>(host: &mut H, overlay: &H::Node, mask: &MaskImage) {
    host.set_style(overlay, "background", &mask.to_css(BandInk::Debug));
}

/// Remove every property [`apply_mask`] wrote.
pub fn clear_mask<H: Host>(host: &mut H, target: &H::Node) {
    for property in MASK_PROPERTIES {
        host.remove_style(target, property);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/compositor.rs"]
mod tests;
