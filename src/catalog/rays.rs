use crate::foundation::error::{RaylightError, RaylightResult};

/// Edge offsets and size of a shape inside the ray container, as CSS length strings.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// CSS `left`.
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// CSS `top`.
    pub top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// CSS `right`.
    pub right: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// CSS `bottom`.
    pub bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// CSS `height`.
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// CSS `width`. A pixel value also sets the width of the ray's mask band.
    pub width: Option<String>,
}

impl Placement {
    /// Declared properties as `(css property, value)` pairs in a fixed order.
    pub fn declarations(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("left", &self.left),
            ("top", &self.top),
            ("right", &self.right),
            ("bottom", &self.bottom),
            ("height", &self.height),
            ("width", &self.width),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.as_deref().map(|v| (k, v)))
    }
}

/// One light beam. Its index in [`Catalog::rays`] is its identity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RayDefinition {
    /// Position inside the container.
    #[serde(flatten)]
    pub placement: Placement,
    /// Rotation around the top-right corner, in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Whether opacity and scale oscillate.
    #[serde(default)]
    pub animated: bool,
}

/// Static ambient glow. Never animated, never geometry-tracked.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LightSourceDefinition {
    /// Position inside the container.
    #[serde(flatten)]
    pub placement: Placement,
    /// Fixed opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Ordered ray and light-source arrangement owned by one effect instance.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Beams, in paint order.
    pub rays: Vec<RayDefinition>,
    /// Glows, painted after the beams.
    #[serde(default)]
    pub light_sources: Vec<LightSourceDefinition>,
}

impl Catalog {
    /// Validated catalog.
    pub fn new(
        rays: Vec<RayDefinition>,
        light_sources: Vec<LightSourceDefinition>,
    ) -> RaylightResult<Self> {
        let catalog = Self {
            rays,
            light_sources,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse and validate a `{ "rays": [...], "lightSources": [...] }` document.
    pub fn from_json(s: &str) -> RaylightResult<Self> {
        let catalog: Self = serde_json::from_str(s)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject non-finite rotations and light opacities outside `[0, 1]`.
    pub fn validate(&self) -> RaylightResult<()> {
        for (idx, ray) in self.rays.iter().enumerate() {
            if !ray.rotation.is_finite() {
                return Err(RaylightError::catalog(format!(
                    "ray {idx} rotation must be finite"
                )));
            }
        }
        for (idx, light) in self.light_sources.iter().enumerate() {
            if !(0.0..=1.0).contains(&light.opacity) {
                return Err(RaylightError::catalog(format!(
                    "light source {idx} opacity must be in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Number of rays that oscillate.
    pub fn animated_count(&self) -> usize {
        self.rays.iter().filter(|r| r.animated).count()
    }

    /// The production arrangement: ten beams fanning out from just above the container's top
    /// edge, plus three wide glows behind them.
    pub fn standard() -> Self {
        Self {
            rays: vec![
                ray(("height", "1865px"), "calc(49.75% - 18px)", "-352px", "36px", 0.0, true),
                ray(("bottom", "147px"), "calc(49.5% - 11px)", "-357px", "22px", 25.0, true),
                ray(("bottom", "-7px"), "calc(49.5% - 12px)", "-354px", "24px", 11.0, true),
                ray(("bottom", "-128px"), "calc(49.5833% - 12.5px)", "-350px", "25px", -12.0, false),
                ray(("bottom", "-920px"), "calc(50% - 17.5px)", "-352px", "35px", -24.0, false),
                ray(("bottom", "-164px"), "calc(49.4167% - 18.5px)", "-348px", "37px", -18.0, true),
                ray(("bottom", "-296px"), "calc(49.8333% - 8px)", "-352px", "16px", -5.0, true),
                ray(("bottom", "-121px"), "calc(49.75% - 5.5px)", "-352px", "11px", -3.0, false),
                ray(("bottom", "29px"), "calc(49.75% - 7px)", "-354px", "14px", 18.0, false),
                ray(("bottom", "-121px"), "calc(49.6667% - 7px)", "-353px", "14px", 6.0, false),
            ],
            light_sources: vec![
                light(("bottom", "-46px"), "calc(50% - 599px)", "-352px", "1198px", 0.3),
                light(("height", "929px"), "calc(50% - 432.5px)", "-252px", "865px", 0.46),
                light(("height", "639px"), "calc(50% - 389px)", "-393px", "778px", 0.72),
            ],
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

// `extent` is the one vertical size property: either a fixed height or a bottom offset.
fn placement((key, value): (&str, &str), left: &str, top: &str, width: &str) -> Placement {
    let mut p = Placement {
        left: Some(left.to_string()),
        top: Some(top.to_string()),
        width: Some(width.to_string()),
        ..Placement::default()
    };
    match key {
        "height" => p.height = Some(value.to_string()),
        _ => p.bottom = Some(value.to_string()),
    }
    p
}

fn ray(
    extent: (&str, &str),
    left: &str,
    top: &str,
    width: &str,
    rotation: f64,
    animated: bool,
) -> RayDefinition {
    RayDefinition {
        placement: placement(extent, left, top, width),
        rotation,
        animated,
    }
}

fn light(
    extent: (&str, &str),
    left: &str,
    top: &str,
    width: &str,
    opacity: f64,
) -> LightSourceDefinition {
    LightSourceDefinition {
        placement: placement(extent, left, top, width),
        opacity,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/rays.rs"]
mod tests;
