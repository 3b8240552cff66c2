use std::f64::consts::TAU;

use crate::foundation::core::Bounds;
use crate::foundation::error::{RaylightError, RaylightResult};

/// Data-valued configuration of one ray effect.
///
/// Element-valued options (the text mask target and the debug overlay) live in
/// [`crate::EffectTargets`] because they are host handles rather than data.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectOptions {
    /// Smallest scale an animated ray shrinks to.
    pub min_scale: f64,
    /// Largest scale an animated ray grows to.
    pub max_scale: f64,
    /// Dimmest opacity of an animated ray.
    pub min_opacity: f64,
    /// Brightest opacity of an animated ray.
    pub max_opacity: f64,
    /// Lower bound of the per-ray period, in ms.
    pub min_duration_ms: f64,
    /// Upper bound of the per-ray period, in ms.
    pub max_duration_ms: f64,
    /// Global time scale applied to every ray's oscillator. `0` freezes the field.
    ///
    /// A ray completes one cycle every `duration / speed_multiplier` ms. The default of
    /// `4 / TAU` makes a full cycle last `TAU * duration / 4`.
    pub speed_multiplier: f64,
    /// Lay the field out upright and centered instead of rotated and shifted left.
    pub centered: bool,
    /// Base color, either a CSS custom property name (`--color-x`) or any CSS color.
    pub color: String,
    /// CSS `mix-blend-mode` of the container.
    pub blend_mode: String,
    /// CSS blur radius of the container, such as `1rem`.
    pub blur: String,
    /// Pixel falloff added to each side of every mask band.
    pub mask_softness: f64,
    /// Multiplier from ray opacity to mask alpha.
    pub mask_intensity: f64,
    /// Base seed for phase/duration sampling. `None` lets the host pick one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

const DEFAULT_SPEED_MULTIPLIER: f64 = 4.0 / TAU;

impl Default for EffectOptions {
    fn default() -> Self {
        Self {
            min_scale: 0.6,
            max_scale: 1.0,
            min_opacity: 0.5,
            max_opacity: 1.0,
            min_duration_ms: 3000.0,
            max_duration_ms: 6000.0,
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            centered: false,
            color: "--color-neutral-100".to_string(),
            blend_mode: "normal".to_string(),
            blur: "1rem".to_string(),
            mask_softness: 24.0,
            mask_intensity: 1.0,
            seed: None,
        }
    }
}

impl EffectOptions {
    /// Parse camelCase JSON, filling missing keys with defaults, then validate.
    pub fn from_json(s: &str) -> RaylightResult<Self> {
        let opts: Self = serde_json::from_str(s)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Check that every number is finite and non-negative, durations are positive, each
    /// `min <= max`, and the CSS strings are non-empty.
    pub fn validate(&self) -> RaylightResult<()> {
        let numbers = [
            ("minScale", self.min_scale),
            ("maxScale", self.max_scale),
            ("minOpacity", self.min_opacity),
            ("maxOpacity", self.max_opacity),
            ("minDurationMs", self.min_duration_ms),
            ("maxDurationMs", self.max_duration_ms),
            ("speedMultiplier", self.speed_multiplier),
            ("maskSoftness", self.mask_softness),
            ("maskIntensity", self.mask_intensity),
        ];
        for (name, v) in numbers {
            if !v.is_finite() || v < 0.0 {
                return Err(RaylightError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if self.min_duration_ms <= 0.0 {
            return Err(RaylightError::validation("minDurationMs must be > 0"));
        }
        for (name, lo, hi) in [
            ("scale", self.min_scale, self.max_scale),
            ("opacity", self.min_opacity, self.max_opacity),
            ("duration", self.min_duration_ms, self.max_duration_ms),
        ] {
            Bounds::new(lo, hi).map_err(|_| {
                RaylightError::validation(format!("{name} min must be <= max"))
            })?;
        }
        for (name, v) in [
            ("color", &self.color),
            ("blendMode", &self.blend_mode),
            ("blur", &self.blur),
        ] {
            if v.trim().is_empty() {
                return Err(RaylightError::validation(format!(
                    "{name} must be non-empty"
                )));
            }
        }
        Ok(())
    }

    /// `[min_scale, max_scale]`.
    pub fn scale_bounds(&self) -> Bounds {
        Bounds {
            min: self.min_scale,
            max: self.max_scale,
        }
    }

    /// `[min_opacity, max_opacity]`.
    pub fn opacity_bounds(&self) -> Bounds {
        Bounds {
            min: self.min_opacity,
            max: self.max_opacity,
        }
    }

    /// `[min_duration_ms, max_duration_ms]`.
    pub fn duration_bounds(&self) -> Bounds {
        Bounds {
            min: self.min_duration_ms,
            max: self.max_duration_ms,
        }
    }

    /// Shallow merge: every field present in `patch` replaces the current value.
    pub fn merged(&self, patch: &OptionsPatch) -> Self {
        fn pick<T: Clone>(cur: &T, new: &Option<T>) -> T {
            new.as_ref().unwrap_or(cur).clone()
        }

        Self {
            min_scale: pick(&self.min_scale, &patch.min_scale),
            max_scale: pick(&self.max_scale, &patch.max_scale),
            min_opacity: pick(&self.min_opacity, &patch.min_opacity),
            max_opacity: pick(&self.max_opacity, &patch.max_opacity),
            min_duration_ms: pick(&self.min_duration_ms, &patch.min_duration_ms),
            max_duration_ms: pick(&self.max_duration_ms, &patch.max_duration_ms),
            speed_multiplier: pick(&self.speed_multiplier, &patch.speed_multiplier),
            centered: pick(&self.centered, &patch.centered),
            color: pick(&self.color, &patch.color),
            blend_mode: pick(&self.blend_mode, &patch.blend_mode),
            blur: pick(&self.blur, &patch.blur),
            mask_softness: pick(&self.mask_softness, &patch.mask_softness),
            mask_intensity: pick(&self.mask_intensity, &patch.mask_intensity),
            seed: patch.seed.or(self.seed),
        }
    }
}

/// Partial options as passed to `update`; absent keys keep their current value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsPatch {
    /// Replaces [`EffectOptions::min_scale`].
    pub min_scale: Option<f64>,
    /// Replaces [`EffectOptions::max_scale`].
    pub max_scale: Option<f64>,
    /// Replaces [`EffectOptions::min_opacity`].
    pub min_opacity: Option<f64>,
    /// Replaces [`EffectOptions::max_opacity`].
    pub max_opacity: Option<f64>,
    /// Replaces [`EffectOptions::min_duration_ms`].
    pub min_duration_ms: Option<f64>,
    /// Replaces [`EffectOptions::max_duration_ms`].
    pub max_duration_ms: Option<f64>,
    /// Replaces [`EffectOptions::speed_multiplier`].
    pub speed_multiplier: Option<f64>,
    /// Replaces [`EffectOptions::centered`].
    pub centered: Option<bool>,
    /// Replaces [`EffectOptions::color`].
    pub color: Option<String>,
    /// Replaces [`EffectOptions::blend_mode`].
    pub blend_mode: Option<String>,
    /// Replaces [`EffectOptions::blur`].
    pub blur: Option<String>,
    /// Replaces [`EffectOptions::mask_softness`].
    pub mask_softness: Option<f64>,
    /// Replaces [`EffectOptions::mask_intensity`].
    pub mask_intensity: Option<f64>,
    /// Replaces [`EffectOptions::seed`].
    pub seed: Option<u64>,
}

impl OptionsPatch {
    /// Parse a partial camelCase JSON object. Validation happens after merging.
    pub fn from_json(s: &str) -> RaylightResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Patch that only changes the color.
    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;
