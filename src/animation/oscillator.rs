use std::f64::consts::TAU;

use crate::{
    config::options::EffectOptions,
    foundation::{core::Bounds, math::SplitMix64},
};

/// Per-ray oscillation timing, sampled once per initialization and then held fixed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RayTiming {
    /// Radians in `[0, TAU)`.
    pub phase_offset: f64,
    /// Oscillation period in milliseconds at `speed_multiplier == 1`.
    pub duration_ms: f64,
}

impl RayTiming {
    /// Draw a period from `durations`, then a phase in `[0, TAU)`.
    pub fn sample(rng: &mut SplitMix64, durations: Bounds) -> Self {
        let duration_ms = rng.next_range(durations.min, durations.max);
        let phase_offset = rng.next_range(0.0, TAU);
        Self {
            phase_offset,
            duration_ms,
        }
    }
}

/// Output of [`advance`] for one ray at one instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Oscillation {
    /// Element opacity.
    pub opacity: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

/// Sinusoidal driver for one ray at `timestamp_ms`.
///
/// The phase advances by one full turn every `duration_ms / speed_multiplier` milliseconds, and
/// `(sin + 1) / 2` maps it onto both bounds. Equal bounds give a constant.
pub fn advance(
    timestamp_ms: f64,
    timing: RayTiming,
    speed_multiplier: f64,
    scale: Bounds,
    opacity: Bounds,
) -> Oscillation {
    let t = progress_factor(timestamp_ms, timing, speed_multiplier);
    Oscillation {
        opacity: opacity.lerp(t),
        scale: scale.lerp(t),
    }
}

/// Normalized oscillator output in `[0, 1]`.
pub fn progress_factor(timestamp_ms: f64, timing: RayTiming, speed_multiplier: f64) -> f64 {
    if timing.duration_ms <= 0.0 {
        return ((timing.phase_offset.sin() + 1.0) / 2.0).clamp(0.0, 1.0);
    }
    let turns = timestamp_ms * speed_multiplier / timing.duration_ms;
    let cycle_progress = (turns * TAU + timing.phase_offset).rem_euclid(TAU);
    ((cycle_progress.sin() + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Live animation state of one catalog ray.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RayRuntimeState {
    /// Opacity written on the last frame.
    pub opacity: f64,
    /// Scale written on the last frame.
    pub scale: f64,
    /// `None` for static rays, which keep full opacity and unit scale.
    pub timing: Option<RayTiming>,
}

impl RayRuntimeState {
    /// Slot of a ray that never animates.
    pub const STATIC: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        timing: None,
    };

    /// Slot of an animated ray before its first frame.
    pub fn animated(timing: RayTiming, opts: &EffectOptions) -> Self {
        // until the first frame, sit at the bottom of both ranges
        Self {
            opacity: opts.min_opacity,
            scale: opts.min_scale,
            timing: Some(timing),
        }
    }

    /// Whether this slot carries timing.
    pub fn is_animated(&self) -> bool {
        self.timing.is_some()
    }

    /// Advance to `timestamp_ms`, returning the new values. Static rays are left untouched.
    pub fn step(&mut self, timestamp_ms: f64, opts: &EffectOptions) -> Option<Oscillation> {
        let timing = self.timing?;
        let osc = advance(
            timestamp_ms,
            timing,
            opts.speed_multiplier,
            opts.scale_bounds(),
            opts.opacity_bounds(),
        );
        self.opacity = osc.opacity;
        self.scale = osc.scale;
        Some(osc)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/oscillator.rs"]
mod tests;
