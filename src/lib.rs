//! Raylight is a decorative light-ray field for web pages.
//!
//! A fixed catalog of beam shapes is built into a container element and animated in opacity and
//! scale. Independently, the beams' live geometry is projected onto an arbitrary target element
//! (typically a headline) as a layered CSS mask, so the target looks lit by the beams passing
//! behind it.
//!
//! # Two clocks
//!
//! 1. **Layout clock**: one deferred frame after mount, then every resize of the target or the
//!    container. Reads bounding boxes and rebuilds the [`RayGeometry`] cache wholesale.
//! 2. **Animation clock**: every display frame. Advances each animated ray's oscillator, writes
//!    its style, and re-synthesizes the mask from the cached geometry. Never reads layout.
//!
//! # Hosts
//!
//! All page access goes through the [`Host`] trait. [`MemoryHost`] runs the whole effect
//! headlessly (tests, snapshots); on `wasm32` the `web` module attaches to real DOM nodes via
//! `web-sys` and exports `attach(container, options)` to JavaScript.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod catalog;
mod config;
mod dom;
mod effect;
mod foundation;
mod geometry;
mod mask;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animation::oscillator::{Oscillation, RayRuntimeState, RayTiming, advance, progress_factor};
pub use catalog::rays::{Catalog, LightSourceDefinition, Placement, RayDefinition};
pub use config::options::{EffectOptions, OptionsPatch};
pub use dom::factory::{
    CONTAINER_TILT_DEG, container_rotation_deg, container_styles, create_light_source_element,
    create_ray_element, glow_gradient, light_source_element_spec, ray_element_spec, resolve_color,
};
pub use dom::host::{ElementSpec, FrameKind, FrameToken, Host};
pub use dom::memory::{MemoryHost, MemoryNode, NodeId};
pub use effect::controller::{EffectState, EffectTargets, RayEffect, TargetsPatch};
pub use foundation::core::{Bounds, Point, Rect, Vec2, css_angle_direction, css_number, parse_px};
pub use foundation::error::{RaylightError, RaylightResult};
pub use foundation::math::SplitMix64;
pub use geometry::resolver::{
    RayGeometry, declared_width, gradient_angle, recompute, resolve_ray_geometry,
};
pub use mask::compositor::{
    BandInk, MASK_PROPERTIES, MaskBand, MaskImage, apply_debug_overlay, apply_mask,
    build_mask_expression, clear_mask,
};
