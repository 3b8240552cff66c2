use crate::{
    animation::oscillator::{RayRuntimeState, RayTiming},
    catalog::rays::Catalog,
    config::options::{EffectOptions, OptionsPatch},
    dom::{
        factory::{
            container_rotation_deg, create_light_source_element, create_ray_element, rotate,
            style_container,
        },
        host::{FrameKind, FrameToken, Host},
    },
    foundation::{
        core::css_number,
        error::{RaylightError, RaylightResult},
        math::SplitMix64,
    },
    geometry::resolver::{self, RayGeometry},
    mask::compositor::{
        MaskImage, apply_debug_overlay, apply_mask, build_mask_expression, clear_mask,
    },
};

/// Lifecycle of a [`RayEffect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectState {
    /// Constructed, nothing built yet.
    Uninitialized,
    /// Building elements and sampling timing.
    Initializing,
    /// Both clocks live.
    Running,
    /// Terminal.
    Disposed,
}

/// Element-valued options. Both are optional; without a mask target no geometry is tracked.
#[derive(Clone, Debug, PartialEq)]
pub struct EffectTargets<N> {
    /// Element whose `mask-image` follows the rays.
    pub text_mask: Option<N>,
    /// Element that shows the same mask as a visible background.
    pub debug_overlay: Option<N>,
}

impl<N> Default for EffectTargets<N> {
    fn default() -> Self {
        Self {
            text_mask: None,
            debug_overlay: None,
        }
    }
}

/// Target changes for [`RayEffect::update`]. `None` keeps the current target, `Some(None)` drops it.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetsPatch<N> {
    /// New text mask target.
    pub text_mask: Option<Option<N>>,
    /// New debug overlay.
    pub debug_overlay: Option<Option<N>>,
}

impl<N> Default for TargetsPatch<N> {
    fn default() -> Self {
        Self {
            text_mask: None,
            debug_overlay: None,
        }
    }
}

/// A running ray field attached to one container element.
///
/// The effect runs on two clocks. The animation clock ([`FrameKind::Animation`]) fires every
/// display frame and only writes: ray opacity/scale and the target mask. The layout clock (the
/// one-shot [`FrameKind::Layout`] frame after mount, then [`RayEffect::on_resize`]) is the only
/// place bounding boxes are read; it replaces the geometry cache wholesale.
pub struct RayEffect<H: Host> {
    host: H,
    container: H::Node,
    catalog: Catalog,
    options: EffectOptions,
    targets: EffectTargets<H::Node>,
    state: EffectState,

    ray_nodes: Vec<H::Node>,
    light_nodes: Vec<H::Node>,
    runtime: Vec<RayRuntimeState>,
    geometry: Option<Vec<RayGeometry>>,

    layout_frame: Option<FrameToken>,
    animation_frame: Option<FrameToken>,
    observing: bool,
    generation: u64,
}

impl<H: Host> RayEffect<H> {
    /// Build the field inside `container` and start both clocks.
    #[tracing::instrument(skip_all, fields(rays = catalog.rays.len()))]
    pub fn attach(
        host: H,
        container: H::Node,
        catalog: Catalog,
        options: EffectOptions,
        targets: EffectTargets<H::Node>,
    ) -> RaylightResult<Self> {
        catalog.validate()?;
        options.validate()?;
        let mut effect = Self {
            host,
            container,
            catalog,
            options,
            targets,
            state: EffectState::Uninitialized,
            ray_nodes: Vec::new(),
            light_nodes: Vec::new(),
            runtime: Vec::new(),
            geometry: None,
            layout_frame: None,
            animation_frame: None,
            observing: false,
            generation: 0,
        };
        effect.initialize();
        Ok(effect)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EffectState {
        self.state
    }

    /// Options of the current run.
    pub fn options(&self) -> &EffectOptions {
        &self.options
    }

    /// Arrangement this effect was attached with.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current mask target and overlay.
    pub fn targets(&self) -> &EffectTargets<H::Node> {
        &self.targets
    }

    /// Element hosting the field.
    pub fn container(&self) -> &H::Node {
        &self.container
    }

    /// Ray elements, index-aligned with [`Catalog::rays`]. Empty once destroyed.
    pub fn ray_nodes(&self) -> &[H::Node] {
        &self.ray_nodes
    }

    /// Light-source elements, index-aligned with [`Catalog::light_sources`].
    pub fn light_nodes(&self) -> &[H::Node] {
        &self.light_nodes
    }

    /// Animation state per ray, index-aligned with [`Catalog::rays`].
    pub fn runtime(&self) -> &[RayRuntimeState] {
        &self.runtime
    }

    /// Last computed geometry, `None` until the first layout pass with a measurable target.
    pub fn geometry(&self) -> Option<&[RayGeometry]> {
        self.geometry.as_deref()
    }

    /// The environment the effect writes to.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the environment, e.g. to drain a [`crate::MemoryHost`]'s frames.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Rotation of the field under the current options.
    pub fn container_rotation_deg(&self) -> f64 {
        container_rotation_deg(self.options.centered)
    }

    /// Mask for the current geometry cache and animation state.
    pub fn mask_expression(&self) -> MaskImage {
        build_mask_expression(
            self.geometry.as_deref(),
            &self.runtime,
            self.options.mask_softness,
            self.options.mask_intensity,
        )
    }

    /// Merge `patch` into the current options and rebuild everything from scratch.
    ///
    /// Invalid merged options are rejected and the running field is left as it was.
    #[tracing::instrument(skip_all)]
    pub fn update(
        &mut self,
        patch: &OptionsPatch,
        targets: TargetsPatch<H::Node>,
    ) -> RaylightResult<()> {
        if self.state == EffectState::Disposed {
            return Err(RaylightError::host("update called on a destroyed effect"));
        }
        let merged = self.options.merged(patch);
        merged.validate()?;
        self.options = merged;

        if let Some(text_mask) = targets.text_mask {
            if let Some(old) = self.targets.text_mask.take() {
                clear_mask(&mut self.host, &old);
            }
            self.targets.text_mask = text_mask;
        }
        if let Some(overlay) = targets.debug_overlay {
            if let Some(old) = self.targets.debug_overlay.take() {
                self.host.remove_style(&old, "background");
            }
            self.targets.debug_overlay = overlay;
        }

        self.initialize();
        Ok(())
    }

    /// Callback for a frame previously requested through [`Host::request_frame`].
    ///
    /// Frames of a kind that is not outstanding (stale or duplicate deliveries, or anything after
    /// [`RayEffect::destroy`]) are ignored.
    pub fn on_frame(&mut self, kind: FrameKind, timestamp_ms: f64) {
        if self.state != EffectState::Running {
            return;
        }
        match kind {
            FrameKind::Layout => {
                if self.layout_frame.take().is_none() {
                    return;
                }
                self.refresh_geometry();
            }
            FrameKind::Animation => {
                if self.animation_frame.take().is_none() {
                    return;
                }
                self.animate(timestamp_ms);
                self.animation_frame = Some(self.host.request_frame(FrameKind::Animation));
            }
        }
    }

    /// Callback for the resize observer on the mask target or the container.
    pub fn on_resize(&mut self) {
        if self.state != EffectState::Running {
            return;
        }
        self.refresh_geometry();
    }

    /// Stop both clocks and remove everything the effect created. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.state == EffectState::Disposed {
            return;
        }
        self.stop_clocks();
        if let Some(target) = &self.targets.text_mask {
            clear_mask(&mut self.host, target);
        }
        if let Some(overlay) = &self.targets.debug_overlay {
            self.host.remove_style(overlay, "background");
        }
        self.host.clear_children(&self.container);
        self.ray_nodes.clear();
        self.light_nodes.clear();
        self.runtime.clear();
        self.geometry = None;
        self.state = EffectState::Disposed;
        tracing::debug!("ray effect destroyed");
    }

    fn stop_clocks(&mut self) {
        if let Some(token) = self.animation_frame.take() {
            self.host.cancel_frame(token);
        }
        if let Some(token) = self.layout_frame.take() {
            self.host.cancel_frame(token);
        }
        if self.observing {
            self.host.disconnect_resize();
            self.observing = false;
        }
    }

    fn initialize(&mut self) {
        self.state = EffectState::Initializing;
        self.stop_clocks();

        self.host.clear_children(&self.container);
        style_container(&mut self.host, &self.container, &self.options);

        self.ray_nodes.clear();
        for def in &self.catalog.rays {
            let node = create_ray_element(&mut self.host, def, &self.options.color);
            self.host.append_child(&self.container, &node);
            self.ray_nodes.push(node);
        }
        self.light_nodes.clear();
        for def in &self.catalog.light_sources {
            let node = create_light_source_element(&mut self.host, def, &self.options.color);
            self.host.append_child(&self.container, &node);
            self.light_nodes.push(node);
        }

        let seed = match self.options.seed {
            Some(seed) => seed,
            None => self.host.entropy(),
        };
        let mut rng = SplitMix64::for_generation(seed, self.generation);
        self.generation += 1;
        let durations = self.options.duration_bounds();
        self.runtime = self
            .catalog
            .rays
            .iter()
            .map(|def| {
                if def.animated {
                    RayRuntimeState::animated(RayTiming::sample(&mut rng, durations), &self.options)
                } else {
                    RayRuntimeState::STATIC
                }
            })
            .collect();

        self.geometry = None;
        if let Some(target) = &self.targets.text_mask {
            apply_mask(&mut self.host, target, &MaskImage::None);
            self.layout_frame = Some(self.host.request_frame(FrameKind::Layout));
            self.host.observe_resize(target);
        }
        self.host.observe_resize(&self.container);
        self.observing = true;

        if self.catalog.animated_count() > 0 || self.targets.text_mask.is_some() {
            self.animation_frame = Some(self.host.request_frame(FrameKind::Animation));
        }

        self.state = EffectState::Running;
        tracing::debug!(
            generation = self.generation,
            rays = self.ray_nodes.len(),
            lights = self.light_nodes.len(),
            masked = self.targets.text_mask.is_some(),
            "ray effect initialized"
        );
    }

    fn refresh_geometry(&mut self) {
        let Some(target) = &self.targets.text_mask else {
            self.geometry = None;
            return;
        };
        self.geometry = resolver::recompute(
            &self.host,
            &self.ray_nodes,
            &self.catalog.rays,
            target,
            container_rotation_deg(self.options.centered),
        );
        tracing::trace!(computed = self.geometry.is_some(), "ray geometry refreshed");
    }

    fn animate(&mut self, timestamp_ms: f64) {
        for (idx, slot) in self.runtime.iter_mut().enumerate() {
            let Some(osc) = slot.step(timestamp_ms, &self.options) else {
                continue;
            };
            let (Some(node), Some(def)) = (self.ray_nodes.get(idx), self.catalog.rays.get(idx))
            else {
                continue;
            };
            self.host.set_style(node, "opacity", &css_number(osc.opacity));
            self.host.set_style(
                node,
                "transform",
                &format!("scale({}) {}", css_number(osc.scale), rotate(def.rotation)),
            );
        }

        if self.targets.text_mask.is_none() && self.targets.debug_overlay.is_none() {
            return;
        }
        let mask = self.mask_expression();
        if let Some(target) = &self.targets.text_mask {
            apply_mask(&mut self.host, target, &mask);
        }
        if let Some(overlay) = &self.targets.debug_overlay {
            apply_debug_overlay(&mut self.host, overlay, &mask);
        }
    }
}

impl<H: Host> Drop for RayEffect<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/controller.rs"]
mod tests;
