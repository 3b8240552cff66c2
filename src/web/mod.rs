//! Browser host over `web-sys`, and the `attach` entry point exported to JavaScript.
//!
//! The effect lives in an `Rc<RefCell<_>>` owned by the returned [`RaysHandle`]. Frame and
//! resize callbacks only hold a `Weak` back-reference, so dropping (or freeing) the handle
//! tears the field down and later callbacks find nothing to call.

use std::cell::{OnceCell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, ResizeObserver, Window};

use crate::{
    catalog::rays::Catalog,
    config::options::{EffectOptions, OptionsPatch},
    dom::host::{ElementSpec, FrameKind, FrameToken, Host},
    effect::controller::{EffectTargets, RayEffect, TargetsPatch},
    foundation::{
        core::Rect,
        error::{RaylightError, RaylightResult},
    },
};

const TEXT_MASK_KEY: &str = "textMaskTarget";
const DEBUG_OVERLAY_KEY: &str = "debugOverlayTarget";

type Link = Rc<OnceCell<Weak<RefCell<RayEffect<WebHost>>>>>;

fn with_effect(link: &Link, f: impl FnOnce(&mut RayEffect<WebHost>)) {
    let Some(cell) = link.get().and_then(Weak::upgrade) else {
        return;
    };
    // a callback that lands while the effect is already borrowed is dropped
    let Ok(mut effect) = cell.try_borrow_mut() else {
        tracing::trace!("effect busy; callback skipped");
        return;
    };
    f(&mut effect);
}

/// [`Host`] backed by the live DOM.
pub struct WebHost {
    window: Window,
    document: Document,
    /// Returned when element creation fails so the catalog stays index-aligned.
    placeholder: HtmlElement,
    observer: ResizeObserver,
    layout_callback: Closure<dyn FnMut(f64)>,
    animation_callback: Closure<dyn FnMut(f64)>,
    _resize_callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl WebHost {
    fn new(link: &Link) -> RaylightResult<Self> {
        let window = web_sys::window().ok_or_else(|| RaylightError::host("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| RaylightError::host("no document"))?;
        let placeholder = document
            .create_element("div")
            .map_err(|_| RaylightError::host("cannot create elements"))?
            .unchecked_into::<HtmlElement>();

        let layout_link = link.clone();
        let layout_callback = Closure::<dyn FnMut(f64)>::new(move |ts: f64| {
            with_effect(&layout_link, |effect| effect.on_frame(FrameKind::Layout, ts));
        });
        let animation_link = link.clone();
        let animation_callback = Closure::<dyn FnMut(f64)>::new(move |ts: f64| {
            with_effect(&animation_link, |effect| {
                effect.on_frame(FrameKind::Animation, ts)
            });
        });
        let resize_link = link.clone();
        let resize_callback =
            Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
                with_effect(&resize_link, RayEffect::on_resize);
            });
        let observer = ResizeObserver::new(resize_callback.as_ref().unchecked_ref())
            .map_err(|_| RaylightError::host("ResizeObserver unavailable"))?;

        Ok(Self {
            window,
            document,
            placeholder,
            observer,
            layout_callback,
            animation_callback,
            _resize_callback: resize_callback,
        })
    }
}

impl Host for WebHost {
    type Node = HtmlElement;

    fn create_element(&mut self, spec: &ElementSpec) -> HtmlElement {
        let el = match self.document.create_element(spec.tag) {
            Ok(el) => el.unchecked_into::<HtmlElement>(),
            Err(_) => {
                tracing::warn!(tag = spec.tag, "createElement failed");
                return self.placeholder.clone();
            }
        };
        el.set_class_name(&spec.class_name());
        let style = el.style();
        for (property, value) in &spec.styles {
            let _ = style.set_property(property, value);
        }
        el
    }

    fn append_child(&mut self, parent: &HtmlElement, child: &HtmlElement) {
        let _ = parent.append_child(child);
    }

    fn clear_children(&mut self, parent: &HtmlElement) {
        parent.set_text_content(None);
    }

    fn set_class_name(&mut self, node: &HtmlElement, class_name: &str) {
        node.set_class_name(class_name);
    }

    fn set_style(&mut self, node: &HtmlElement, property: &str, value: &str) {
        let _ = node.style().set_property(property, value);
    }

    fn remove_style(&mut self, node: &HtmlElement, property: &str) {
        let _ = node.style().remove_property(property);
    }

    fn set_attribute(&mut self, node: &HtmlElement, name: &str, value: &str) {
        let _ = node.set_attribute(name, value);
    }

    fn bounding_rect(&self, node: &HtmlElement) -> Option<Rect> {
        if !node.is_connected() {
            return None;
        }
        let r = node.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
    }

    fn request_frame(&mut self, kind: FrameKind) -> FrameToken {
        let callback = match kind {
            FrameKind::Layout => &self.layout_callback,
            FrameKind::Animation => &self.animation_callback,
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => FrameToken(u64::try_from(id).unwrap_or_default()),
            Err(_) => {
                tracing::warn!(?kind, "requestAnimationFrame failed");
                FrameToken(0)
            }
        }
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if let Ok(id) = i32::try_from(token.0) {
            let _ = self.window.cancel_animation_frame(id);
        }
    }

    fn observe_resize(&mut self, node: &HtmlElement) {
        self.observer.observe(node);
    }

    fn disconnect_resize(&mut self) {
        self.observer.disconnect();
    }

    fn entropy(&mut self) -> u64 {
        (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
    }
}

fn js_error(err: RaylightError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn options_json(options: &JsValue) -> RaylightResult<String> {
    if options.is_undefined() || options.is_null() {
        return Ok("{}".to_string());
    }
    let json = js_sys::JSON::stringify(options)
        .map_err(|_| RaylightError::validation("options are not JSON-serializable"))?;
    Ok(String::from(json))
}

fn element_option(options: &JsValue, key: &str) -> Option<Option<HtmlElement>> {
    if !options.is_object() {
        return None;
    }
    let key = JsValue::from_str(key);
    if !js_sys::Reflect::has(options, &key).unwrap_or(false) {
        return None;
    }
    let value = js_sys::Reflect::get(options, &key).ok()?;
    Some(value.dyn_into::<HtmlElement>().ok())
}

/// JavaScript handle of one attached ray field.
#[wasm_bindgen]
pub struct RaysHandle {
    effect: Rc<RefCell<RayEffect<WebHost>>>,
}

#[wasm_bindgen]
impl RaysHandle {
    /// Shallow-merge `options` into the current ones and rebuild the field.
    pub fn update(&self, options: JsValue) -> Result<(), JsValue> {
        let patch = options_json(&options)
            .and_then(|json| OptionsPatch::from_json(&json))
            .map_err(js_error)?;
        let targets = TargetsPatch {
            text_mask: element_option(&options, TEXT_MASK_KEY),
            debug_overlay: element_option(&options, DEBUG_OVERLAY_KEY),
        };
        let mut effect = self
            .effect
            .try_borrow_mut()
            .map_err(|_| js_error(RaylightError::host("effect is busy")))?;
        effect.update(&patch, targets).map_err(|err| {
            tracing::warn!(%err, "ray field update rejected");
            js_error(err)
        })
    }

    /// Stop the field and remove its elements. Safe to call repeatedly.
    pub fn destroy(&self) {
        if let Ok(mut effect) = self.effect.try_borrow_mut() {
            effect.destroy();
        }
    }
}

/// Build the standard ray field inside `container`.
#[wasm_bindgen]
pub fn attach(container: HtmlElement, options: JsValue) -> Result<RaysHandle, JsValue> {
    let parsed = options_json(&options)
        .and_then(|json| EffectOptions::from_json(&json))
        .map_err(|err| {
            tracing::warn!(%err, "ray field options rejected");
            js_error(err)
        })?;
    let targets = EffectTargets {
        text_mask: element_option(&options, TEXT_MASK_KEY).flatten(),
        debug_overlay: element_option(&options, DEBUG_OVERLAY_KEY).flatten(),
    };

    let link: Link = Rc::new(OnceCell::new());
    let host = WebHost::new(&link).map_err(js_error)?;
    let effect = RayEffect::attach(host, container, Catalog::standard(), parsed, targets)
        .map_err(js_error)?;
    let effect = Rc::new(RefCell::new(effect));
    let _ = link.set(Rc::downgrade(&effect));
    Ok(RaysHandle { effect })
}
