//! The seam between the effect and the page it decorates.

use crate::foundation::core::Rect;

/// Pure description of an element to create: tag, classes and inline styles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ElementSpec {
    /// Element tag name.
    pub tag: &'static str,
    /// Class list, joined with spaces on creation.
    pub classes: Vec<&'static str>,
    /// Inline style declarations in application order.
    pub styles: Vec<(String, String)>,
}

impl ElementSpec {
    /// Empty `div` description.
    pub fn div() -> Self {
        Self {
            tag: "div",
            ..Self::default()
        }
    }

    /// Append a class.
    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    /// Append an inline style declaration. Later declarations win.
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.push((property.into(), value.into()));
        self
    }

    /// Value for the `class` attribute.
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    /// Last declared value for `property`, if any.
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .rev()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }
}

/// Which of the two clocks a frame request belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// One-shot deferred frame after mount; measures layout.
    Layout,
    /// Continuous animation loop; never measures layout.
    Animation,
}

/// Handle of a scheduled frame callback, used for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(pub u64);

/// Everything the effect needs from its environment.
///
/// Callbacks flow the other way: when a requested frame fires the host calls
/// [`crate::RayEffect::on_frame`], and when an observed element changes size it calls
/// [`crate::RayEffect::on_resize`]. Hosts must not invoke either re-entrantly.
pub trait Host {
    /// Handle of one element.
    type Node: Clone + PartialEq;

    /// Create an unattached element from `spec`.
    fn create_element(&mut self, spec: &ElementSpec) -> Self::Node;
    /// Append `child` as the last child of `parent`, moving it if already attached.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);
    /// Detach every child of `parent`.
    fn clear_children(&mut self, parent: &Self::Node);
    /// Replace the whole class list.
    fn set_class_name(&mut self, node: &Self::Node, class_name: &str);
    /// Set one inline style property.
    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);
    /// Remove one inline style property; missing properties are ignored.
    fn remove_style(&mut self, node: &Self::Node, property: &str);
    /// Set one attribute.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);
    /// Viewport-space border box, or `None` when the node is not laid out.
    fn bounding_rect(&self, node: &Self::Node) -> Option<Rect>;

    /// Schedule a single callback of `kind` on the next display frame.
    fn request_frame(&mut self, kind: FrameKind) -> FrameToken;
    /// Cancelling an unknown or already-fired token is a no-op.
    fn cancel_frame(&mut self, token: FrameToken);
    /// Start reporting size changes of `node` through [`crate::RayEffect::on_resize`].
    fn observe_resize(&mut self, node: &Self::Node);
    /// Stop all resize observation. Safe to call when nothing is observed.
    fn disconnect_resize(&mut self);

    /// Seed for timing sampling when the options do not pin one.
    fn entropy(&mut self) -> u64 {
        0
    }
}
