//! Headless [`Host`] backed by an in-memory node arena.
//!
//! Layout is whatever the caller says it is: rectangles are assigned with
//! [`MemoryHost::set_rect`], and requested frames queue up until the caller drains them with
//! [`MemoryHost::take_frames`] and feeds them back into the effect.

use std::cell::Cell;
use std::collections::BTreeMap;

use crate::{
    dom::host::{ElementSpec, FrameKind, FrameToken, Host},
    foundation::core::Rect,
};

/// Index of a node in a [`MemoryHost`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// One element as the effect left it.
#[derive(Clone, Debug, Default)]
pub struct MemoryNode {
    /// Tag name.
    pub tag: String,
    /// Space-separated class list.
    pub class_name: String,
    /// Inline styles by property.
    pub styles: BTreeMap<String, String>,
    /// Attributes by name.
    pub attributes: BTreeMap<String, String>,
    /// Child ids in insertion order.
    pub children: Vec<NodeId>,
    /// `None` for detached nodes and roots.
    pub parent: Option<NodeId>,
    /// Document-level nodes are always mounted.
    pub root: bool,
    /// Layout box; `None` until [`MemoryHost::set_rect`].
    pub rect: Option<Rect>,
}

/// In-memory [`Host`]. See the module docs.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: Vec<MemoryNode>,
    pending: Vec<(FrameToken, FrameKind)>,
    next_token: u64,
    observed: Vec<NodeId>,
    rect_reads: Cell<usize>,
}

impl MemoryHost {
    /// Empty arena with no frames queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mounted document-level node (a container, a headline, an overlay).
    pub fn create_root(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            tag: tag.to_string(),
            root: true,
            ..MemoryNode::default()
        });
        id
    }

    /// Node by id. Panics on an id from another host.
    pub fn node(&self, id: NodeId) -> &MemoryNode {
        &self.nodes[id.0]
    }

    /// Children of `id` in insertion order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Current inline value of `property` on `id`.
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.nodes[id.0].styles.get(property).map(String::as_str)
    }

    /// Lay `id` out at `rect`. Only reported once the node is mounted.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        self.nodes[id.0].rect = Some(rect);
    }

    /// Whether `id` is a root or hangs below one.
    pub fn is_mounted(&self, id: NodeId) -> bool {
        let mut cur = id;
        loop {
            let node = &self.nodes[cur.0];
            if node.root {
                return true;
            }
            match node.parent {
                Some(p) => cur = p,
                None => return false,
            }
        }
    }

    /// Frames requested and not yet taken or cancelled, oldest first.
    pub fn pending_frames(&self) -> &[(FrameToken, FrameKind)] {
        &self.pending
    }

    /// Drain the frame queue. Callers deliver the result to [`crate::RayEffect::on_frame`].
    pub fn take_frames(&mut self) -> Vec<(FrameToken, FrameKind)> {
        std::mem::take(&mut self.pending)
    }

    /// Nodes currently under resize observation.
    pub fn observed(&self) -> &[NodeId] {
        &self.observed
    }

    /// Number of `bounding_rect` calls so far.
    pub fn rect_reads(&self) -> usize {
        self.rect_reads.get()
    }
}

impl Host for MemoryHost {
    type Node = NodeId;

    fn create_element(&mut self, spec: &ElementSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(MemoryNode {
            tag: spec.tag.to_string(),
            class_name: spec.class_name(),
            styles: spec.styles.iter().cloned().collect(),
            ..MemoryNode::default()
        });
        id
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| c != child);
        }
        self.nodes[child.0].parent = Some(*parent);
        self.nodes[parent.0].children.push(*child);
    }

    fn clear_children(&mut self, parent: &NodeId) {
        let children = std::mem::take(&mut self.nodes[parent.0].children);
        for c in children {
            self.nodes[c.0].parent = None;
        }
    }

    fn set_class_name(&mut self, node: &NodeId, class_name: &str) {
        self.nodes[node.0].class_name = class_name.to_string();
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        self.nodes[node.0]
            .styles
            .insert(property.to_string(), value.to_string());
    }

    fn remove_style(&mut self, node: &NodeId, property: &str) {
        self.nodes[node.0].styles.remove(property);
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn bounding_rect(&self, node: &NodeId) -> Option<Rect> {
        self.rect_reads.set(self.rect_reads.get() + 1);
        if !self.is_mounted(*node) {
            return None;
        }
        self.nodes[node.0].rect
    }

    fn request_frame(&mut self, kind: FrameKind) -> FrameToken {
        self.next_token += 1;
        let token = FrameToken(self.next_token);
        self.pending.push((token, kind));
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        self.pending.retain(|(t, _)| *t != token);
    }

    fn observe_resize(&mut self, node: &NodeId) {
        if !self.observed.contains(node) {
            self.observed.push(*node);
        }
    }

    fn disconnect_resize(&mut self) {
        self.observed.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/memory.rs"]
mod tests;
