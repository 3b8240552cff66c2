use super::*;

#[test]
fn created_elements_are_unmounted_until_appended() {
    let mut host = MemoryHost::new();
    let root = host.create_root("div");
    let child = host.create_element(&ElementSpec::div().class("ray"));
    host.set_rect(child, Rect::new(0.0, 0.0, 10.0, 10.0));

    assert!(!host.is_mounted(child));
    assert_eq!(host.bounding_rect(&child), None);

    host.append_child(&root, &child);
    assert!(host.is_mounted(child));
    assert_eq!(host.bounding_rect(&child), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
    assert_eq!(host.node(child).class_name, "ray");
}

#[test]
fn clear_children_detaches() {
    let mut host = MemoryHost::new();
    let root = host.create_root("div");
    let a = host.create_element(&ElementSpec::div());
    let b = host.create_element(&ElementSpec::div());
    host.append_child(&root, &a);
    host.append_child(&root, &b);
    assert_eq!(host.children(root), &[a, b]);

    host.clear_children(&root);
    assert!(host.children(root).is_empty());
    assert!(!host.is_mounted(a));
}

#[test]
fn cancelled_frames_leave_the_queue() {
    let mut host = MemoryHost::new();
    let t1 = host.request_frame(FrameKind::Layout);
    let t2 = host.request_frame(FrameKind::Animation);
    host.cancel_frame(t1);
    host.cancel_frame(FrameToken(999));
    assert_eq!(host.pending_frames(), &[(t2, FrameKind::Animation)]);
    assert_eq!(host.take_frames().len(), 1);
    assert!(host.pending_frames().is_empty());
}

#[test]
fn spec_styles_are_applied_and_attributes_set_later() {
    let mut host = MemoryHost::new();
    let n = host.create_element(&ElementSpec::div().style("opacity", "0.3"));
    assert_eq!(host.style(n, "opacity"), Some("0.3"));
    assert!(host.node(n).attributes.is_empty());

    host.set_attribute(&n, "aria-hidden", "true");
    assert_eq!(
        host.node(n).attributes.get("aria-hidden").map(String::as_str),
        Some("true")
    );
}
