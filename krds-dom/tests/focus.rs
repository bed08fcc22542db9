use krds_dom::{Document, Element, Key, KeyboardEvent, Modifiers, MouseButton, NodeId};

fn ids(doc: &Document, nodes: &[NodeId]) -> Vec<String> {
    // Map node ids back to their `id` attributes for readable assertions.
    nodes
        .iter()
        .map(|&node| {
            ["a", "b", "c", "link", "plain", "skip", "custom", "off", "panel", "outside"]
                .iter()
                .find(|name| doc.get_by_id(name) == Some(node))
                .map(|name| name.to_string())
                .unwrap_or_else(|| node.to_string())
        })
        .collect()
}

fn tab(doc: &Document) -> KeyboardEvent {
    doc.key_down(KeyboardEvent::press(Key::Tab))
}

fn shift_tab(doc: &Document) -> KeyboardEvent {
    doc.key_down(KeyboardEvent::new(Key::Tab, Modifiers::shift()))
}

// ============================================================================
// Focusable set
// ============================================================================

#[test]
fn test_focusable_criteria() {
    let doc = Document::new();
    let panel = doc
        .append(
            doc.body(),
            Element::div()
                .id("panel")
                .child(Element::link("/home").id("link"))
                .child(Element::anchor().id("plain"))
                .child(Element::button().id("a"))
                .child(Element::button().id("off").disabled(true))
                .child(Element::input().id("skip").tab_index(-1))
                .child(Element::div().id("custom").tab_index(0))
                .child(Element::select().id("b"))
                .child(Element::textarea().id("c")),
        )
        .unwrap();

    let focusable = doc.focusable_within(panel);
    assert_eq!(ids(&doc, &focusable), vec!["link", "a", "custom", "b", "c"]);
}

#[test]
fn test_disabled_control_with_tab_index_is_excluded() {
    let doc = Document::new();
    let panel = doc
        .append(
            doc.body(),
            Element::div().child(Element::button().id("off").disabled(true).tab_index(0)),
        )
        .unwrap();

    assert!(doc.focusable_within(panel).is_empty());
}

#[test]
fn test_focusable_excludes_container_and_uses_tree_order() {
    let doc = Document::new();
    let panel = doc
        .append(
            doc.body(),
            Element::div()
                .id("panel")
                .tab_index(0)
                .child(Element::div().child(Element::button().id("a")))
                .child(Element::button().id("b"))
                .child(Element::div().child(Element::div().child(Element::button().id("c")))),
        )
        .unwrap();

    assert_eq!(ids(&doc, &doc.focusable_within(panel)), vec!["a", "b", "c"]);
}

#[test]
fn test_focusable_set_tracks_mutations() {
    let doc = Document::new();
    let panel = doc
        .append(doc.body(), Element::div().child(Element::button().id("a")))
        .unwrap();
    let a = doc.get_by_id("a").unwrap();

    assert_eq!(doc.focusable_within(panel), vec![a]);

    doc.set_disabled(a, true).unwrap();
    assert!(doc.focusable_within(panel).is_empty());

    let b = doc.append(panel, Element::button().id("b")).unwrap();
    assert_eq!(doc.focusable_within(panel), vec![b]);

    doc.set_tab_index(b, Some(-1)).unwrap();
    assert!(doc.focusable_within(panel).is_empty());
}

// ============================================================================
// Programmatic focus
// ============================================================================

#[test]
fn test_focus_and_blur() {
    let doc = Document::new();
    let a = doc.append(doc.body(), Element::button()).unwrap();
    let b = doc.append(doc.body(), Element::button()).unwrap();

    assert_eq!(doc.active_element(), None);
    assert!(doc.focus(a));
    assert!(!doc.focus(a));
    assert!(doc.focus(b));
    assert_eq!(doc.active_element(), Some(b));

    assert!(doc.blur());
    assert_eq!(doc.active_element(), None);
    assert!(!doc.blur());
}

#[test]
fn test_focus_rejects_unfocusable_nodes() {
    let doc = Document::new();
    let text = doc.append(doc.body(), Element::span().text("hi")).unwrap();
    let off = doc.append(doc.body(), Element::button().disabled(true)).unwrap();
    let gone = doc.append(doc.body(), Element::button()).unwrap();
    doc.remove(gone).unwrap();

    assert!(!doc.focus(text));
    assert!(!doc.focus(off));
    assert!(!doc.focus(gone));
    assert_eq!(doc.active_element(), None);
}

#[test]
fn test_negative_tab_index_is_programmatically_focusable() {
    let doc = Document::new();
    let panel = doc.append(doc.body(), Element::div().tab_index(-1)).unwrap();

    assert!(!doc.is_tabbable(panel));
    assert!(doc.focus(panel));
}

#[test]
fn test_disabling_focused_element_blurs_it() {
    let doc = Document::new();
    let a = doc.append(doc.body(), Element::button()).unwrap();
    doc.focus(a);

    doc.set_disabled(a, true).unwrap();
    assert_eq!(doc.active_element(), None);
}

// ============================================================================
// Native Tab navigation
// ============================================================================

#[test]
fn test_tab_walks_document_order() {
    let doc = Document::new();
    let a = doc.append(doc.body(), Element::button().id("a")).unwrap();
    doc.append(doc.body(), Element::span()).unwrap();
    let b = doc.append(doc.body(), Element::input().id("b")).unwrap();

    tab(&doc);
    assert_eq!(doc.active_element(), Some(a));
    tab(&doc);
    assert_eq!(doc.active_element(), Some(b));

    // Past the end focus returns to the body.
    tab(&doc);
    assert_eq!(doc.active_element(), None);

    tab(&doc);
    assert_eq!(doc.active_element(), Some(a));
}

#[test]
fn test_shift_tab_walks_backward() {
    let doc = Document::new();
    let a = doc.append(doc.body(), Element::button()).unwrap();
    let b = doc.append(doc.body(), Element::button()).unwrap();

    shift_tab(&doc);
    assert_eq!(doc.active_element(), Some(b));
    shift_tab(&doc);
    assert_eq!(doc.active_element(), Some(a));
    shift_tab(&doc);
    assert_eq!(doc.active_element(), None);
}

#[test]
fn test_back_tab_is_shift_tab() {
    let doc = Document::new();
    doc.append(doc.body(), Element::button()).unwrap();
    let b = doc.append(doc.body(), Element::button()).unwrap();

    let event = doc.key_down(KeyboardEvent::press(Key::BackTab));
    assert_eq!(event.key, Key::Tab);
    assert!(event.modifiers.shift);
    assert_eq!(doc.active_element(), Some(b));
}

#[test]
fn test_tab_from_untabbable_element_continues_in_tree_order() {
    let doc = Document::new();
    doc.append(doc.body(), Element::button()).unwrap();
    let panel = doc
        .append(doc.body(), Element::div().tab_index(-1).child(Element::button().id("a")))
        .unwrap();
    let a = doc.get_by_id("a").unwrap();

    doc.focus(panel);
    tab(&doc);
    assert_eq!(doc.active_element(), Some(a));
}

#[test]
fn test_prevented_tab_does_not_move_focus() {
    let doc = Document::new();
    let a = doc.append(doc.body(), Element::button()).unwrap();
    doc.append(doc.body(), Element::button()).unwrap();
    doc.focus(a);

    let _guard = doc.listen_key(
        krds_dom::ListenerTarget::Document,
        krds_dom::ListenerPhase::Bubble,
        |event| event.prevent_default(),
    );

    let event = tab(&doc);
    assert!(event.default_prevented());
    assert_eq!(doc.active_element(), Some(a));
}

// ============================================================================
// Pointer focus
// ============================================================================

#[test]
fn test_click_focuses_nearest_focusable_ancestor() {
    let doc = Document::new();
    let button = doc
        .append(doc.body(), Element::button().child(Element::span().id("label")))
        .unwrap();
    let label = doc.get_by_id("label").unwrap();

    doc.click(label, MouseButton::Left).unwrap();
    assert_eq!(doc.active_element(), Some(button));
}

#[test]
fn test_click_on_inert_content_blurs() {
    let doc = Document::new();
    let button = doc.append(doc.body(), Element::button()).unwrap();
    let text = doc.append(doc.body(), Element::span()).unwrap();
    doc.focus(button);

    doc.click(text, MouseButton::Left).unwrap();
    assert_eq!(doc.active_element(), None);
}
