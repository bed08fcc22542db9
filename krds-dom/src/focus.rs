use crate::document::{Node, NodeId, Tree};
use crate::element::Tag;

/// Whether a node takes part in sequential (Tab) navigation.
///
/// A negative tab index always opts out, and a disabled form control never
/// takes focus. Otherwise links with an `href`, form controls and anything
/// with a non-negative tab index are in.
pub(crate) fn is_tabbable(node: &Node) -> bool {
    if node.tab_index.is_some_and(|index| index < 0) {
        return false;
    }
    if node.tag.is_form_control() && node.disabled {
        return false;
    }
    match node.tag {
        Tag::A if node.href.is_some() => true,
        Tag::Button | Tag::Input | Tag::Select | Tag::Textarea => true,
        _ => node.tab_index.is_some(),
    }
}

/// Whether `focus()` may land on a node. Broader than [`is_tabbable`]:
/// a negative tab index still allows programmatic focus.
pub(crate) fn can_focus(node: &Node) -> bool {
    if node.tag.is_form_control() && node.disabled {
        return false;
    }
    is_tabbable(node) || node.tab_index.is_some()
}

/// Collect the tabbable descendants of `container` in tree order.
/// The container itself is never part of the result.
pub(crate) fn collect_focusable(tree: &Tree, container: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    if let Some(node) = tree.node(container) {
        for &child in &node.children {
            collect_focusable_recursive(tree, child, &mut result);
        }
    }
    result
}

fn collect_focusable_recursive(tree: &Tree, id: NodeId, result: &mut Vec<NodeId>) {
    let Some(node) = tree.node(id) else {
        return;
    };
    if is_tabbable(node) {
        result.push(id);
    }
    for &child in &node.children {
        collect_focusable_recursive(tree, child, result);
    }
}

/// The element native Tab navigation moves to from `current`.
///
/// Walks the whole connected tree in order, so a `current` that is not
/// itself tabbable (a `tab_index(-1)` panel, say) still has a well defined
/// neighbour. Returns `None` past either end, which hands focus back to the
/// body.
pub(crate) fn sequential_target(
    tree: &Tree,
    current: Option<NodeId>,
    backward: bool,
) -> Option<NodeId> {
    let mut order = Vec::new();
    preorder(tree, tree.root(), &mut order);

    let position = current.and_then(|id| order.iter().position(|&n| n == id));
    let tabbable = |id: &NodeId| tree.node(*id).is_some_and(is_tabbable);

    match (position, backward) {
        (None, false) => order.iter().copied().find(tabbable),
        (None, true) => order.iter().rev().copied().find(tabbable),
        (Some(i), false) => order[i + 1..].iter().copied().find(tabbable),
        (Some(i), true) => order[..i].iter().rev().copied().find(tabbable),
    }
}

fn preorder(tree: &Tree, id: NodeId, order: &mut Vec<NodeId>) {
    order.push(id);
    if let Some(node) = tree.node(id) {
        for &child in &node.children {
            preorder(tree, child, order);
        }
    }
}
