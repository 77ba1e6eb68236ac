//! Single-pass, stack-based containment resolution.
//!
//! The pass walks the tree once in pre-order against an explicit stack of
//! open scopes (bottom always Root). Scope extent depends on *forward*
//! context: a heading stays open until a heading of equal or shallower
//! depth appears, so containers are closed by later nodes trimming the
//! stack, never by leaving their own subtree.

use notegraph_syntax::{NodeId, NodeKind, SyntaxTree};

use super::ContainerTag;

/// Walk `tree` once in document order, invoking `on_edge(container, member)`
/// for every node that belongs to a container.
///
/// Transparent kinds (List, Text, Strong, Emphasis, and Root on re-visit)
/// produce no edge and leave the stack alone; thematic breaks produce no
/// edge and unwind every open scope; containers attach to the current top
/// and open a new scope; everything else attaches to the current top as a
/// leaf. Every non-ignored, non-reset node receives exactly one edge, in
/// pre-order.
pub fn resolve(tree: &SyntaxTree, mut on_edge: impl FnMut(NodeId, NodeId)) {
    let root = tree.root();
    let mut stack: Vec<(NodeId, ContainerTag)> = vec![(root, ContainerTag::Root)];

    for &child in tree.children(root) {
        visit(tree, child, &mut stack, &mut on_edge);
    }

    debug_assert_eq!(stack[0].0, root, "Root scope must never be popped");
}

fn visit<F>(tree: &SyntaxTree, id: NodeId, stack: &mut Vec<(NodeId, ContainerTag)>, on_edge: &mut F)
where
    F: FnMut(NodeId, NodeId),
{
    let kind = tree.kind(id);

    if kind.is_transparent() {
        for &child in tree.children(id) {
            visit(tree, child, stack, on_edge);
        }
        return;
    }

    match kind {
        NodeKind::ThematicBreak => {
            // Hard reset: close every open scope, attach nothing.
            stack.truncate(1);
        }
        NodeKind::Heading { depth } => {
            // Close open headings of equal or deeper level, and any
            // list-item/blockquote scopes above the nearest strictly
            // shallower heading or Root.
            while stack.len() > 1 && !shelters_heading(stack.last().map(|f| f.1), *depth) {
                stack.pop();
            }
            attach_container(tree, id, stack, on_edge);
        }
        NodeKind::ListItem { .. } => {
            if let Some(&(top, ContainerTag::ListItem)) = stack.last()
                && !is_direct_parent_item(tree, top, id)
            {
                // Sibling or unrelated item: full reset to Root. This also
                // discards any enclosing heading/blockquote scopes.
                stack.truncate(1);
            }
            attach_container(tree, id, stack, on_edge);
        }
        NodeKind::Blockquote => {
            attach_container(tree, id, stack, on_edge);
        }
        _ => {
            // Leaf/content node: attach, never becomes a scope. Children
            // (if any) still resolve against the current top.
            let (top, _) = *scope_top(stack);
            on_edge(top, id);
            for &child in tree.children(id) {
                visit(tree, child, stack, on_edge);
            }
        }
    }
}

/// Whether the scope under a new heading of depth `depth` may stay open:
/// only a strictly shallower heading shelters it (Root is handled by the
/// stack-length guard).
fn shelters_heading(top: Option<ContainerTag>, depth: u8) -> bool {
    matches!(top, Some(ContainerTag::Heading { depth: d }) if d < depth)
}

/// Whether `top` is the direct structural parent of list item `item`:
/// true only if `item`'s immediate enclosing List node is itself one of
/// `top`'s own children (a sub-list one level down).
fn is_direct_parent_item(tree: &SyntaxTree, top: NodeId, item: NodeId) -> bool {
    let Some(list) = tree.parent(item) else {
        return false;
    };
    if !matches!(tree.kind(list), NodeKind::List) {
        return false;
    }
    tree.parent(list) == Some(top)
}

/// Emit the edge for a container node, push it as the new innermost scope,
/// then resolve its children inside that scope.
fn attach_container<F>(
    tree: &SyntaxTree,
    id: NodeId,
    stack: &mut Vec<(NodeId, ContainerTag)>,
    on_edge: &mut F,
) where
    F: FnMut(NodeId, NodeId),
{
    let (top, _) = *scope_top(stack);
    on_edge(top, id);

    let tag = match ContainerTag::for_kind(tree.kind(id)) {
        Some(tag) => tag,
        // attach_container is only reached from container arms
        None => unreachable!("non-container kind {:?} pushed as scope", tree.kind(id)),
    };
    stack.push((id, tag));

    for &child in tree.children(id) {
        visit(tree, child, stack, on_edge);
    }
}

fn scope_top(stack: &[(NodeId, ContainerTag)]) -> &(NodeId, ContainerTag) {
    stack
        .last()
        .unwrap_or_else(|| unreachable!("scope stack lost its Root frame"))
}
