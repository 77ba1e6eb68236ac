//! Human-readable rendering of the containment structure, for logs and
//! debugging. One node per line, indentation by nesting level.
//!
//! The resolver itself never produces cycles or shared members, but the
//! rendering may be handed an externally-mutated adjacency, so it defends
//! with a path-local visited set (true cycles get a marker) and a global
//! one (shared duplicates render once and are then skipped).

use std::collections::HashSet;
use std::fmt::Write;

use notegraph_syntax::{NodeId, NodeKind, SyntaxTree};

use super::tree::ContainmentTree;

/// Containers with more direct leaf members than this get them collapsed
/// into a single per-kind summary line.
const COLLAPSE_THRESHOLD: usize = 5;

/// Resolve `tree` and render its containment structure.
pub fn render(tree: &SyntaxTree) -> String {
    let containment = ContainmentTree::build(tree);
    render_with(tree, &containment)
}

/// Render a previously built adjacency.
pub fn render_with(tree: &SyntaxTree, containment: &ContainmentTree) -> String {
    let mut out = String::new();
    let mut on_path = HashSet::new();
    let mut seen = HashSet::new();
    render_node(
        tree,
        containment,
        tree.root(),
        0,
        &mut on_path,
        &mut seen,
        &mut out,
    );
    out
}

fn render_node(
    tree: &SyntaxTree,
    containment: &ContainmentTree,
    id: NodeId,
    depth: usize,
    on_path: &mut HashSet<NodeId>,
    seen: &mut HashSet<NodeId>,
    out: &mut String,
) {
    let indent = "  ".repeat(depth);

    if on_path.contains(&id) {
        tracing::warn!(node = id.index(), "cycle in containment adjacency");
        let _ = writeln!(out, "{indent}{} [circular reference]", describe(tree, id));
        return;
    }
    if !seen.insert(id) {
        // Already rendered under another branch
        return;
    }

    let _ = writeln!(out, "{indent}{}", describe(tree, id));

    on_path.insert(id);
    let members = containment.members(id);
    let leaf_count = members
        .iter()
        .filter(|&&m| !tree.kind(m).is_container())
        .count();

    if leaf_count > COLLAPSE_THRESHOLD {
        let summary = summarize_leaves(tree, members);
        let child_indent = "  ".repeat(depth + 1);
        let _ = writeln!(out, "{child_indent}{leaf_count} members: {summary}");
        for &member in members {
            if tree.kind(member).is_container() {
                render_node(tree, containment, member, depth + 1, on_path, seen, out);
            }
        }
    } else {
        for &member in members {
            render_node(tree, containment, member, depth + 1, on_path, seen, out);
        }
    }
    on_path.remove(&id);
}

/// Per-kind counts for collapsed leaf members, in first-seen order.
fn summarize_leaves(tree: &SyntaxTree, members: &[NodeId]) -> String {
    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for &member in members {
        let kind = tree.kind(member);
        if kind.is_container() {
            continue;
        }
        let label = kind.label();
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }
    counts
        .iter()
        .map(|(label, n)| format!("{label} x{n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line description of a node: kind, kind-specific detail, and span.
fn describe(tree: &SyntaxTree, id: NodeId) -> String {
    let mut line = match tree.kind(id) {
        NodeKind::Heading { depth } => format!("heading[{depth}]"),
        NodeKind::ListItem {
            checked: Some(checked),
        } => format!("list_item [{}]", if *checked { "x" } else { " " }),
        NodeKind::Code { lang: Some(lang) } => format!("code ({lang})"),
        NodeKind::Text { value } => format!("text {value:?}"),
        NodeKind::Unknown { name } => format!("unknown ({name})"),
        other => other.label().to_string(),
    };
    if let Some(span) = tree.span(id) {
        let _ = write!(line, " ({span})");
    }
    line
}
