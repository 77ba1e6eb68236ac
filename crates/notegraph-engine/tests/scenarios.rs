//! End-to-end scenarios: markdown source through the parser adapter into
//! containment resolution and cursor lookup.

use notegraph_engine::{ContainmentTree, Position, build_context, find_node_at_position, resolve};
use notegraph_syntax::{NodeId, NodeKind, SyntaxTree, parse};
use pretty_assertions::assert_eq;

fn edges(tree: &SyntaxTree) -> Vec<(NodeId, NodeId)> {
    let mut edges = Vec::new();
    resolve(tree, |c, m| edges.push((c, m)));
    edges
}

/// The single container of `member` after one pass; panics if containment
/// is not exactly one.
fn container_of(edges: &[(NodeId, NodeId)], member: NodeId) -> NodeId {
    let found: Vec<_> = edges.iter().filter(|&&(_, m)| m == member).collect();
    assert_eq!(found.len(), 1, "expected exactly one containing edge");
    found[0].0
}

/// First text run below `id`, trimmed.
fn text_below(tree: &SyntaxTree, id: NodeId) -> Option<String> {
    for &child in tree.children(id) {
        if let NodeKind::Text { value } = tree.kind(child) {
            return Some(value.trim().to_string());
        }
    }
    None
}

fn find_kind(tree: &SyntaxTree, want: &str, text: &str) -> NodeId {
    tree.descendants()
        .find(|&id| {
            tree.kind(id).label() == want && text_below(tree, id).as_deref() == Some(text)
        })
        .unwrap_or_else(|| panic!("no {want} node with text {text:?}"))
}

#[test]
fn heading_ladder_scenario() {
    let tree = parse("## A\nx\n### B\ny\n## C\nz\n").unwrap();
    let edges = edges(&tree);
    let root = tree.root();

    let a = find_kind(&tree, "heading", "A");
    let b = find_kind(&tree, "heading", "B");
    let c = find_kind(&tree, "heading", "C");
    let x = find_kind(&tree, "paragraph", "x");
    let y = find_kind(&tree, "paragraph", "y");
    let z = find_kind(&tree, "paragraph", "z");

    assert_eq!(container_of(&edges, a), root);
    assert_eq!(container_of(&edges, x), a);
    assert_eq!(container_of(&edges, b), a);
    assert_eq!(container_of(&edges, y), b);
    assert_eq!(container_of(&edges, c), root);
    assert_eq!(container_of(&edges, z), c);
}

#[test]
fn thematic_break_scenario() {
    let tree = parse("## S\n---\n## T\n").unwrap();
    let edges = edges(&tree);
    let root = tree.root();

    let s = find_kind(&tree, "heading", "S");
    let t = find_kind(&tree, "heading", "T");
    assert_eq!(container_of(&edges, s), root);
    assert_eq!(container_of(&edges, t), root);

    let hr = tree
        .descendants()
        .find(|&id| matches!(tree.kind(id), NodeKind::ThematicBreak))
        .expect("thematic break parsed");
    assert!(
        edges.iter().all(|&(c, m)| c != hr && m != hr),
        "thematic break must stay out of all edges"
    );
}

#[test]
fn nested_list_scenario() {
    let tree = parse("- a\n  - b\n").unwrap();
    let edges = edges(&tree);

    let a = find_kind(&tree, "paragraph", "a");
    let b = find_kind(&tree, "paragraph", "b");
    let item_a = container_of(&edges, a);
    let item_b = container_of(&edges, b);
    assert!(matches!(tree.kind(item_a), NodeKind::ListItem { .. }));
    assert!(matches!(tree.kind(item_b), NodeKind::ListItem { .. }));

    // b's item nests inside a's item.
    assert_eq!(container_of(&edges, item_b), item_a);
    assert_eq!(container_of(&edges, item_a), tree.root());
}

#[test]
fn sibling_list_items_scenario() {
    let tree = parse("- a\n- b\n").unwrap();
    let edges = edges(&tree);

    let item_a = container_of(&edges, find_kind(&tree, "paragraph", "a"));
    let item_b = container_of(&edges, find_kind(&tree, "paragraph", "b"));
    assert_ne!(item_a, item_b);

    // Siblings attach to the scope open before the list began, not to
    // each other.
    assert_eq!(container_of(&edges, item_a), tree.root());
    assert_eq!(container_of(&edges, item_b), tree.root());
}

#[test]
fn cursor_returns_smallest_covering_node() {
    let source = "# H\nhello world\n";
    let tree = parse(source).unwrap();

    // Inside "hello world" on the second line.
    let found = find_node_at_position(&tree, Position { line: 1, character: 3 })
        .expect("position is covered");
    assert!(
        matches!(tree.kind(found), NodeKind::Text { .. }),
        "expected the innermost text run, got {:?}",
        tree.kind(found)
    );

    let context = build_context(&tree, found, source).expect("context available");
    assert_eq!(context, "hello world");
}

#[test]
fn every_resolved_node_is_contained_exactly_once() {
    let source = "# top\npara\n\n> quote body\n\n- [x] done\n- [ ] todo\n\n```rust\ncode\n```\n\n---\n\ntail\n";
    let tree = parse(source).unwrap();
    let edges = edges(&tree);

    for id in tree.descendants() {
        let kind = tree.kind(id);
        let as_member = edges.iter().filter(|&&(_, m)| m == id).count();
        if kind.is_transparent() || matches!(kind, NodeKind::ThematicBreak) {
            assert_eq!(as_member, 0, "{} must not be a member", kind.label());
        } else {
            assert_eq!(as_member, 1, "{} must have one container", kind.label());
        }
    }
}

#[test]
fn rebuilding_the_containment_tree_is_stable() {
    let tree = parse("# a\n- x\n- y\n\n## b\nz\n").unwrap();
    let first = ContainmentTree::build(&tree);
    let second = ContainmentTree::build(&tree);

    for id in tree.descendants() {
        assert_eq!(first.members(id), second.members(id));
    }
}
