//! Adapter from the tree-sitter-md CST to the [`SyntaxTree`] node model.
//!
//! tree-sitter groups headings and their following content under `section`
//! wrapper nodes; the adapter splices those away so the resulting tree is
//! flat in document order, which is the shape the containment engine expects
//! (a heading's extent is derived later, not taken from the grammar).

use tree_sitter::{Node as TsNode, Parser};
use tree_sitter_md::LANGUAGE;

use crate::node::{NodeId, NodeKind, Point, Span, SyntaxTree};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("failed to load markdown grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("parser returned no tree")]
    NoTree,
}

/// Parse markdown source into a positioned [`SyntaxTree`].
pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    let mut parser = Parser::new();
    parser.set_language(&LANGUAGE.into())?;
    let ts_tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;

    let ts_root = ts_tree.root_node();
    let mut tree = SyntaxTree::with_root(NodeKind::Root, Some(node_span(&ts_root)));
    let root = tree.root();
    convert_children(source, ts_root, &mut tree, root);
    Ok(tree)
}

fn convert_children(source: &str, node: TsNode, tree: &mut SyntaxTree, parent: NodeId) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        convert(source, child, tree, parent);
    }
}

fn convert(source: &str, node: TsNode, tree: &mut SyntaxTree, parent: NodeId) {
    // Empty nodes are parser artifacts
    if node.byte_range().is_empty() {
        return;
    }

    match node.kind() {
        // Sections only wrap a heading with the content after it; splice
        // their children so siblings stay flat in document order.
        "section" => convert_children(source, node, tree, parent),
        "atx_heading" | "setext_heading" => {
            let depth = heading_depth(source, &node);
            let id = tree.push(parent, NodeKind::Heading { depth }, Some(node_span(&node)));
            convert_children(source, node, tree, id);
        }
        "paragraph" => {
            let id = tree.push(parent, NodeKind::Paragraph, Some(node_span(&node)));
            convert_children(source, node, tree, id);
        }
        "inline" => {
            tree.push(
                parent,
                NodeKind::Text {
                    value: node_text(source, &node),
                },
                Some(node_span(&node)),
            );
        }
        "list" => {
            let id = tree.push(parent, NodeKind::List, Some(node_span(&node)));
            convert_children(source, node, tree, id);
        }
        "list_item" => {
            let checked = task_state(&node);
            let id = tree.push(parent, NodeKind::ListItem { checked }, Some(node_span(&node)));
            convert_children(source, node, tree, id);
        }
        "block_quote" => {
            let id = tree.push(parent, NodeKind::Blockquote, Some(node_span(&node)));
            convert_children(source, node, tree, id);
        }
        "fenced_code_block" => {
            let lang = code_language(source, &node);
            tree.push(parent, NodeKind::Code { lang }, Some(node_span(&node)));
        }
        "indented_code_block" => {
            tree.push(parent, NodeKind::Code { lang: None }, Some(node_span(&node)));
        }
        "thematic_break" => {
            tree.push(parent, NodeKind::ThematicBreak, Some(node_span(&node)));
        }
        kind if is_structural_marker(kind) => {
            // Markers are already captured on the node that owns them
        }
        other => {
            tracing::warn!(
                kind = other,
                line = node.start_position().row + 1,
                "unhandled markdown node kind, keeping as plain leaf"
            );
            tree.push(
                parent,
                NodeKind::Unknown {
                    name: other.to_string(),
                },
                Some(node_span(&node)),
            );
        }
    }
}

/// Marker/delimiter kinds whose content is folded into the owning node.
fn is_structural_marker(kind: &str) -> bool {
    matches!(
        kind,
        "list_marker_minus"
            | "list_marker_plus"
            | "list_marker_star"
            | "list_marker_dot"
            | "list_marker_parenthesis"
            | "task_list_marker_checked"
            | "task_list_marker_unchecked"
            | "block_continuation"
            | "block_quote_marker"
            | "setext_h1_underline"
            | "setext_h2_underline"
    ) || kind.starts_with("atx_h")
}

/// Heading depth from the marker node kind, falling back to counting `#`
/// characters in the source text.
fn heading_depth(source: &str, node: &TsNode) -> u8 {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let kind = child.kind();
        if let Some(rest) = kind.strip_prefix("atx_h")
            && let Some(digit) = rest.chars().next().and_then(|c| c.to_digit(10))
        {
            return digit as u8;
        }
        match kind {
            "setext_h1_underline" => return 1,
            "setext_h2_underline" => return 2,
            _ => {}
        }
    }
    let hashes = node_text(source, node)
        .chars()
        .take_while(|&c| c == '#')
        .count();
    (hashes.max(1) as u8).min(6)
}

/// Tri-state task checkbox for a list item: `None` for a plain item,
/// `Some(true)`/`Some(false)` for `[x]`/`[ ]`.
fn task_state(node: &TsNode) -> Option<bool> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "task_list_marker_checked" => return Some(true),
            "task_list_marker_unchecked" => return Some(false),
            _ => {}
        }
    }
    None
}

/// Declared language of a fenced code block, from its info string.
fn code_language(source: &str, node: &TsNode) -> Option<String> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "info_string" {
            let lang = node_text(source, &child).trim().to_string();
            if !lang.is_empty() {
                return Some(lang);
            }
        }
    }
    None
}

fn node_text(source: &str, node: &TsNode) -> String {
    String::from_utf8_lossy(&source.as_bytes()[node.byte_range()]).into_owned()
}

/// Convert tree-sitter's 0-based points to the model's 1-based coordinates.
fn node_span(node: &TsNode) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span::new(
        Point::new(start.row + 1, start.column + 1, node.start_byte()),
        Point::new(end.row + 1, end.column + 1, node.end_byte()),
    )
}
