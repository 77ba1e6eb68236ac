//! Cursor-position lookup and logical-block context extraction.
//!
//! These operate on raw parse-tree parentage, independent of the
//! containment hierarchy: the "block around the cursor" is the top-level
//! ancestor in the syntax tree, not the heading scope that owns it.

use notegraph_syntax::{NodeId, Span, SyntaxTree};

/// External cursor location, 0-based line and character (editor convention).
/// Converted to the tree's 1-indexed coordinates internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

/// Any multi-line span scores above any single-line span.
const LINE_WEIGHT: usize = 10_000;

/// Find the most specific node covering `position`: the covering node with
/// the smallest span, ties broken by pre-order (first found wins). `None`
/// when nothing covers the position or the tree carries no spans.
pub fn find_node_at_position(tree: &SyntaxTree, position: Position) -> Option<NodeId> {
    let line = position.line + 1;
    let column = position.character + 1;

    let mut best: Option<(NodeId, usize)> = None;
    for id in tree.descendants() {
        let Some(span) = tree.span(id) else {
            continue;
        };
        if !span.contains(line, column) {
            continue;
        }
        let area = span_area(span);
        if best.is_none_or(|(_, smallest)| area < smallest) {
            best = Some((id, area));
        }
    }
    best.map(|(id, _)| id)
}

/// Span size for specificity comparison: single-line spans score by column
/// width alone; multi-line spans are weighted so they always score larger.
fn span_area(span: &Span) -> usize {
    let lines = span.line_span();
    if lines == 0 {
        span.column_span()
    } else {
        lines * LINE_WEIGHT + span.column_span()
    }
}

/// Source text of the logical block around `node`: the whole document when
/// `node` is the root, the node's own lines when it sits directly under the
/// root, otherwise the lines of its top-level ancestor. `None` when the
/// relevant node carries no span.
pub fn build_context(tree: &SyntaxTree, node: NodeId, source: &str) -> Option<String> {
    let path = tree.path_from_root(node);
    let target = match path.len() {
        1 => return Some(source.to_string()),
        2 => node,
        // Nearest ancestor that is a direct child of the root
        _ => path[1],
    };
    let span = tree.span(target)?;
    Some(slice_lines(source, span.start.line, span.end.line))
}

/// Inclusive 1-indexed line slice of `source`.
fn slice_lines(source: &str, start_line: usize, end_line: usize) -> String {
    source
        .lines()
        .skip(start_line.saturating_sub(1))
        .take(end_line.saturating_sub(start_line) + 1)
        .collect::<Vec<_>>()
        .join("\n")
}
