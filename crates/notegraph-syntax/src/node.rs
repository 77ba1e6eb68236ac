//! Arena-backed syntax tree handed to the containment engine.
//!
//! The tree is the contract with the parser: every node carries a kind tag,
//! an optional source span, and its children in document order. Nodes are
//! identified by [`NodeId`] (an index into the arena), so node identity is
//! positional rather than structural: two textually identical headings are
//! still distinct nodes.

/// A position in the source document. Lines and columns are 1-indexed;
/// `offset` is a byte offset into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl Point {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// Source range of a node, inclusive of both endpoints.
///
/// Absent only on synthetic nodes that were never parsed from text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Point,
    pub end: Point,
}

impl Span {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Whether this span covers the given 1-indexed (line, column) coordinate.
    pub fn contains(&self, line: usize, column: usize) -> bool {
        let after_start =
            line > self.start.line || (line == self.start.line && column >= self.start.column);
        let before_end = line < self.end.line || (line == self.end.line && column <= self.end.column);
        after_start && before_end
    }

    /// Number of lines the span crosses (0 for a single-line span).
    pub fn line_span(&self) -> usize {
        self.end.line.saturating_sub(self.start.line)
    }

    /// Column width between the endpoints.
    pub fn column_span(&self) -> usize {
        self.end.column.saturating_sub(self.start.column)
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// Kind tag for a syntax node, with kind-specific payloads.
///
/// Payloads live on the variant so that a heading always has a depth and a
/// task item always has its checked state; there is no property bag to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root, exactly one per tree.
    Root,
    /// ATX or setext heading; `depth` ≥ 1, smaller outranks larger.
    Heading { depth: u8 },
    /// List item; `checked` is set only on task items.
    ListItem { checked: Option<bool> },
    Blockquote,
    /// List container grouping its items; structural only.
    List,
    Paragraph,
    /// Literal text run.
    Text { value: String },
    Emphasis,
    Strong,
    InlineCode,
    /// Code block with its declared language, if any.
    Code { lang: Option<String> },
    /// Horizontal rule.
    ThematicBreak,
    Image,
    Link,
    /// Parser extension this engine doesn't model; treated as a plain leaf.
    Unknown { name: String },
}

impl NodeKind {
    /// Kinds that can logically own later nodes (Root, Heading, ListItem,
    /// Blockquote).
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeKind::Root
                | NodeKind::Heading { .. }
                | NodeKind::ListItem { .. }
                | NodeKind::Blockquote
        )
    }

    /// Transparent kinds never become a container or a member; their
    /// children attach to whatever scope is currently open.
    pub fn is_transparent(&self) -> bool {
        matches!(
            self,
            NodeKind::Root
                | NodeKind::List
                | NodeKind::Text { .. }
                | NodeKind::Emphasis
                | NodeKind::Strong
        )
    }

    /// Short name used in diagnostic output.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Heading { .. } => "heading",
            NodeKind::ListItem { .. } => "list_item",
            NodeKind::Blockquote => "blockquote",
            NodeKind::List => "list",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Text { .. } => "text",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::InlineCode => "inline_code",
            NodeKind::Code { .. } => "code",
            NodeKind::ThematicBreak => "thematic_break",
            NodeKind::Image => "image",
            NodeKind::Link => "link",
            NodeKind::Unknown { .. } => "unknown",
        }
    }
}

/// Index of a node within its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Arena index, usable for side tables sized with [`SyntaxTree::len`].
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    span: Option<Span>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The parsed document tree. Nodes are owned by the arena; parents own their
/// children exclusively (no sharing, no cycles).
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    /// Create a tree containing only a root node.
    pub fn with_root(kind: NodeKind, span: Option<Span>) -> Self {
        Self {
            nodes: vec![NodeData {
                kind,
                span,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Create an empty document tree (a bare `Root` with no span).
    pub fn empty() -> Self {
        Self::with_root(NodeKind::Root, None)
    }

    /// Append a new node as the last child of `parent`.
    pub fn push(&mut self, parent: NodeId, kind: NodeKind, span: Option<Span>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            span,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.index()].kind
    }

    pub fn span(&self, id: NodeId) -> Option<&Span> {
        self.nodes[id.index()].span.as_ref()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Number of nodes in the arena, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        false // the root always exists
    }

    /// Pre-order traversal of the whole tree, parents before children,
    /// children in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// Path from the root down to `id`, both endpoints included.
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut cur = id;
        while let Some(p) = self.parent(cur) {
            path.push(p);
            cur = p;
        }
        path.reverse();
        path
    }
}

/// Iterator returned by [`SyntaxTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn span(l1: usize, c1: usize, l2: usize, c2: usize) -> Span {
        Span::new(Point::new(l1, c1, 0), Point::new(l2, c2, 0))
    }

    #[test]
    fn push_records_parent_and_order() {
        let mut tree = SyntaxTree::empty();
        let root = tree.root();
        let h = tree.push(root, NodeKind::Heading { depth: 1 }, None);
        let p = tree.push(root, NodeKind::Paragraph, None);
        let t = tree.push(p, NodeKind::Text { value: "x".into() }, None);

        assert_eq!(tree.children(root), &[h, p]);
        assert_eq!(tree.parent(t), Some(p));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn descendants_is_preorder() {
        let mut tree = SyntaxTree::empty();
        let root = tree.root();
        let a = tree.push(root, NodeKind::Paragraph, None);
        let a1 = tree.push(a, NodeKind::Text { value: "a".into() }, None);
        let b = tree.push(root, NodeKind::Paragraph, None);

        let order: Vec<_> = tree.descendants().collect();
        assert_eq!(order, vec![root, a, a1, b]);
    }

    #[test]
    fn path_from_root_includes_both_endpoints() {
        let mut tree = SyntaxTree::empty();
        let root = tree.root();
        let list = tree.push(root, NodeKind::List, None);
        let item = tree.push(list, NodeKind::ListItem { checked: None }, None);

        assert_eq!(tree.path_from_root(item), vec![root, list, item]);
        assert_eq!(tree.path_from_root(root), vec![root]);
    }

    #[test]
    fn span_containment_is_inclusive_of_endpoints() {
        let s = span(2, 3, 2, 8);
        assert!(s.contains(2, 3));
        assert!(s.contains(2, 8));
        assert!(!s.contains(2, 2));
        assert!(!s.contains(2, 9));
        assert!(!s.contains(1, 5));

        let multi = span(1, 1, 3, 1);
        assert!(multi.contains(2, 40));
        assert!(!multi.contains(3, 2));
    }

    #[test]
    fn container_and_transparent_sets_are_disjoint_except_root() {
        let kinds = [
            NodeKind::Root,
            NodeKind::Heading { depth: 2 },
            NodeKind::ListItem { checked: Some(true) },
            NodeKind::Blockquote,
            NodeKind::List,
            NodeKind::Paragraph,
            NodeKind::Text { value: String::new() },
            NodeKind::Emphasis,
            NodeKind::Strong,
            NodeKind::Code { lang: None },
            NodeKind::ThematicBreak,
            NodeKind::Unknown { name: "html_block".into() },
        ];
        for kind in &kinds {
            if kind.is_container() && kind.is_transparent() {
                assert_eq!(kind, &NodeKind::Root, "only Root may be both");
            }
        }
    }
}
