//! Containment resolution: derives the implicit hierarchy of a flat,
//! ordered document tree (a heading owns everything until the next
//! equal-or-shallower heading, a list item owns its nested items, a
//! blockquote owns its body, a horizontal rule resets to the root).

pub mod inspect;
pub mod resolver;
pub mod tree;

pub use inspect::{render, render_with};
pub use resolver::resolve;
pub use tree::ContainmentTree;

use notegraph_syntax::NodeKind;

/// Scope tag assigned to a node the first time it is recognized as a
/// container during a resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerTag {
    Root,
    /// Heading scope; the depth is kept for comparison against later
    /// headings (smaller depth outranks larger).
    Heading { depth: u8 },
    ListItem,
    Blockquote,
}

impl ContainerTag {
    /// Tag for a container kind, `None` for everything else.
    pub fn for_kind(kind: &NodeKind) -> Option<ContainerTag> {
        match kind {
            NodeKind::Root => Some(ContainerTag::Root),
            NodeKind::Heading { depth } => Some(ContainerTag::Heading { depth: *depth }),
            NodeKind::ListItem { .. } => Some(ContainerTag::ListItem),
            NodeKind::Blockquote => Some(ContainerTag::Blockquote),
            _ => None,
        }
    }
}
