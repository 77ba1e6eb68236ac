pub mod node;
pub mod parse;

// Re-export key types for easier usage
pub use node::{NodeId, NodeKind, Point, Span, SyntaxTree};
pub use parse::{ParseError, parse};
