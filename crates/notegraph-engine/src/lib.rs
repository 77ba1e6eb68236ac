pub mod containment;
pub mod cursor;
pub mod graph;

// Re-export key types for easier usage
pub use containment::{ContainerTag, ContainmentTree, render, render_with, resolve};
pub use cursor::{Position, build_context, find_node_at_position};
pub use graph::{CONTAINS, Relationship, relationships};
