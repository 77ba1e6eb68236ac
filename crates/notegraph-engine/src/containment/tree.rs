//! Adjacency view over one resolution pass: container → ordered members.

use notegraph_syntax::{NodeId, SyntaxTree};

use super::{ContainerTag, resolver::resolve};

/// Containment adjacency for one document version.
///
/// Built by running the resolver once and accumulating members per container
/// in first-seen, append order. Lookup is O(1) by node identity (side tables
/// indexed by arena id). Rebuilding on the same unmodified tree yields the
/// same content; the input tree is never mutated.
#[derive(Debug, Clone)]
pub struct ContainmentTree {
    pub(crate) members: Vec<Vec<NodeId>>,
    pub(crate) tags: Vec<Option<ContainerTag>>,
}

impl ContainmentTree {
    /// Run one resolution pass over `tree` and build the adjacency map.
    pub fn build(tree: &SyntaxTree) -> Self {
        let mut members = vec![Vec::new(); tree.len()];
        let mut tags: Vec<Option<ContainerTag>> = vec![None; tree.len()];
        tags[tree.root().index()] = Some(ContainerTag::Root);

        resolve(tree, |container, member| {
            members[container.index()].push(member);
            if tags[member.index()].is_none() {
                tags[member.index()] = ContainerTag::for_kind(tree.kind(member));
            }
        });

        Self { members, tags }
    }

    /// Direct (one level) members of `container`, in document order.
    /// Empty for nodes with no members, never an error.
    pub fn members(&self, container: NodeId) -> &[NodeId] {
        &self.members[container.index()]
    }

    /// Container tag assigned during resolution, `None` for nodes that were
    /// never recognized as containers.
    pub fn tag(&self, id: NodeId) -> Option<ContainerTag> {
        self.tags[id.index()]
    }
}
