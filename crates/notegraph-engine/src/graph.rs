//! Output surface for the storage/graph collaborator: an ordered stream of
//! `(container, member, kind)` triples. Identifiers are minted by the
//! caller and correlated 1:1 with node identity for one processing session;
//! this core never assigns or persists them.

use notegraph_syntax::{NodeId, SyntaxTree};
use serde::Serialize;

use crate::containment::resolve;

/// Relationship kind for containment edges.
pub const CONTAINS: &str = "contains";

/// One relationship record, in the shape the storage backend ingests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relationship {
    pub from: u64,
    pub to: u64,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// Run one resolution pass and return its edges as relationship records in
/// emission (document) order. `mint` maps each node to its caller-assigned
/// stable identifier and must be consistent within the call.
pub fn relationships(tree: &SyntaxTree, mut mint: impl FnMut(NodeId) -> u64) -> Vec<Relationship> {
    let mut records = Vec::new();
    resolve(tree, |container, member| {
        records.push(Relationship {
            from: mint(container),
            to: mint(member),
            kind: CONTAINS,
        });
    });
    records
}
