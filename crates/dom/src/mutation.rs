//! Structural change records emitted by document edits.
//!
//! This is the observer feed consumed by the rescan guard. Invariants:
//! - Every structural edit emits exactly one record, in edit order.
//! - Each added-node summary captures the element class at insertion time;
//!   the class attribute is the only signal a consumer may use to decide
//!   whether an insertion came from the wrapper itself.
//! - Character-data records never list added nodes.

use crate::types::{Id, Node};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    ChildList,
    CharacterData,
}

/// Snapshot of an inserted node at the moment of insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSummary {
    pub id: Id,
    pub name: Option<String>,
    pub class: Option<String>,
}

impl NodeSummary {
    pub fn of(node: &Node) -> Self {
        let name = match node {
            Node::Element { name, .. } => Some(name.clone()),
            _ => None,
        };
        Self {
            id: node.id(),
            name,
            class: node.class().map(str::to_string),
        }
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|c| c.split_whitespace().any(|t| t == name))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationRecord {
    pub kind: MutationKind,
    /// Parent whose child list changed, or the edited text node.
    pub target: Id,
    pub added: Vec<NodeSummary>,
    pub removed: Vec<Id>,
}

impl MutationRecord {
    pub fn child_list(target: Id, added: Vec<NodeSummary>, removed: Vec<Id>) -> Self {
        Self {
            kind: MutationKind::ChildList,
            target,
            added,
            removed,
        }
    }

    pub fn character_data(target: Id) -> Self {
        Self {
            kind: MutationKind::CharacterData,
            target,
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}
