//! Node implementation for the correlation graph

use super::types::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A node in the correlation graph
///
/// Identity is the string `name` (an indicator value, a normalized tag or a
/// country). `kinds` records every role the name was inserted under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Dense identifier, stable for the life of the graph
    pub id: NodeId,

    /// Node identifier string
    pub name: String,

    /// Roles this node was inserted under
    pub kinds: BTreeSet<NodeKind>,
}

impl Node {
    /// Create a new node with a single kind
    pub fn new(id: NodeId, name: impl Into<String>, kind: NodeKind) -> Self {
        let mut kinds = BTreeSet::new();
        kinds.insert(kind);

        Node {
            id,
            name: name.into(),
            kinds,
        }
    }

    /// Add a kind, returning true if it was not already present
    pub fn add_kind(&mut self, kind: NodeKind) -> bool {
        self.kinds.insert(kind)
    }

    pub fn has_kind(&self, kind: NodeKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// True when the identifier was inserted under more than one role
    pub fn is_ambiguous(&self) -> bool {
        self.kinds.len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_node() {
        let node = Node::new(NodeId::new(0), "aaa", NodeKind::Indicator);
        assert_eq!(node.name, "aaa");
        assert!(node.has_kind(NodeKind::Indicator));
        assert!(!node.is_ambiguous());
    }

    #[test]
    fn test_add_kind() {
        let mut node = Node::new(NodeId::new(3), "Georgia", NodeKind::Tag);
        assert!(node.add_kind(NodeKind::Country));
        assert!(!node.add_kind(NodeKind::Country));
        assert!(node.is_ambiguous());
        assert_eq!(
            node.kinds.iter().copied().collect::<Vec<_>>(),
            vec![NodeKind::Tag, NodeKind::Country]
        );
    }
}
