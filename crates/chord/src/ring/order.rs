//! Identifier-sorted view of the ring.

use crate::error::{Error, Result};
use crate::id::Identifier;
use crate::node::NodeRef;
use crate::topology::Topology;

/// All nodes sorted by `(identifier, name)`.
///
/// Sorting once and binary-searching this list answers every "first node at
/// or after `x`" question asked while building finger tables and resolving
/// ownership. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingOrder {
    nodes: Vec<NodeRef>,
}

impl RingOrder {
    /// Sorts `nodes` into ring order.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if `nodes` is empty.
    pub fn new(mut nodes: Vec<NodeRef>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(Error::Configuration(
                "ring needs at least one node".to_string(),
            ));
        }
        nodes.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));
        Ok(Self { nodes })
    }

    /// Ring order of a topology whose nodes already have identifiers.
    pub fn from_topology(topology: &Topology) -> Result<Self> {
        if topology.is_empty() {
            return Err(Error::Configuration("topology is empty".to_string()));
        }
        let nodes = topology
            .iter()
            .map(|node| {
                node.node_ref().ok_or_else(|| {
                    Error::NotBuilt(format!("node '{}' has no identifier", node.name()))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(nodes)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true for a constructed order.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeRef> {
        self.nodes.iter()
    }

    /// Node with the smallest identifier (ties broken by name).
    pub fn first(&self) -> &NodeRef {
        &self.nodes[0]
    }

    /// Node at `pos` in ring order, wrapping.
    pub fn at(&self, pos: usize) -> &NodeRef {
        &self.nodes[pos % self.nodes.len()]
    }

    /// First node whose identifier is `>= target`, wrapping to the smallest
    /// identifier when none qualifies. This is the responsible node for a
    /// key `target`.
    pub fn successor_of(&self, target: Identifier) -> &NodeRef {
        let pos = self.nodes.partition_point(|node| node.id < target);
        self.nodes.get(pos).unwrap_or_else(|| self.first())
    }
}

impl<'a> IntoIterator for &'a RingOrder {
    type Item = &'a NodeRef;
    type IntoIter = std::slice::Iter<'a, NodeRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
