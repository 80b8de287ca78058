//! Ring builder: places nodes on the ring and links successors.
//!
//! # Algorithm
//!
//! 1. Hash every node name to an identifier.
//! 2. Sort `(identifier, name)` pairs.
//! 3. Link `sorted[i].successor = sorted[(i + 1) mod n]`.
//!
//! Every identifier is computed and checked before any node is touched, so a
//! failed build leaves the topology exactly as it was.

use crate::error::{Error, Result};
use crate::hash::IdHasher;
use crate::id::IdentifierSpace;
use crate::node::NodeRef;
use crate::ring::order::RingOrder;
use crate::topology::Topology;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// What to do when two node names hash to the same identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Fail the build with [`Error::HashCollision`].
    Reject,
    /// Keep both nodes; order them by name within the shared identifier.
    #[default]
    LexicalTieBreak,
}

/// Builds the successor overlay of a topology.
#[derive(Clone, Copy, Debug)]
pub struct RingBuilder {
    space: IdentifierSpace,
    collision_policy: CollisionPolicy,
}

impl RingBuilder {
    pub fn new(space: IdentifierSpace) -> Self {
        Self {
            space,
            collision_policy: CollisionPolicy::default(),
        }
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    pub fn space(&self) -> IdentifierSpace {
        self.space
    }

    /// Assigns identifiers and successors to every node in `topology`.
    ///
    /// Returns the ring order that was built.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] for an empty topology or a hasher output outside the ring
    /// - [`Error::HashCollision`] under [`CollisionPolicy::Reject`]
    /// - [`Error::IdentifierReassigned`] if a node was previously placed elsewhere
    pub fn build(&self, topology: &mut Topology, hasher: &dyn IdHasher) -> Result<RingOrder> {
        if topology.is_empty() {
            return Err(Error::Configuration(
                "cannot build a ring from an empty topology".to_string(),
            ));
        }

        let placed = topology
            .iter()
            .map(|node| {
                let id = hasher.identifier(node.name(), &self.space);
                if !self.space.contains(id) {
                    return Err(Error::Configuration(format!(
                        "hasher {} placed '{}' at {}, outside ring of size {}",
                        hasher.name(),
                        node.name(),
                        id,
                        self.space.size()
                    )));
                }
                if let Some(old) = node.id().filter(|old| *old != id) {
                    return Err(Error::IdentifierReassigned {
                        name: node.name().to_string(),
                        old,
                        new: id,
                    });
                }
                Ok(NodeRef::new(node.name(), id))
            })
            .collect::<Result<Vec<_>>>()?;

        let order = RingOrder::new(placed)?;
        self.check_collisions(&order)?;

        for pos in 0..order.len() {
            let current = order.at(pos);
            let successor = order.at(pos + 1);
            let node = topology
                .get_mut(&current.name)
                .ok_or_else(|| Error::UnknownNode(current.name.clone()))?;
            node.assign_id(current.id)?;
            node.set_successor(successor.clone());
            trace!(node = %current, successor = %successor, "linked successor");
        }

        debug!(
            nodes = order.len(),
            bits = self.space.bits(),
            hasher = hasher.name(),
            "ring overlay built"
        );
        Ok(order)
    }

    fn check_collisions(&self, order: &RingOrder) -> Result<()> {
        for pos in 1..order.len() {
            let (prev, cur) = (order.at(pos - 1), order.at(pos));
            if prev.id != cur.id {
                continue;
            }
            match self.collision_policy {
                CollisionPolicy::Reject => {
                    return Err(Error::HashCollision {
                        id: cur.id,
                        first: prev.name.clone(),
                        second: cur.name.clone(),
                    })
                }
                CollisionPolicy::LexicalTieBreak => {
                    debug!(id = %cur.id, first = %prev.name, second = %cur.name, "identifier shared, ordered by name");
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{SipIdHasher, StaticIdHasher};
    use crate::id::Identifier;

    fn space(bits: u32) -> IdentifierSpace {
        IdentifierSpace::new(bits).unwrap()
    }

    fn successor_of(topology: &Topology, name: &str) -> String {
        topology.get(name).unwrap().successor().unwrap().name.clone()
    }

    #[test]
    fn test_links_successors_in_id_order() {
        let mut topology = Topology::from_names(["c", "a", "b"]).unwrap();
        let hasher = StaticIdHasher::new().assign("a", 1).assign("b", 3).assign("c", 6);

        let order = RingBuilder::new(space(3)).build(&mut topology, &hasher).unwrap();

        assert_eq!(order.len(), 3);
        assert_eq!(successor_of(&topology, "a"), "b");
        assert_eq!(successor_of(&topology, "b"), "c");
        assert_eq!(successor_of(&topology, "c"), "a");
        assert_eq!(topology.get("c").unwrap().id(), Some(Identifier(6)));
    }

    #[test]
    fn test_single_node_is_its_own_successor() {
        let mut topology = Topology::from_names(["solo"]).unwrap();
        RingBuilder::new(space(4)).build(&mut topology, &SipIdHasher).unwrap();
        assert_eq!(successor_of(&topology, "solo"), "solo");
    }

    #[test]
    fn test_empty_topology_rejected() {
        let mut topology = Topology::new();
        let err = RingBuilder::new(space(4))
            .build(&mut topology, &SipIdHasher)
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_collision_rejected_without_mutation() {
        let mut topology = Topology::from_names(["x", "y", "z"]).unwrap();
        let hasher = StaticIdHasher::new().assign("x", 2).assign("y", 2).assign("z", 5);

        let err = RingBuilder::new(space(3))
            .with_collision_policy(CollisionPolicy::Reject)
            .build(&mut topology, &hasher)
            .unwrap_err();

        assert_eq!(
            err,
            Error::HashCollision {
                id: Identifier(2),
                first: "x".into(),
                second: "y".into(),
            }
        );
        assert!(topology.iter().all(|n| n.id().is_none() && n.successor().is_none()));
    }

    #[test]
    fn test_collision_tie_break_by_name() {
        let mut topology = Topology::from_names(["y", "x", "z"]).unwrap();
        let hasher = StaticIdHasher::new().assign("x", 2).assign("y", 2).assign("z", 5);

        // Tie-breaking is the default policy.
        RingBuilder::new(space(3)).build(&mut topology, &hasher).unwrap();

        assert_eq!(successor_of(&topology, "x"), "y");
        assert_eq!(successor_of(&topology, "y"), "z");
        assert_eq!(successor_of(&topology, "z"), "x");
    }

    #[test]
    fn test_out_of_range_identifier_rejected() {
        let mut topology = Topology::from_names(["a"]).unwrap();
        let hasher = StaticIdHasher::new().assign("a", 8);
        let err = RingBuilder::new(space(3)).build(&mut topology, &hasher).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(topology.get("a").unwrap().id().is_none());
    }

    #[test]
    fn test_rebuild_is_stable_but_reassignment_fails() {
        let mut topology = Topology::from_names(["a", "b"]).unwrap();
        let builder = RingBuilder::new(space(3));
        let first = StaticIdHasher::new().assign("a", 1).assign("b", 4);
        let again = builder.build(&mut topology, &first).unwrap();
        assert_eq!(builder.build(&mut topology, &first).unwrap(), again);

        let moved = StaticIdHasher::new().assign("a", 2).assign("b", 4);
        let err = builder.build(&mut topology, &moved).unwrap_err();
        assert!(matches!(err, Error::IdentifierReassigned { .. }));
        assert_eq!(topology.get("a").unwrap().id(), Some(Identifier(1)));
    }
}
