//! Finger-guided key lookup.
//!
//! # State machine
//!
//! ```text
//!            stores key
//! AtNode ──────────────────▶ Found
//!   │  ▲
//!   │  │ next hop: farthest finger containing the key,
//!   │  │ else the ring successor
//!   ▼  │
//! AtNode ── revisit / no next hop ──▶ Aborted ──▶ authoritative scan
//! ```
//!
//! A node is never visited twice, so a walk takes at most `n` steps. An
//! aborted walk is not an error for the caller: the responsible node is
//! then resolved directly from the ring order.

use crate::error::{Error, Result};
use crate::id::{Identifier, IdentifierSpace};
use crate::node::{Node, NodeRef, RingMember};
use crate::ring::order::RingOrder;
use crate::topology::Topology;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace, warn};

/// How the responsible node of a lookup was determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Finger routing reached a node storing the key.
    Routed,
    /// Routing did not converge; ownership was resolved from the ring order.
    Fallback,
}

/// Outcome of one lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LookupResponse {
    pub key: Identifier,
    /// Names of the visited nodes, in visit order, without duplicates.
    pub route: Vec<String>,
    pub responsible: NodeRef,
    pub resolution: Resolution,
}

impl LookupResponse {
    /// Number of hops taken between route entries.
    pub fn hops(&self) -> usize {
        self.route.len().saturating_sub(1)
    }
}

impl fmt::Display for LookupResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key {}: {} => {}",
            self.key,
            self.route.join(" -> "),
            self.responsible
        )?;
        if self.resolution == Resolution::Fallback {
            write!(f, " (fallback)")?;
        }
        Ok(())
    }
}

enum Abort {
    Cycle(String),
    NoNextHop(String),
}

enum Step<'a> {
    AtNode(&'a Node),
    Found(NodeRef),
    Aborted(Abort),
}

/// Routes lookups over a topology with built finger tables.
#[derive(Debug)]
pub struct Router<'a> {
    topology: &'a Topology,
    space: IdentifierSpace,
    order: RingOrder,
}

impl<'a> Router<'a> {
    /// # Errors
    ///
    /// [`Error::LookupOnEmptyTopology`] if the topology is empty or any node
    /// is missing its identifier or finger table.
    pub fn new(topology: &'a Topology, space: IdentifierSpace) -> Result<Self> {
        if topology.is_empty() || topology.iter().any(|n| n.finger_table().is_empty()) {
            return Err(Error::LookupOnEmptyTopology);
        }
        let order =
            RingOrder::from_topology(topology).map_err(|_| Error::LookupOnEmptyTopology)?;
        Ok(Self {
            topology,
            space,
            order,
        })
    }

    pub fn order(&self) -> &RingOrder {
        &self.order
    }

    /// Node that owns `key` by the ring rule, without routing.
    pub fn owner_of(&self, key: Identifier) -> &NodeRef {
        self.order.successor_of(key)
    }

    /// Looks up `key` starting from the first node in topology order.
    pub fn lookup_from_first(&self, key: Identifier) -> Result<LookupResponse> {
        let start = self.topology.first().ok_or(Error::LookupOnEmptyTopology)?;
        self.lookup(key, start.name())
    }

    /// Looks up `key` starting at the node named `start`.
    ///
    /// # Errors
    ///
    /// - [`Error::KeyOutOfRange`] if `key >= 2^m`
    /// - [`Error::UnknownNode`] if `start` is not in the topology
    pub fn lookup(&self, key: Identifier, start: &str) -> Result<LookupResponse> {
        let key = self.space.check(key)?;
        let start = self
            .topology
            .get(start)
            .ok_or_else(|| Error::UnknownNode(start.to_string()))?;

        let mut route = Vec::new();
        let mut visited = HashSet::new();
        let mut step = Step::AtNode(start);

        loop {
            step = match step {
                Step::AtNode(current) => self.advance(current, key, &mut route, &mut visited),
                Step::Found(responsible) => {
                    debug!(%key, responsible = %responsible, hops = route.len().saturating_sub(1), "lookup routed");
                    return Ok(LookupResponse {
                        key,
                        route,
                        responsible,
                        resolution: Resolution::Routed,
                    });
                }
                Step::Aborted(abort) => {
                    match &abort {
                        Abort::Cycle(node) => {
                            warn!(%key, %node, "routing revisited a node, resolving from ring order")
                        }
                        Abort::NoNextHop(node) => {
                            warn!(%key, %node, "no next hop, resolving from ring order")
                        }
                    }
                    return Ok(self.resolve(key, route));
                }
            };
        }
    }

    /// Next hop from `node` towards `key`: the successor of the highest
    /// finger whose interval contains the key, else the node's own ring
    /// successor.
    pub fn next_hop<N: RingMember>(node: &N, key: Identifier) -> Option<&NodeRef> {
        node.finger_table()
            .farthest_containing(key)
            .map(|entry| &entry.successor)
            .or_else(|| node.successor())
    }

    fn advance(
        &self,
        current: &'a Node,
        key: Identifier,
        route: &mut Vec<String>,
        visited: &mut HashSet<&'a str>,
    ) -> Step<'a> {
        let name = RingMember::name(current);
        if !visited.insert(name) {
            return Step::Aborted(Abort::Cycle(name.to_string()));
        }
        route.push(name.to_string());

        if RingMember::stores(current, key) {
            if let Some(id) = RingMember::id(current) {
                return Step::Found(NodeRef::new(name, id));
            }
        }

        let Some(next) = Self::next_hop(current, key) else {
            return Step::Aborted(Abort::NoNextHop(name.to_string()));
        };
        match self.topology.get(&next.name) {
            Some(node) => {
                trace!(%key, from = name, to = %next, "hop");
                Step::AtNode(node)
            }
            None => Step::Aborted(Abort::NoNextHop(name.to_string())),
        }
    }

    fn resolve(&self, key: Identifier, mut route: Vec<String>) -> LookupResponse {
        let responsible = self.owner_of(key).clone();
        if !route.iter().any(|name| *name == responsible.name) {
            route.push(responsible.name.clone());
        }
        LookupResponse {
            key,
            route,
            responsible,
            resolution: Resolution::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finger::{FingerTable, FingerTableEntry};
    use crate::hash::StaticIdHasher;
    use crate::id::Interval;
    use crate::ring::{FingerTableBuilder, RingBuilder};

    fn build(ids: &[(&str, u64)], bits: u32) -> (IdentifierSpace, Topology) {
        let space = IdentifierSpace::new(bits).unwrap();
        let mut topology = Topology::from_names(ids.iter().map(|(n, _)| *n)).unwrap();
        let hasher: StaticIdHasher = ids.iter().map(|(n, id)| (*n, *id)).collect();
        RingBuilder::new(space).build(&mut topology, &hasher).unwrap();
        FingerTableBuilder::new(space).build(&mut topology).unwrap();
        (space, topology)
    }

    fn store(topology: &mut Topology, name: &str, key: u64) {
        topology.get_mut(name).unwrap().store_key(Identifier(key));
    }

    #[test]
    fn test_routes_to_storing_node() {
        let (space, mut topology) = build(&[("n1", 1), ("n3", 3), ("n6", 6)], 3);
        store(&mut topology, "n6", 4);
        let router = Router::new(&topology, space).unwrap();

        let response = router.lookup(Identifier(4), "n1").unwrap();

        assert_eq!(response.route, vec!["n1", "n3", "n6"]);
        assert_eq!(response.responsible, NodeRef::new("n6", Identifier(6)));
        assert_eq!(response.resolution, Resolution::Routed);
        assert_eq!(response.hops(), 2);
    }

    #[test]
    fn test_key_on_start_node_resolves_immediately() {
        let (space, mut topology) = build(&[("n1", 1), ("n3", 3), ("n6", 6)], 3);
        store(&mut topology, "n1", 0);
        let router = Router::new(&topology, space).unwrap();

        let response = router.lookup_from_first(Identifier(0)).unwrap();

        assert_eq!(response.route, vec!["n1"]);
        assert_eq!(response.responsible.name, "n1");
        assert_eq!(response.hops(), 0);
    }

    #[test]
    fn test_unstored_key_falls_back_to_owner() {
        let (space, topology) = build(&[("n1", 1), ("n3", 3), ("n6", 6)], 3);
        let router = Router::new(&topology, space).unwrap();

        let response = router.lookup(Identifier(7), "n1").unwrap();

        // n1 -> n6 via finger [5, 1), then n6 points back at n1.
        assert_eq!(response.route, vec!["n1", "n6"]);
        assert_eq!(response.responsible, NodeRef::new("n1", Identifier(1)));
        assert_eq!(response.resolution, Resolution::Fallback);
    }

    #[test]
    fn test_fallback_appends_unvisited_owner() {
        let (space, topology) = build(&[("n1", 1), ("n3", 3), ("n6", 6)], 3);
        let router = Router::new(&topology, space).unwrap();

        // Key 2 is owned by n3 but stored nowhere: n6 -> n3 -> n1, and n1's
        // finger [2, 3) points back at n3.
        let response = router.lookup(Identifier(2), "n6").unwrap();

        assert_eq!(response.responsible.name, "n3");
        assert_eq!(response.resolution, Resolution::Fallback);
        let unique: HashSet<&String> = response.route.iter().collect();
        assert_eq!(unique.len(), response.route.len());
        assert!(response.route.contains(&"n3".to_string()));
    }

    #[test]
    fn test_dangling_finger_recovers() {
        let (space, mut topology) = build(&[("n1", 1), ("n3", 3), ("n6", 6)], 3);
        store(&mut topology, "n6", 5);
        let broken = FingerTable::new(
            (1..=3)
                .map(|i| {
                    FingerTableEntry::new(
                        i,
                        Interval::new(Identifier(0), Identifier(0)),
                        NodeRef::new("ghost", Identifier(0)),
                    )
                })
                .collect(),
        );
        topology.get_mut("n1").unwrap().set_finger_table(broken);
        let router = Router::new(&topology, space).unwrap();

        let response = router.lookup(Identifier(5), "n1").unwrap();

        assert_eq!(response.route, vec!["n1", "n6"]);
        assert_eq!(response.responsible.name, "n6");
        assert_eq!(response.resolution, Resolution::Fallback);
    }

    #[test]
    fn test_single_node() {
        let (space, topology) = build(&[("solo", 5)], 4);
        let router = Router::new(&topology, space).unwrap();
        for key in [0, 5, 6, 15] {
            let response = router.lookup(Identifier(key), "solo").unwrap();
            assert_eq!(response.route, vec!["solo"]);
            assert_eq!(response.responsible.name, "solo");
        }
    }

    #[test]
    fn test_rejects_unbuilt_topology() {
        let space = IdentifierSpace::new(3).unwrap();
        let empty = Topology::new();
        assert_eq!(
            Router::new(&empty, space).unwrap_err(),
            Error::LookupOnEmptyTopology
        );
        let unbuilt = Topology::from_names(["a", "b"]).unwrap();
        assert_eq!(
            Router::new(&unbuilt, space).unwrap_err(),
            Error::LookupOnEmptyTopology
        );
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let (space, topology) = build(&[("n1", 1)], 3);
        let router = Router::new(&topology, space).unwrap();
        assert_eq!(
            router.lookup(Identifier(8), "n1").unwrap_err(),
            Error::KeyOutOfRange { key: 8, size: 8 }
        );
        assert_eq!(
            router.lookup(Identifier(1), "nope").unwrap_err(),
            Error::UnknownNode("nope".into())
        );
    }

    #[test]
    fn test_display() {
        let (space, mut topology) = build(&[("n1", 1), ("n3", 3), ("n6", 6)], 3);
        store(&mut topology, "n6", 4);
        let router = Router::new(&topology, space).unwrap();
        let response = router.lookup(Identifier(4), "n1").unwrap();
        assert_eq!(response.to_string(), "key 4: n1 -> n3 -> n6 => n6 (6)");
    }
}
