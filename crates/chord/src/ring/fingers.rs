//! Finger table builder.
//!
//! For a node at `n` and each `i` in `1..=m`:
//!
//! ```text
//! start     = (n + 2^(i-1)) mod 2^m
//! end       = (n + 2^i)     mod 2^m
//! successor = first node with id >= start, wrapping to the smallest id
//! ```
//!
//! The ring order is computed once per build and shared by all `n * m`
//! successor searches, each a binary search: `O(n log n + n m log n)`.

use crate::error::{Error, Result};
use crate::finger::{FingerTable, FingerTableEntry};
use crate::id::{Identifier, IdentifierSpace, Interval};
use crate::ring::order::RingOrder;
use crate::topology::Topology;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug)]
pub struct FingerTableBuilder {
    space: IdentifierSpace,
}

impl FingerTableBuilder {
    pub fn new(space: IdentifierSpace) -> Self {
        Self { space }
    }

    /// Rebuilds every node's finger table from scratch.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] for an empty topology
    /// - [`Error::NotBuilt`] if some node has not been placed on the ring
    pub fn build(&self, topology: &mut Topology) -> Result<RingOrder> {
        let order = RingOrder::from_topology(topology)?;

        for node in topology.iter_mut() {
            let id = node
                .id()
                .ok_or_else(|| Error::NotBuilt(format!("node '{}' has no identifier", node.name())))?;
            let table = self.table_for(id, &order);
            node.set_finger_table(table);
        }

        debug!(
            nodes = order.len(),
            entries_per_node = self.space.bits(),
            "finger tables built"
        );
        Ok(order)
    }

    /// Finger table of a node at `id` against a fixed ring order.
    pub fn table_for(&self, id: Identifier, order: &RingOrder) -> FingerTable {
        let entries = (1..=self.space.bits())
            .map(|i| {
                let start = self.space.finger_start(id, i);
                let end = self.space.finger_end(id, i);
                let successor = order.successor_of(start).clone();
                trace!(%id, finger = i, %start, %end, successor = %successor, "finger");
                FingerTableEntry::new(i, Interval::new(start, end), successor)
            })
            .collect();
        FingerTable::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::StaticIdHasher;
    use crate::ring::RingBuilder;

    fn three_node_ring() -> (IdentifierSpace, Topology) {
        let space = IdentifierSpace::new(3).unwrap();
        let mut topology = Topology::from_names(["n1", "n3", "n6"]).unwrap();
        let hasher = StaticIdHasher::new()
            .assign("n1", 1)
            .assign("n3", 3)
            .assign("n6", 6);
        RingBuilder::new(space).build(&mut topology, &hasher).unwrap();
        (space, topology)
    }

    fn rows(topology: &Topology, name: &str) -> Vec<(u64, u64, u64)> {
        topology
            .get(name)
            .unwrap()
            .finger_table()
            .iter()
            .map(|e| (e.start().0, e.end().0, e.successor.id.0))
            .collect()
    }

    #[test]
    fn test_three_node_tables() {
        let (space, mut topology) = three_node_ring();
        FingerTableBuilder::new(space).build(&mut topology).unwrap();

        assert_eq!(rows(&topology, "n1"), vec![(2, 3, 3), (3, 5, 3), (5, 1, 6)]);
        assert_eq!(rows(&topology, "n3"), vec![(4, 5, 6), (5, 7, 6), (7, 3, 1)]);
        assert_eq!(rows(&topology, "n6"), vec![(7, 0, 1), (0, 2, 1), (2, 6, 3)]);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let (space, mut topology) = three_node_ring();
        let builder = FingerTableBuilder::new(space);
        builder.build(&mut topology).unwrap();
        let first: Vec<FingerTable> = topology.iter().map(|n| n.finger_table().clone()).collect();
        builder.build(&mut topology).unwrap();
        let second: Vec<FingerTable> = topology.iter().map(|n| n.finger_table().clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_requires_identifiers() {
        let space = IdentifierSpace::new(3).unwrap();
        let mut topology = Topology::from_names(["a"]).unwrap();
        let err = FingerTableBuilder::new(space).build(&mut topology).unwrap_err();
        assert!(matches!(err, Error::NotBuilt(_)));
        assert!(topology.get("a").unwrap().finger_table().is_empty());
    }

    #[test]
    fn test_empty_topology_rejected() {
        let space = IdentifierSpace::new(3).unwrap();
        let err = FingerTableBuilder::new(space)
            .build(&mut Topology::new())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
