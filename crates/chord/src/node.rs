//! Node abstractions for the Chord ring.
//!
//! A node is named, sits at one identifier, points at its ring successor and
//! owns a finger table plus the set of keys it stores. Other nodes are never
//! referenced by pointer; a [`NodeRef`] carries the name (the topology key)
//! and the identifier of the node it refers to.

use crate::error::{Error, Result};
use crate::finger::FingerTable;
use crate::id::Identifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Reference to a node in the same topology.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct NodeRef {
    pub name: String,
    pub id: Identifier,
}

impl NodeRef {
    pub fn new(name: impl Into<String>, id: Identifier) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Read-only view of a ring participant.
///
/// The lookup router only needs these capabilities, so it is written
/// against this trait rather than the concrete [`Node`].
pub trait RingMember {
    /// Unique name, also the key in the topology.
    fn name(&self) -> &str;
    /// Ring identifier, `None` until the ring is built.
    fn id(&self) -> Option<Identifier>;
    /// Next node clockwise.
    fn successor(&self) -> Option<&NodeRef>;
    fn finger_table(&self) -> &FingerTable;
    /// True if `key` is in this node's stored key set.
    fn stores(&self, key: Identifier) -> bool;
}

/// Logical node participating in the ring.
#[derive(Clone, Debug)]
pub struct Node {
    name: String,
    id: Option<Identifier>,
    successor: Option<NodeRef>,
    finger_table: FingerTable,
    keys: BTreeSet<Identifier>,
}

impl Node {
    /// Construct an unplaced node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            successor: None,
            finger_table: FingerTable::default(),
            keys: BTreeSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> Option<Identifier> {
        self.id
    }

    /// A [`NodeRef`] to this node, once it has an identifier.
    pub fn node_ref(&self) -> Option<NodeRef> {
        self.id.map(|id| NodeRef::new(self.name.clone(), id))
    }

    /// Places the node on the ring.
    ///
    /// Assigning the identifier the node already has is a no-op; assigning a
    /// different one fails with [`Error::IdentifierReassigned`].
    pub fn assign_id(&mut self, id: Identifier) -> Result<()> {
        match self.id {
            Some(old) if old != id => Err(Error::IdentifierReassigned {
                name: self.name.clone(),
                old,
                new: id,
            }),
            _ => {
                self.id = Some(id);
                Ok(())
            }
        }
    }

    pub fn successor(&self) -> Option<&NodeRef> {
        self.successor.as_ref()
    }

    pub fn set_successor(&mut self, successor: NodeRef) {
        self.successor = Some(successor);
    }

    pub fn finger_table(&self) -> &FingerTable {
        &self.finger_table
    }

    /// Replaces the finger table wholesale.
    pub fn set_finger_table(&mut self, table: FingerTable) {
        self.finger_table = table;
    }

    pub fn keys(&self) -> &BTreeSet<Identifier> {
        &self.keys
    }

    /// Adds `key` to the stored set. Returns false if it was already there.
    pub fn store_key(&mut self, key: Identifier) -> bool {
        self.keys.insert(key)
    }

    pub fn clear_keys(&mut self) {
        self.keys.clear();
    }
}

impl RingMember for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> Option<Identifier> {
        self.id
    }

    fn successor(&self) -> Option<&NodeRef> {
        self.successor.as_ref()
    }

    fn finger_table(&self) -> &FingerTable {
        &self.finger_table
    }

    fn stores(&self, key: Identifier) -> bool {
        self.keys.contains(&key)
    }
}
