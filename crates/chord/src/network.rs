//! The simulated Chord network.
//!
//! [`ChordNetwork`] owns everything one simulation needs (configuration,
//! hasher, topology and the named keys) and drives the ring phases in
//! order. It is the entry point the CLI harness uses.

use crate::config::ChordConfig;
use crate::error::{Error, Result};
use crate::hash::IdHasher;
use crate::id::{Identifier, IdentifierSpace};
use crate::node::Node;
use crate::ring::{FingerTableBuilder, LookupResponse, RingBuilder, RingOrder, Router};
use crate::topology::Topology;
use std::collections::BTreeMap;
use tracing::debug;

pub struct ChordNetwork {
    config: ChordConfig,
    space: IdentifierSpace,
    hasher: Box<dyn IdHasher>,
    topology: Topology,
    keys: BTreeMap<String, Identifier>,
}

impl ChordNetwork {
    /// Network using the hasher selected by `config`.
    pub fn new(config: ChordConfig) -> Result<Self> {
        let hasher = config.hasher.build();
        Self::with_hasher(config, hasher)
    }

    /// Network using a caller-supplied hasher; `config.hasher` is ignored.
    pub fn with_hasher(config: ChordConfig, hasher: Box<dyn IdHasher>) -> Result<Self> {
        let space = config.space()?;
        Ok(Self {
            config,
            space,
            hasher,
            topology: Topology::new(),
            keys: BTreeMap::new(),
        })
    }

    pub fn config(&self) -> &ChordConfig {
        &self.config
    }

    pub fn space(&self) -> IdentifierSpace {
        self.space
    }

    pub fn hasher_name(&self) -> &'static str {
        self.hasher.name()
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Adds an unplaced node. Call [`build`](Self::build) again afterwards.
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<()> {
        self.topology.insert(Node::new(name))
    }

    /// Identifier `name` hashes to, without registering it.
    pub fn identifier_of(&self, name: &str) -> Result<Identifier> {
        self.space.check(self.hasher.identifier(name, &self.space))
    }

    /// Registers a named key and returns its identifier.
    pub fn add_key(&mut self, name: impl Into<String>) -> Result<Identifier> {
        let name = name.into();
        let id = self.identifier_of(&name)?;
        self.keys.insert(name, id);
        Ok(id)
    }

    /// Named keys, sorted by name.
    pub fn keys(&self) -> &BTreeMap<String, Identifier> {
        &self.keys
    }

    pub fn key_id(&self, name: &str) -> Option<Identifier> {
        self.keys.get(name).copied()
    }

    /// Places nodes on the ring and links successors.
    pub fn build_overlay(&mut self) -> Result<RingOrder> {
        RingBuilder::new(self.space)
            .with_collision_policy(self.config.collision_policy)
            .build(&mut self.topology, self.hasher.as_ref())
    }

    /// Rebuilds every finger table. Requires [`build_overlay`](Self::build_overlay).
    pub fn build_finger_tables(&mut self) -> Result<RingOrder> {
        FingerTableBuilder::new(self.space).build(&mut self.topology)
    }

    /// Runs both build phases in order.
    pub fn build(&mut self) -> Result<RingOrder> {
        self.build_overlay()?;
        self.build_finger_tables()
    }

    /// Stores every registered key on its responsible node, replacing any
    /// keys previously stored. Returns the number of keys placed.
    pub fn assign_keys(&mut self) -> Result<usize> {
        let order = RingOrder::from_topology(&self.topology)?;
        for node in self.topology.iter_mut() {
            node.clear_keys();
        }
        for (name, &id) in &self.keys {
            let owner = order.successor_of(id);
            let node = self
                .topology
                .get_mut(&owner.name)
                .ok_or_else(|| Error::UnknownNode(owner.name.clone()))?;
            node.store_key(id);
            debug!(key = %name, %id, owner = %owner, "key placed");
        }
        Ok(self.keys.len())
    }

    /// Stores `key` on a specific node, bypassing the ownership rule.
    pub fn store_key_at(&mut self, node: &str, key: Identifier) -> Result<()> {
        let key = self.space.check(key)?;
        let node = self
            .topology
            .get_mut(node)
            .ok_or_else(|| Error::UnknownNode(node.to_string()))?;
        node.store_key(key);
        Ok(())
    }

    pub fn router(&self) -> Result<Router<'_>> {
        Router::new(&self.topology, self.space)
    }

    /// Looks up a key identifier from `start`, or from the first node added.
    pub fn lookup(&self, key: Identifier, start: Option<&str>) -> Result<LookupResponse> {
        let router = self.router()?;
        match start {
            Some(start) => router.lookup(key, start),
            None => router.lookup_from_first(key),
        }
    }

    /// Looks up a registered key by name.
    pub fn lookup_key(&self, name: &str, start: Option<&str>) -> Result<LookupResponse> {
        let id = self
            .key_id(name)
            .ok_or_else(|| Error::UnknownKey(name.to_string()))?;
        self.lookup(id, start)
    }
}

impl std::fmt::Debug for ChordNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChordNetwork")
            .field("config", &self.config)
            .field("hasher", &self.hasher.name())
            .field("nodes", &self.topology.len())
            .field("keys", &self.keys.len())
            .finish()
    }
}
