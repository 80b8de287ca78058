//! Simulation configuration.

use crate::error::Result;
use crate::hash::HasherKind;
use crate::id::IdentifierSpace;
use crate::ring::CollisionPolicy;
use serde::{Deserialize, Serialize};

/// Default `m`: a ring of 1024 identifiers.
pub const DEFAULT_BITS: u32 = 10;

/// Parameters shared by every phase of a simulation.
///
/// All fields have defaults, so an empty JSON object is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChordConfig {
    /// `m`: identifiers are `m`-bit and every finger table has `m` entries.
    pub bits: u32,
    pub hasher: HasherKind,
    pub collision_policy: CollisionPolicy,
}

impl Default for ChordConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS,
            hasher: HasherKind::default(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl ChordConfig {
    pub fn new(bits: u32) -> Self {
        Self {
            bits,
            ..Self::default()
        }
    }

    pub fn with_hasher(mut self, hasher: HasherKind) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// The identifier space described by `bits`.
    pub fn space(&self) -> Result<IdentifierSpace> {
        IdentifierSpace::new(self.bits)
    }

    pub fn validate(&self) -> Result<()> {
        self.space().map(|_| ())
    }
}
