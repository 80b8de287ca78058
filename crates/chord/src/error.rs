//! Error types for the Chord simulation core.

use crate::id::Identifier;
use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a ring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid identifier space or an empty topology handed to a builder.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Two distinct node names hash to the same identifier.
    #[error("Hash collision: nodes '{first}' and '{second}' both map to identifier {id}")]
    HashCollision {
        id: Identifier,
        first: String,
        second: String,
    },

    /// A lookup was issued before the ring and finger tables exist.
    #[error("Lookup on empty topology: build the ring and finger tables first")]
    LookupOnEmptyTopology,

    /// A phase ran before the phase it depends on.
    #[error("Ring not built: {0}")]
    NotBuilt(String),

    /// A node with this name is already part of the topology.
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),

    /// No node with this name exists in the topology.
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// No key with this name has been registered.
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    /// Key identifier does not fit in the identifier space.
    #[error("Key {key} is outside the identifier space [0, {size})")]
    KeyOutOfRange { key: u64, size: u64 },

    /// Identifiers are assigned once; a rebuild produced a different one.
    #[error("Node '{name}' already has identifier {old}, refusing to reassign {new}")]
    IdentifierReassigned {
        name: String,
        old: Identifier,
        new: Identifier,
    },
}
