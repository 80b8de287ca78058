//! Chord distributed hash table simulation.
//!
//! This crate models Chord's steady-state routing on a static topology:
//! - Identifier space arithmetic on a ring of size 2^m
//! - Name hashing onto the ring
//! - Ring construction (successor overlay)
//! - Finger table construction
//! - Finger-guided lookups with an authoritative fallback
//!
//! ```
//! use chord_core::{ChordConfig, ChordNetwork};
//!
//! let mut network = ChordNetwork::new(ChordConfig::new(32))?;
//! for name in ["alpha", "beta", "gamma"] {
//!     network.add_node(name)?;
//! }
//! let key = network.add_key("some-file.txt")?;
//! network.build()?;
//! network.assign_keys()?;
//!
//! let response = network.lookup(key, None)?;
//! assert_eq!(response.route[0], "alpha");
//! # Ok::<(), chord_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod finger;
pub mod hash;
pub mod id;
pub mod network;
pub mod node;
pub mod ring;
pub mod topology;

pub use config::ChordConfig;
pub use error::{Error, Result};
pub use finger::{FingerTable, FingerTableEntry};
pub use hash::{HasherKind, IdHasher};
pub use id::{Identifier, IdentifierSpace, Interval};
pub use network::ChordNetwork;
pub use node::{Node, NodeRef, RingMember};
pub use ring::{
    CollisionPolicy, FingerTableBuilder, LookupResponse, Resolution, RingBuilder, RingOrder,
    Router,
};
pub use topology::Topology;
