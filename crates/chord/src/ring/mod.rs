//! Chord ring construction and routing.
//!
//! The three phases run strictly in order on a shared [`Topology`](crate::Topology):
//!
//! 1. [`RingBuilder`] places every node and links it to its ring successor.
//! 2. [`FingerTableBuilder`] fills each node's `m`-entry finger table.
//! 3. [`Router`] resolves keys by hopping across fingers.

pub mod fingers;
pub mod lookup;
pub mod order;
pub mod overlay;

pub use fingers::FingerTableBuilder;
pub use lookup::{LookupResponse, Resolution, Router};
pub use order::RingOrder;
pub use overlay::{CollisionPolicy, RingBuilder};
