//! Identifier space abstractions for the Chord ring.
//!
//! Identifiers are positions on a modular ring of size 2^m. All ring
//! arithmetic (offsets, clockwise distance, wrapped intervals) lives here.

pub mod identifier;
pub mod interval;
pub mod space;

pub use identifier::Identifier;
pub use interval::Interval;
pub use space::IdentifierSpace;
