//! Core hasher trait definitions.

use crate::id::{Identifier, IdentifierSpace};

/// Maps names onto the identifier ring.
///
/// Implementations must be deterministic: the ring builder relies on the same
/// name always landing on the same identifier. Uniqueness is not required;
/// collisions are handled by the ring builder's collision policy.
pub trait IdHasher: Send + Sync {
    /// Hashes raw bytes to a 64-bit value.
    fn hash_bytes(&self, data: &[u8]) -> u64;

    /// Returns the name of this hasher.
    fn name(&self) -> &'static str;

    /// Identifier of `name` in `space`.
    fn identifier(&self, name: &str, space: &IdentifierSpace) -> Identifier {
        space.reduce(self.hash_bytes(name.as_bytes()))
    }
}
