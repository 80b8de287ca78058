//! Modular identifier space of size 2^m.

use crate::error::{Error, Result};
use crate::id::Identifier;
use serde::Serialize;

/// Largest supported `m`. Keeps `2^m` and every sum of two in-range
/// identifiers inside a `u64`.
pub const MAX_BITS: u32 = 63;

/// The ring `[0, 2^m)` with wrap-around arithmetic.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct IdentifierSpace {
    bits: u32,
}

impl IdentifierSpace {
    /// Creates a space of `2^bits` identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] unless `1 <= bits <= 63`.
    pub fn new(bits: u32) -> Result<Self> {
        if bits == 0 || bits > MAX_BITS {
            return Err(Error::Configuration(format!(
                "identifier bits must be in 1..={MAX_BITS}, got {bits}"
            )));
        }
        Ok(Self { bits })
    }

    /// Number of bits `m`; also the number of finger table entries per node.
    #[inline]
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Ring size `2^m`.
    #[inline]
    pub fn size(&self) -> u64 {
        1u64 << self.bits
    }

    /// Reduces an arbitrary hash value onto the ring.
    #[inline]
    pub fn reduce(&self, raw: u64) -> Identifier {
        Identifier(raw & (self.size() - 1))
    }

    /// True if `id` lies in `[0, 2^m)`.
    #[inline]
    pub fn contains(&self, id: Identifier) -> bool {
        id.0 < self.size()
    }

    /// Checks that `id` lies in the space.
    pub fn check(&self, id: Identifier) -> Result<Identifier> {
        if self.contains(id) {
            Ok(id)
        } else {
            Err(Error::KeyOutOfRange {
                key: id.0,
                size: self.size(),
            })
        }
    }

    /// `(id + offset) mod 2^m`.
    #[inline]
    pub fn add(&self, id: Identifier, offset: u64) -> Identifier {
        // Both operands are reduced first so the sum stays below 2^64.
        self.reduce(self.reduce(id.0).0 + self.reduce(offset).0)
    }

    /// Clockwise distance from `from` to `to`.
    #[inline]
    pub fn distance(&self, from: Identifier, to: Identifier) -> u64 {
        to.0.wrapping_sub(from.0) & (self.size() - 1)
    }

    /// Start of finger `i` (1-based): `(id + 2^(i-1)) mod 2^m`.
    #[inline]
    pub fn finger_start(&self, id: Identifier, i: u32) -> Identifier {
        debug_assert!((1..=self.bits).contains(&i));
        self.add(id, 1u64 << (i - 1))
    }

    /// End of finger `i` (1-based): `(id + 2^i) mod 2^m`, the start of finger `i + 1`.
    #[inline]
    pub fn finger_end(&self, id: Identifier, i: u32) -> Identifier {
        debug_assert!((1..=self.bits).contains(&i));
        self.add(id, 1u64 << i)
    }
}
