//! Ring identifier newtype.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the identifier ring.
///
/// Plain newtype over `u64`; the owning [`IdentifierSpace`](super::IdentifierSpace)
/// decides which values are in range.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(pub u64);

impl From<u64> for Identifier {
    fn from(value: u64) -> Self {
        Identifier(value)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
