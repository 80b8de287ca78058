//! Hasher with explicitly assigned identifiers.
//!
//! Lets scenarios pin nodes to known positions (e.g. a ring of `{1, 3, 6}`)
//! while any name without an assignment is hashed by a fallback hasher
//! (SipHash unless another is supplied).

use crate::hash::sip::SipIdHasher;
use crate::hash::traits::IdHasher;
use crate::id::{Identifier, IdentifierSpace};
use std::collections::HashMap;
use std::fmt;

/// Name → identifier table with a fallback hasher for everything else.
///
/// Assigned identifiers are returned verbatim, without reduction, so an
/// assignment outside the ring is caught by the ring builder instead of
/// being silently wrapped.
pub struct StaticIdHasher {
    assignments: HashMap<String, Identifier>,
    fallback: Box<dyn IdHasher>,
}

impl Default for StaticIdHasher {
    fn default() -> Self {
        Self::with_fallback(Box::new(SipIdHasher))
    }
}

impl fmt::Debug for StaticIdHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticIdHasher")
            .field("assignments", &self.assignments)
            .field("fallback", &self.fallback.name())
            .finish()
    }
}

impl StaticIdHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table whose unassigned names are hashed by `fallback`.
    pub fn with_fallback(fallback: Box<dyn IdHasher>) -> Self {
        Self {
            assignments: HashMap::new(),
            fallback,
        }
    }

    /// Pins `name` to `id`.
    pub fn assign(mut self, name: impl Into<String>, id: u64) -> Self {
        self.insert(name, id);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, id: u64) {
        self.assignments.insert(name.into(), Identifier(id));
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, u64)> for StaticIdHasher {
    fn from_iter<I: IntoIterator<Item = (N, u64)>>(iter: I) -> Self {
        let mut hasher = Self::new();
        for (name, id) in iter {
            hasher.insert(name, id);
        }
        hasher
    }
}

impl IdHasher for StaticIdHasher {
    fn hash_bytes(&self, data: &[u8]) -> u64 {
        self.fallback.hash_bytes(data)
    }

    fn name(&self) -> &'static str {
        "Static"
    }

    fn identifier(&self, name: &str, space: &IdentifierSpace) -> Identifier {
        match self.assignments.get(name) {
            Some(id) => *id,
            None => self.fallback.identifier(name, space),
        }
    }
}
