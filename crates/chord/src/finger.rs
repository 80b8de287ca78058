//! Finger tables: the per-node routing tables of the Chord protocol.
//!
//! Entry `i` (1-based) covers the interval `[n + 2^(i-1), n + 2^i)` (mod 2^m)
//! and points at the first node at or after the interval start. Laid side by
//! side, a node's entries cover every identifier except the node's own.

use crate::id::{Identifier, Interval};
use crate::node::NodeRef;
use serde::Serialize;
use std::fmt;

/// One row of a finger table.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct FingerTableEntry {
    /// 1-based finger index.
    pub index: u32,
    pub interval: Interval,
    /// First node whose identifier is at or after `interval.start`.
    pub successor: NodeRef,
}

impl FingerTableEntry {
    pub fn new(index: u32, interval: Interval, successor: NodeRef) -> Self {
        Self {
            index,
            interval,
            successor,
        }
    }

    #[inline]
    pub fn start(&self) -> Identifier {
        self.interval.start
    }

    #[inline]
    pub fn end(&self) -> Identifier {
        self.interval.end
    }
}

impl fmt::Display for FingerTableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Start: {}, Interval: ({}, {}), Successor: {}]",
            self.start(),
            self.start(),
            self.end(),
            self.successor.name
        )
    }
}

/// Ordered finger entries `1..=m`.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct FingerTable {
    entries: Vec<FingerTableEntry>,
}

impl FingerTable {
    pub fn new(entries: Vec<FingerTableEntry>) -> Self {
        debug_assert!(entries
            .iter()
            .enumerate()
            .all(|(pos, e)| e.index as usize == pos + 1));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry `i`, 1-based.
    pub fn get(&self, i: u32) -> Option<&FingerTableEntry> {
        let pos = (i as usize).checked_sub(1)?;
        self.entries.get(pos)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FingerTableEntry> {
        self.entries.iter()
    }

    /// Highest-index entry whose interval contains `key`.
    ///
    /// Scanning from the far end first picks the hop that skips the most
    /// ring distance.
    pub fn farthest_containing(&self, key: Identifier) -> Option<&FingerTableEntry> {
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.interval.contains(key))
    }
}

impl<'a> IntoIterator for &'a FingerTable {
    type Item = &'a FingerTableEntry;
    type IntoIter = std::slice::Iter<'a, FingerTableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
