//! XXH3 hasher.

use crate::hash::traits::IdHasher;
use xxhash_rust::xxh3::xxh3_64;

/// 64-bit XXH3.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3IdHasher;

impl IdHasher for Xxh3IdHasher {
    fn hash_bytes(&self, data: &[u8]) -> u64 {
        xxh3_64(data)
    }

    fn name(&self) -> &'static str {
        "XXH3"
    }
}
