//! BLAKE3 hasher, truncated to the first eight bytes of the digest.

use crate::hash::traits::IdHasher;

#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3IdHasher;

impl IdHasher for Blake3IdHasher {
    fn hash_bytes(&self, data: &[u8]) -> u64 {
        let digest = ::blake3::hash(data);
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest.as_bytes()[..8]);
        u64::from_le_bytes(prefix)
    }

    fn name(&self) -> &'static str {
        "BLAKE3"
    }
}
