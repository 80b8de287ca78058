//! SipHash-1-3 hasher.

use crate::hash::traits::IdHasher;
use siphasher::sip::SipHasher13;
use std::hash::{Hash, Hasher};

/// SipHash-1-3 with zero keys. The default hasher.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipIdHasher;

impl IdHasher for SipIdHasher {
    fn hash_bytes(&self, data: &[u8]) -> u64 {
        let mut hasher = SipHasher13::new();
        data.hash(&mut hasher);
        hasher.finish()
    }

    fn name(&self) -> &'static str {
        "SipHash13"
    }
}
