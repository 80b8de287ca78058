//! Hash functions mapping node and key names onto the identifier ring.
//!
//! The ring only needs a deterministic `name -> [0, 2^m)` mapping. Several
//! interchangeable hashers are provided; [`HasherKind`] selects one from
//! configuration.

pub mod blake3;
pub mod fixed;
pub mod sip;
pub mod traits;
pub mod xxh3;

pub use self::blake3::Blake3IdHasher;
pub use fixed::StaticIdHasher;
pub use sip::SipIdHasher;
pub use traits::IdHasher;
pub use xxh3::Xxh3IdHasher;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selects one of the built-in hashers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasherKind {
    #[default]
    Sip,
    Xxh3,
    Blake3,
}

impl HasherKind {
    /// Instantiates the selected hasher.
    pub fn build(self) -> Box<dyn IdHasher> {
        match self {
            HasherKind::Sip => Box::new(SipIdHasher),
            HasherKind::Xxh3 => Box::new(Xxh3IdHasher),
            HasherKind::Blake3 => Box::new(Blake3IdHasher),
        }
    }
}

impl fmt::Display for HasherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HasherKind::Sip => "sip",
            HasherKind::Xxh3 => "xxh3",
            HasherKind::Blake3 => "blake3",
        };
        f.write_str(s)
    }
}

impl FromStr for HasherKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sip" => Ok(HasherKind::Sip),
            "xxh3" => Ok(HasherKind::Xxh3),
            "blake3" => Ok(HasherKind::Blake3),
            other => Err(crate::Error::Configuration(format!("unknown hasher '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::IdentifierSpace;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in [HasherKind::Sip, HasherKind::Xxh3, HasherKind::Blake3] {
            assert_eq!(kind.to_string().parse::<HasherKind>().unwrap(), kind);
        }
        assert!("md5".parse::<HasherKind>().is_err());
    }

    #[test]
    fn test_built_hashers_stay_in_space() {
        let space = IdentifierSpace::new(5).unwrap();
        for kind in [HasherKind::Sip, HasherKind::Xxh3, HasherKind::Blake3] {
            let hasher = kind.build();
            for name in ["alpha", "beta", "gamma", ""] {
                let id = hasher.identifier(name, &space);
                assert!(space.contains(id), "{} produced {}", hasher.name(), id);
                assert_eq!(id, hasher.identifier(name, &space));
            }
        }
    }
}
