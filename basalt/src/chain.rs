//! Chain identifiers.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::prelude::*;

/// Maximum length of a chain id in bytes.
pub const MAX_LENGTH: usize = 50;

/// Chain identifier, e.g. `basalt-mainnet-1`.
///
/// The identifier is part of every vote's sign-bytes, which is what keeps
/// signatures from one chain from being replayed on another.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Id(String);

impl Id {
    /// The chain id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Id {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(Error::empty_chain_id());
        }
        if value.len() > MAX_LENGTH {
            return Err(Error::chain_id_too_long(value.len()));
        }
        Ok(Self(value))
    }
}

impl FromStr for Id {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.to_string().try_into()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chain::Id({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_ids() {
        let id: Id = "basalt-testnet-7".parse().unwrap();
        assert_eq!(id.as_str(), "basalt-testnet-7");
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert!("".parse::<Id>().is_err());
        let long = "x".repeat(MAX_LENGTH + 1);
        assert!(long.parse::<Id>().is_err());
    }
}
