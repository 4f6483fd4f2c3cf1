//! Validator account addresses.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::prelude::*;

/// Length of an account id in bytes.
pub const LENGTH: usize = 20;

/// A validator account address: the first 20 bytes of the SHA-256 digest of
/// the validator's public key.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Id([u8; LENGTH]);

impl Id {
    /// Construct an account id from raw bytes.
    pub const fn new(bytes: [u8; LENGTH]) -> Self {
        Self(bytes)
    }

    /// The raw address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for Id {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Id {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        let bytes: [u8; LENGTH] = bytes
            .try_into()
            .map_err(|rejected: Vec<u8>| Error::invalid_account_id_length(rejected.len()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(self.0))
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "account::Id({self})")
    }
}

impl FromStr for Id {
    type Err = Error;

    /// Parse an address from its uppercase or lowercase hex form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| Error::invalid_hex_encoding())?;
        bytes.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_uppercase_hex() {
        let id = Id::new([0xAB; LENGTH]);
        assert_eq!(
            id.to_string(),
            "ABABABABABABABABABABABABABABABABABABABAB"
        );
    }

    #[test]
    fn parse_round_trip() {
        let id = Id::new([0x0E, 0xB6, 0, 0xA5, 0xEB, 0x0D, 0xCC, 0xD4, 5, 0xB3, 0xC7, 0x19, 0x53, 0xC7, 0x27, 0x97, 0x5E, 0x39, 0xED, 0xE4]);
        let parsed: Id = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(Id::try_from(vec![1u8; 19]).is_err());
        assert!("AB".parse::<Id>().is_err());
    }
}
