//! Raw signature bytes.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::prelude::*;

/// A signature as carried in a commit.
///
/// The container is scheme-agnostic; it only guarantees the bytes are
/// non-empty and within [`Signature::MAX_LENGTH`].
#[derive(Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Maximum signature length in bytes. BLS12-381 signatures are the
    /// widest supported scheme at 96 bytes.
    pub const MAX_LENGTH: usize = 96;

    /// Construct a signature from raw bytes.
    ///
    /// Returns `Ok(None)` for an empty buffer, which is how an absent
    /// signature is represented on the wire.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Option<Self>, Error> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Ok(None);
        }
        if bytes.len() > Self::MAX_LENGTH {
            return Err(Error::signature_too_long(bytes.len()));
        }
        Ok(Some(Self(bytes)))
    }

    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the signature, returning the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<Vec<u8>> for Signature {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::new(bytes)?.ok_or_else(Error::empty_signature)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(&self.0))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bytes_are_no_signature() {
        assert_eq!(Signature::new(Vec::new()).unwrap(), None);
        assert!(Signature::try_from(Vec::new()).is_err());
    }

    #[test]
    fn oversized_signature_is_rejected() {
        assert!(Signature::new(vec![0u8; Signature::MAX_LENGTH + 1]).is_err());
    }

    #[test]
    fn keeps_bytes_intact() {
        let sig = Signature::try_from(vec![7u8; 64]).unwrap();
        assert_eq!(sig.as_bytes(), &[7u8; 64][..]);
    }
}
