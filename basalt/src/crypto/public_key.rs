//! Validator public keys.

use ed25519_dalek::Verifier as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::account;
use crate::prelude::*;

/// Domain separation tag for BLS signatures over BLS12-381 G2.
const BLS_DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

/// Signature scheme identifiers.
///
/// Batch eligibility requires every key in a validator set to share one
/// scheme; this is the identity that check compares.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Ed25519 over Curve25519.
    Ed25519,
    /// BLS12-381, min-pk variant.
    Bls12381,
}

/// A validator public key.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum PublicKey {
    /// Ed25519 verification key bytes.
    Ed25519([u8; 32]),
    /// BLS12-381 public key bytes (48-byte compressed or 96-byte serialized).
    Bls12381(Vec<u8>),
}

impl PublicKey {
    /// The signature scheme this key belongs to.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Ed25519(_) => Algorithm::Ed25519,
            Self::Bls12381(_) => Algorithm::Bls12381,
        }
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Ed25519(bytes) => bytes,
            Self::Bls12381(bytes) => bytes,
        }
    }

    /// The account address derived from this key: the first 20 bytes of the
    /// SHA-256 digest of the raw key bytes.
    pub fn address(&self) -> account::Id {
        let digest = Sha256::digest(self.as_bytes());
        let mut address = [0u8; account::LENGTH];
        address.copy_from_slice(&digest[..account::LENGTH]);
        account::Id::new(address)
    }

    /// Verify `signature` over `msg`.
    ///
    /// Malformed keys or signatures verify as `false` rather than erroring;
    /// a signature the key cannot even parse is just as invalid as one that
    /// fails the curve equation.
    pub fn verify_signature(&self, msg: &[u8], signature: &[u8]) -> bool {
        match self {
            Self::Ed25519(bytes) => {
                let Ok(key) = ed25519_dalek::VerifyingKey::from_bytes(bytes) else {
                    return false;
                };
                let Ok(signature) = ed25519_dalek::Signature::from_slice(signature) else {
                    return false;
                };
                key.verify(msg, &signature).is_ok()
            },
            Self::Bls12381(bytes) => {
                let Ok(key) = blst::min_pk::PublicKey::from_bytes(bytes) else {
                    return false;
                };
                let Ok(signature) = blst::min_pk::Signature::from_bytes(signature) else {
                    return false;
                };
                signature.verify(false, msg, BLS_DST, &[], &key, false)
                    == blst::BLST_ERROR::BLST_SUCCESS
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, SigningKey};

    use super::*;

    fn ed25519_key(seed: u8) -> (SigningKey, PublicKey) {
        let signing_key = SigningKey::from_bytes(&[seed; 32]);
        let pub_key = PublicKey::Ed25519(signing_key.verifying_key().to_bytes());
        (signing_key, pub_key)
    }

    #[test]
    fn ed25519_verifies_own_signature() {
        let (signing_key, pub_key) = ed25519_key(42);
        let msg = b"precommit for block at height 7";
        let signature = signing_key.sign(msg);
        assert!(pub_key.verify_signature(msg, &signature.to_bytes()));
    }

    #[test]
    fn ed25519_rejects_tampered_message() {
        let (signing_key, pub_key) = ed25519_key(42);
        let signature = signing_key.sign(b"original");
        assert!(!pub_key.verify_signature(b"tampered", &signature.to_bytes()));
    }

    #[test]
    fn ed25519_rejects_garbage_signature() {
        let (_, pub_key) = ed25519_key(1);
        assert!(!pub_key.verify_signature(b"msg", &[0u8; 3]));
        assert!(!pub_key.verify_signature(b"msg", &[0u8; 64]));
    }

    #[test]
    fn bls_verifies_own_signature() {
        let secret = blst::min_pk::SecretKey::key_gen(&[9u8; 32], &[]).unwrap();
        let pub_key = PublicKey::Bls12381(secret.sk_to_pk().to_bytes().to_vec());
        let msg = b"precommit for block at height 7";
        let signature = secret.sign(msg, BLS_DST, &[]);
        assert!(pub_key.verify_signature(msg, &signature.to_bytes()));
        assert!(!pub_key.verify_signature(b"other", &signature.to_bytes()));
    }

    #[test]
    fn address_is_twenty_byte_key_digest() {
        let (_, pub_key) = ed25519_key(7);
        let digest = Sha256::digest(pub_key.as_bytes());
        assert_eq!(pub_key.address().as_bytes(), &digest[..account::LENGTH]);
    }

    #[test]
    fn algorithms_differ_across_schemes() {
        let (_, ed) = ed25519_key(3);
        let bls = PublicKey::Bls12381(vec![0u8; 48]);
        assert_eq!(ed.algorithm(), Algorithm::Ed25519);
        assert_eq!(bls.algorithm(), Algorithm::Bls12381);
    }
}
