//! Batch signature verification.
//!
//! A batch verifier checks many signatures faster than verifying each one,
//! provided every signature in the batch is valid. On failure, per-entry
//! validity is recovered so a caller can point at the exact offender.

use ed25519_dalek::Verifier as _;

use crate::crypto::PublicKey;
use crate::error::Error;
use crate::prelude::*;

/// Accumulates `(key, message, signature)` triples and verifies them
/// together.
pub trait BatchVerifier {
    /// Queue a signature for verification.
    ///
    /// Fails only when the key's scheme does not match the batch; the gate
    /// in front of batch verification makes that unreachable in practice.
    fn add(&mut self, pub_key: &PublicKey, msg: Vec<u8>, signature: &[u8]) -> Result<(), Error>;

    /// Verify everything queued, consuming the verifier.
    ///
    /// Returns overall validity plus a per-entry validity flag in insertion
    /// order. The per-entry flags are meaningful whether or not the batch as
    /// a whole passed.
    fn verify(self: Box<Self>) -> (bool, Vec<bool>);
}

/// Whether the scheme of `pub_key` supports batch verification.
pub fn supports_batch_verifier(pub_key: Option<&PublicKey>) -> bool {
    matches!(pub_key, Some(PublicKey::Ed25519(_)))
}

/// Create a batch verifier for the scheme of `pub_key`, if the scheme
/// supports one.
pub fn create_batch_verifier(pub_key: &PublicKey) -> Option<Box<dyn BatchVerifier>> {
    match pub_key {
        PublicKey::Ed25519(_) => Some(Box::<Ed25519BatchVerifier>::default()),
        PublicKey::Bls12381(_) => None,
    }
}

/// Batch verifier for ed25519 signatures.
///
/// Entries are stored raw and parsed during `verify`, so a malformed key or
/// signature surfaces through its per-entry validity flag instead of failing
/// the whole batch eagerly.
#[derive(Default)]
pub struct Ed25519BatchVerifier {
    entries: Vec<Entry>,
}

struct Entry {
    pub_key: [u8; 32],
    msg: Vec<u8>,
    signature: Vec<u8>,
}

impl Entry {
    fn parse(&self) -> Option<(ed25519_dalek::VerifyingKey, ed25519_dalek::Signature)> {
        let key = ed25519_dalek::VerifyingKey::from_bytes(&self.pub_key).ok()?;
        let signature = ed25519_dalek::Signature::from_slice(&self.signature).ok()?;
        Some((key, signature))
    }
}

impl BatchVerifier for Ed25519BatchVerifier {
    fn add(&mut self, pub_key: &PublicKey, msg: Vec<u8>, signature: &[u8]) -> Result<(), Error> {
        let PublicKey::Ed25519(key) = pub_key else {
            return Err(Error::incompatible_batch_key(pub_key.algorithm()));
        };
        self.entries.push(Entry {
            pub_key: *key,
            msg,
            signature: signature.to_vec(),
        });
        Ok(())
    }

    fn verify(self: Box<Self>) -> (bool, Vec<bool>) {
        let parsed: Vec<_> = self.entries.iter().map(Entry::parse).collect();

        // Whole-batch fast path, valid only when every entry parses.
        if parsed.iter().all(Option::is_some) {
            let msgs: Vec<&[u8]> = self.entries.iter().map(|e| e.msg.as_slice()).collect();
            let keys: Vec<_> = parsed.iter().map(|p| p.as_ref().unwrap().0).collect();
            let signatures: Vec<_> = parsed.iter().map(|p| p.as_ref().unwrap().1).collect();
            if ed25519_dalek::verify_batch(&msgs, &signatures, &keys).is_ok() {
                return (true, vec![true; self.entries.len()]);
            }
        }

        // Recover per-entry validity one signature at a time.
        let valid: Vec<bool> = self
            .entries
            .iter()
            .zip(&parsed)
            .map(|(entry, parsed)| match parsed {
                Some((key, signature)) => key.verify(&entry.msg, signature).is_ok(),
                None => false,
            })
            .collect();
        let all_valid = valid.iter().all(|&v| v);
        (all_valid, valid)
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, SigningKey};

    use super::*;

    fn signed_entry(seed: u8, msg: &[u8]) -> (PublicKey, Vec<u8>, Vec<u8>) {
        let signing_key = SigningKey::from_bytes(&[seed; 32]);
        let pub_key = PublicKey::Ed25519(signing_key.verifying_key().to_bytes());
        let signature = signing_key.sign(msg).to_bytes().to_vec();
        (pub_key, msg.to_vec(), signature)
    }

    #[test]
    fn all_valid_batch_passes() {
        let mut verifier = Box::<Ed25519BatchVerifier>::default();
        for seed in 1..=4 {
            let (key, msg, sig) = signed_entry(seed, b"vote payload");
            verifier.add(&key, msg, &sig).unwrap();
        }
        let (ok, valid) = verifier.verify();
        assert!(ok);
        assert_eq!(valid, vec![true; 4]);
    }

    #[test]
    fn corrupted_entry_is_flagged() {
        let mut verifier = Box::<Ed25519BatchVerifier>::default();
        for seed in 1..=3 {
            let (key, msg, mut sig) = signed_entry(seed, b"vote payload");
            if seed == 2 {
                sig[0] ^= 0xFF;
            }
            verifier.add(&key, msg, &sig).unwrap();
        }
        let (ok, valid) = verifier.verify();
        assert!(!ok);
        assert_eq!(valid, vec![true, false, true]);
    }

    #[test]
    fn unparseable_signature_is_flagged_not_fatal() {
        let mut verifier = Box::<Ed25519BatchVerifier>::default();
        let (key, msg, sig) = signed_entry(1, b"vote payload");
        verifier.add(&key, msg, &sig).unwrap();
        let (key, msg, _) = signed_entry(2, b"vote payload");
        verifier.add(&key, msg, &[0u8; 5]).unwrap();
        let (ok, valid) = verifier.verify();
        assert!(!ok);
        assert_eq!(valid, vec![true, false]);
    }

    #[test]
    fn bls_key_cannot_join_an_ed25519_batch() {
        let mut verifier = Box::<Ed25519BatchVerifier>::default();
        let bls = PublicKey::Bls12381(vec![0u8; 48]);
        assert!(verifier.add(&bls, b"msg".to_vec(), &[0u8; 96]).is_err());
    }

    #[test]
    fn gate_matches_scheme_capability() {
        let ed = PublicKey::Ed25519([0u8; 32]);
        let bls = PublicKey::Bls12381(vec![0u8; 48]);
        assert!(supports_batch_verifier(Some(&ed)));
        assert!(!supports_batch_verifier(Some(&bls)));
        assert!(!supports_batch_verifier(None));
        assert!(create_batch_verifier(&ed).is_some());
        assert!(create_batch_verifier(&bls).is_none());
    }
}
