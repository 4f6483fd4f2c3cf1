//! Verified-signature caching.
//!
//! Commits travel more than once through a node: the same signatures show
//! up during block sync, light client bisection and re-verification after a
//! restart. The cache lets the engine skip the signature primitive when an
//! identical `(signature, validator address, sign-bytes)` triple has already
//! been verified.

use basalt::account;

use crate::prelude::*;

/// Value stored against a raw signature: the address of the validator the
/// signature was verified for and the exact sign-bytes it covered.
///
/// A cache hit is only honoured when both fields match the lookup; that
/// guards against a signature being reused across validators, chains or
/// heights.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignatureCacheValue {
    /// Address of the validator whose key verified the signature.
    pub validator_address: account::Id,
    /// The sign-bytes the signature was verified over.
    pub vote_sign_bytes: Vec<u8>,
}

/// A cache of previously verified signatures, keyed by raw signature bytes.
///
/// Eviction is the implementation's business; the engine only relies on
/// `get` returning what an earlier `add` stored, best-effort. Entries are
/// written after a genuine verification only, so concurrent writers always
/// agree on a key's value. Implementations must be safe for concurrent
/// `get`/`add` when shared across threads.
pub trait SignatureCache {
    /// Look up a previously verified signature.
    fn get(&self, signature: &[u8]) -> Option<SignatureCacheValue>;

    /// Record a verified signature.
    fn add(&self, signature: &[u8], value: SignatureCacheValue);
}

#[cfg(feature = "std")]
pub use lru_cache::LruSignatureCache;

#[cfg(feature = "std")]
mod lru_cache {
    use std::num::NonZeroUsize;
    use std::sync::Mutex;

    use lru::LruCache;

    use super::{SignatureCache, SignatureCacheValue};
    use crate::prelude::*;

    /// An LRU-evicting [`SignatureCache`] with a fixed capacity.
    pub struct LruSignatureCache {
        entries: Mutex<LruCache<Vec<u8>, SignatureCacheValue>>,
    }

    impl LruSignatureCache {
        /// Create a cache holding at most `capacity` verified signatures.
        pub fn new(capacity: NonZeroUsize) -> Self {
            Self {
                entries: Mutex::new(LruCache::new(capacity)),
            }
        }
    }

    impl SignatureCache for LruSignatureCache {
        fn get(&self, signature: &[u8]) -> Option<SignatureCacheValue> {
            self.entries
                .lock()
                .expect("signature cache lock poisoned")
                .get(signature)
                .cloned()
        }

        fn add(&self, signature: &[u8], value: SignatureCacheValue) {
            self.entries
                .lock()
                .expect("signature cache lock poisoned")
                .put(signature.to_vec(), value);
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    fn value(byte: u8) -> SignatureCacheValue {
        SignatureCacheValue {
            validator_address: account::Id::new([byte; account::LENGTH]),
            vote_sign_bytes: vec![byte; 8],
        }
    }

    #[test]
    fn stores_and_returns_entries() {
        let cache = LruSignatureCache::new(NonZeroUsize::new(4).unwrap());
        assert_eq!(cache.get(b"sig"), None);
        cache.add(b"sig", value(1));
        assert_eq!(cache.get(b"sig"), Some(value(1)));
    }

    #[test]
    fn evicts_least_recently_used() {
        let cache = LruSignatureCache::new(NonZeroUsize::new(2).unwrap());
        cache.add(b"a", value(1));
        cache.add(b"b", value(2));
        // Touch "a" so "b" is the eviction candidate.
        assert!(cache.get(b"a").is_some());
        cache.add(b"c", value(3));
        assert_eq!(cache.get(b"b"), None);
        assert!(cache.get(b"a").is_some());
        assert!(cache.get(b"c").is_some());
    }
}
