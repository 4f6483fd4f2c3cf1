//! Commit verification.
//!
//! Entry points select a verification mode, run the structural
//! preconditions, compute the voting power threshold, and dispatch to the
//! batch driver when the commit is batch-eligible, else to the
//! single-signature driver. Both drivers share the same skeleton: iterate
//! the commit signatures, resolve each one to a validator, consult the
//! verified-signature cache, tally voting power, and either exit early on
//! sufficient power or verify exhaustively.

use basalt::block::{Commit, CommitSig};
use basalt::crypto::batch::{self, BatchVerifier};
use basalt::{account, block, chain, validator, Fraction, PublicKey};
use tracing::trace;

use crate::cache::{SignatureCache, SignatureCacheValue};
use crate::errors::VerificationError;
use crate::prelude::*;

/// Minimum number of commit signatures for batch verification to pay off.
pub const BATCH_VERIFY_THRESHOLD: usize = 2;

fn should_batch_verify(vals: &validator::Set, commit: &Commit) -> bool {
    commit.signatures.len() >= BATCH_VERIFY_THRESHOLD
        && batch::supports_batch_verifier(vals.proposer().pub_key.as_ref())
        && vals.all_keys_have_same_type()
}

/// Verify that +2/3 of the validator set signed the given commit.
///
/// This checks all the signatures. While it is safe to exit as soon as 2/3+
/// is reached, the application layer is told exactly which validators signed
/// the last commit, and incentive logic downstream depends on that report
/// being complete. Skipped verification would let an unverified signature
/// into it.
pub fn verify_commit(
    chain_id: &chain::Id,
    vals: &validator::Set,
    block_id: &block::Id,
    height: u64,
    commit: &Commit,
) -> Result<(), VerificationError> {
    verify_basic_vals_and_commit(vals, commit, height, block_id)?;

    // Total voting power is capped at an eighth of i64::MAX, so the
    // multiplication cannot overflow.
    let voting_power_needed = vals.total_voting_power() * 2 / 3;

    if should_batch_verify(vals, commit) {
        return verify_commit_batch(
            chain_id,
            vals,
            commit,
            voting_power_needed,
            TallyRule::Full,
            true,
            true,
            None,
            None,
        );
    }

    verify_commit_single(
        chain_id,
        vals,
        commit,
        voting_power_needed,
        TallyRule::Full,
        true,
        true,
        None,
    )
}

/// Verify that +2/3 of the validator set signed the given commit.
///
/// This method is primarily used by the light client and does NOT check all
/// the signatures: it stops as soon as the threshold is cleared.
pub fn verify_commit_light(
    chain_id: &chain::Id,
    vals: &validator::Set,
    block_id: &block::Id,
    height: u64,
    commit: &Commit,
) -> Result<(), VerificationError> {
    verify_commit_light_internal(chain_id, vals, block_id, height, commit, false, None)
}

/// Verify that +2/3 of the validator set signed the given commit, skipping
/// signature verification for entries where the cached signature, validator
/// address and sign-bytes all match. Verified signatures are added to the
/// cache.
pub fn verify_commit_light_with_cache(
    chain_id: &chain::Id,
    vals: &validator::Set,
    block_id: &block::Id,
    height: u64,
    commit: &Commit,
    verified_signature_cache: &dyn SignatureCache,
) -> Result<(), VerificationError> {
    verify_commit_light_internal(
        chain_id,
        vals,
        block_id,
        height,
        commit,
        false,
        Some(verified_signature_cache),
    )
}

/// Verify that +2/3 of the validator set signed the given commit.
///
/// This method DOES check all the signatures.
pub fn verify_commit_light_all_signatures(
    chain_id: &chain::Id,
    vals: &validator::Set,
    block_id: &block::Id,
    height: u64,
    commit: &Commit,
) -> Result<(), VerificationError> {
    verify_commit_light_internal(chain_id, vals, block_id, height, commit, true, None)
}

fn verify_commit_light_internal(
    chain_id: &chain::Id,
    vals: &validator::Set,
    block_id: &block::Id,
    height: u64,
    commit: &Commit,
    count_all_signatures: bool,
    verified_signature_cache: Option<&dyn SignatureCache>,
) -> Result<(), VerificationError> {
    verify_basic_vals_and_commit(vals, commit, height, block_id)?;

    let voting_power_needed = vals.total_voting_power() * 2 / 3;

    if should_batch_verify(vals, commit) {
        return verify_commit_batch(
            chain_id,
            vals,
            commit,
            voting_power_needed,
            TallyRule::BlockOnly,
            count_all_signatures,
            true,
            None,
            verified_signature_cache,
        );
    }

    verify_commit_single(
        chain_id,
        vals,
        commit,
        voting_power_needed,
        TallyRule::BlockOnly,
        count_all_signatures,
        true,
        verified_signature_cache,
    )
}

/// Verify that `trust_level` of the validator set signed this commit.
/// "Trusting" means the validator set is trusted to be correct; it need not
/// be the set that actually signed, so validators are resolved by address
/// and signatures from unknown validators are skipped.
///
/// This method is primarily used by the light client and does NOT check all
/// the signatures.
pub fn verify_commit_light_trusting(
    chain_id: &chain::Id,
    vals: &validator::Set,
    commit: &Commit,
    trust_level: Fraction,
) -> Result<(), VerificationError> {
    verify_commit_light_trusting_internal(chain_id, vals, commit, trust_level, false, None)
}

/// Verify that `trust_level` of the validator set signed this commit,
/// skipping signature verification for entries where the cached signature,
/// validator address and sign-bytes all match. Verified signatures are
/// added to the cache.
pub fn verify_commit_light_trusting_with_cache(
    chain_id: &chain::Id,
    vals: &validator::Set,
    commit: &Commit,
    trust_level: Fraction,
    verified_signature_cache: &dyn SignatureCache,
) -> Result<(), VerificationError> {
    verify_commit_light_trusting_internal(
        chain_id,
        vals,
        commit,
        trust_level,
        false,
        Some(verified_signature_cache),
    )
}

/// Verify that `trust_level` of the validator set signed this commit.
///
/// This method DOES check all the signatures.
pub fn verify_commit_light_trusting_all_signatures(
    chain_id: &chain::Id,
    vals: &validator::Set,
    commit: &Commit,
    trust_level: Fraction,
) -> Result<(), VerificationError> {
    verify_commit_light_trusting_internal(chain_id, vals, commit, trust_level, true, None)
}

fn verify_commit_light_trusting_internal(
    chain_id: &chain::Id,
    vals: &validator::Set,
    commit: &Commit,
    trust_level: Fraction,
    count_all_signatures: bool,
    verified_signature_cache: Option<&dyn SignatureCache>,
) -> Result<(), VerificationError> {
    if trust_level.denominator == 0 {
        return Err(VerificationError::zero_trust_denominator());
    }

    // The trusted set need not match the signing set, so there is no
    // size-equality precondition here.
    let numerator = i64::try_from(trust_level.numerator)
        .map_err(|_| VerificationError::overflow_computing_threshold())?;
    let denominator = i64::try_from(trust_level.denominator)
        .map_err(|_| VerificationError::overflow_computing_threshold())?;
    let scaled = vals
        .total_voting_power()
        .checked_mul(numerator)
        .ok_or_else(VerificationError::overflow_computing_threshold)?;
    let voting_power_needed = scaled / denominator;

    if should_batch_verify(vals, commit) {
        return verify_commit_batch(
            chain_id,
            vals,
            commit,
            voting_power_needed,
            TallyRule::BlockOnly,
            count_all_signatures,
            false,
            None,
            verified_signature_cache,
        );
    }

    verify_commit_single(
        chain_id,
        vals,
        commit,
        voting_power_needed,
        TallyRule::BlockOnly,
        count_all_signatures,
        false,
        verified_signature_cache,
    )
}

fn verify_basic_vals_and_commit(
    vals: &validator::Set,
    commit: &Commit,
    height: u64,
    block_id: &block::Id,
) -> Result<(), VerificationError> {
    if vals.len() != commit.signatures.len() {
        return Err(VerificationError::invalid_commit_signatures(
            vals.len(),
            commit.signatures.len(),
        ));
    }
    if commit.height != height {
        return Err(VerificationError::invalid_commit_height(
            height,
            commit.height,
        ));
    }
    if &commit.block_id != block_id {
        return Err(VerificationError::wrong_block_id(
            block_id.clone(),
            commit.block_id.clone(),
        ));
    }
    Ok(())
}

/// Which commit signatures a verification pass ignores and which it counts
/// toward the tally.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum TallyRule {
    /// Verify every present signature, count only votes for the block.
    /// The full path reports every signer downstream, so nil votes are
    /// verified even though they never count.
    Full,
    /// Skip everything that is not a vote for the block; count the rest.
    BlockOnly,
}

impl TallyRule {
    fn ignores(self, commit_sig: &CommitSig) -> bool {
        match self {
            Self::Full => commit_sig.is_absent(),
            Self::BlockOnly => !commit_sig.is_commit(),
        }
    }

    fn counts(self, commit_sig: &CommitSig) -> bool {
        match self {
            Self::Full => commit_sig.is_commit(),
            Self::BlockOnly => true,
        }
    }
}

/// Validators sorted by address for logarithmic lookup on the trusting
/// path, remembering the commit index at which each validator was first
/// counted so a double vote can report both positions.
struct AddressIndex<'a> {
    entries: Vec<Entry<'a>>,
}

struct Entry<'a> {
    validator: &'a validator::Info,
    first_seen: Option<usize>,
}

enum Resolution<'a> {
    Found(&'a validator::Info),
    Unknown,
    DoubleVote { first_index: usize },
}

impl<'a> AddressIndex<'a> {
    fn new(validators: &'a [validator::Info]) -> Self {
        let mut entries: Vec<_> = validators
            .iter()
            .map(|validator| Entry {
                validator,
                first_seen: None,
            })
            .collect();
        entries.sort_unstable_by_key(|entry| entry.validator.address);
        Self { entries }
    }

    fn resolve(&mut self, address: account::Id, commit_index: usize) -> Resolution<'a> {
        let Ok(pos) = self
            .entries
            .binary_search_by_key(&address, |entry| entry.validator.address)
        else {
            return Resolution::Unknown;
        };
        let entry = &mut self.entries[pos];
        match entry.first_seen {
            Some(first_index) => Resolution::DoubleVote { first_index },
            None => {
                entry.first_seen = Some(commit_index);
                Resolution::Found(entry.validator)
            },
        }
    }
}

/// How commit signatures are paired with validators: positionally when the
/// commit corresponds one-to-one with the set, by address on the trusting
/// path.
enum Lookup<'a> {
    ByIndex,
    ByAddress(AddressIndex<'a>),
}

impl<'a> Lookup<'a> {
    fn new(vals: &'a validator::Set, look_up_by_index: bool) -> Self {
        if look_up_by_index {
            Self::ByIndex
        } else {
            Self::ByAddress(AddressIndex::new(vals.validators()))
        }
    }

    /// Resolve the signature at `idx` to a validator. `Ok(None)` means the
    /// signature belongs to no one in the set and is skipped.
    fn resolve(
        &mut self,
        vals: &'a validator::Set,
        commit_sig: &CommitSig,
        idx: usize,
    ) -> Result<Option<&'a validator::Info>, VerificationError> {
        match self {
            Self::ByIndex => Ok(Some(&vals.validators()[idx])),
            Self::ByAddress(index) => {
                let Some(address) = commit_sig.validator_address() else {
                    return Ok(None);
                };
                match index.resolve(address, idx) {
                    Resolution::Found(validator) => Ok(Some(validator)),
                    Resolution::Unknown => Ok(None),
                    Resolution::DoubleVote { first_index } => Err(
                        VerificationError::double_vote(address, first_index, idx),
                    ),
                }
            },
        }
    }
}

fn cache_hit(
    cache: Option<&dyn SignatureCache>,
    signature: &[u8],
    pub_key: &PublicKey,
    vote_sign_bytes: &[u8],
) -> bool {
    cache
        .and_then(|cache| cache.get(signature))
        .is_some_and(|value| {
            value.validator_address == pub_key.address()
                && value.vote_sign_bytes == vote_sign_bytes
        })
}

fn insert_cache_entry(
    cache: &dyn SignatureCache,
    chain_id: &chain::Id,
    commit: &Commit,
    idx: usize,
) {
    let commit_sig = &commit.signatures[idx];
    let (Some(address), Some(signature)) = (commit_sig.validator_address(), commit_sig.signature())
    else {
        return;
    };
    cache.add(
        signature.as_bytes(),
        SignatureCacheValue {
            validator_address: address,
            vote_sign_bytes: commit.vote_sign_bytes(chain_id, idx),
        },
    );
}

/// Batch-verify a commit. Equivalent to [`verify_commit_single`] in
/// behavior, just faster iff every signature in the batch is valid.
///
/// Callers are responsible for checking eligibility via
/// `should_batch_verify` first; `batch_verifier` overrides the freshly
/// created verifier for testing.
#[allow(clippy::too_many_arguments)]
fn verify_commit_batch(
    chain_id: &chain::Id,
    vals: &validator::Set,
    commit: &Commit,
    voting_power_needed: i64,
    rule: TallyRule,
    count_all_signatures: bool,
    look_up_by_index: bool,
    batch_verifier: Option<Box<dyn BatchVerifier>>,
    verified_signature_cache: Option<&dyn SignatureCache>,
) -> Result<(), VerificationError> {
    let mut verifier = match batch_verifier.or_else(|| {
        vals.proposer()
            .pub_key
            .as_ref()
            .and_then(batch::create_batch_verifier)
    }) {
        Some(verifier) if commit.signatures.len() >= BATCH_VERIFY_THRESHOLD => verifier,
        // Never reached when the eligibility gate is honoured; a bug in the
        // crypto capability layer if it is.
        _ => return Err(VerificationError::unsupported_batch_signature()),
    };

    let mut lookup = Lookup::new(vals, look_up_by_index);
    let mut batch_sig_indices: Vec<usize> = Vec::with_capacity(commit.signatures.len());
    let mut tallied_voting_power: i64 = 0;

    for (idx, commit_sig) in commit.signatures.iter().enumerate() {
        if rule.ignores(commit_sig) {
            continue;
        }

        let Some(validator) = lookup.resolve(vals, commit_sig, idx)? else {
            continue;
        };
        let Some(pub_key) = validator.pub_key.as_ref() else {
            return Err(VerificationError::nil_pub_key(idx));
        };

        let vote_sign_bytes = commit.vote_sign_bytes(chain_id, idx);
        let signature = commit_sig
            .signature()
            .map(|signature| signature.as_bytes())
            .unwrap_or_default();

        if !cache_hit(verified_signature_cache, signature, pub_key, &vote_sign_bytes) {
            verifier
                .add(pub_key, vote_sign_bytes, signature)
                .map_err(|_| VerificationError::unsupported_batch_signature())?;
            batch_sig_indices.push(idx);
        }

        if rule.counts(commit_sig) {
            tallied_voting_power += validator.voting_power;
        }

        // With enough voting power already batched there is nothing left to
        // collect; everything queued still gets verified below.
        if !count_all_signatures && tallied_voting_power > voting_power_needed {
            break;
        }
    }

    // The threshold gate runs before any cryptography: a commit that cannot
    // reach the threshold is rejected without spending a single verify.
    if tallied_voting_power <= voting_power_needed {
        return Err(VerificationError::not_enough_voting_power_signed(
            tallied_voting_power,
            voting_power_needed,
        ));
    }

    // Every countable signature was already in the cache.
    if batch_sig_indices.is_empty() {
        return Ok(());
    }

    let (all_valid, valid_signatures) = verifier.verify();
    trace!(
        all_valid,
        batched = batch_sig_indices.len(),
        "batch verification complete"
    );

    if all_valid {
        if let Some(cache) = verified_signature_cache {
            for &idx in &batch_sig_indices {
                insert_cache_entry(cache, chain_id, commit, idx);
            }
        }
        return Ok(());
    }

    // One or more signatures is invalid: find and report the first one,
    // still caching the valid entries encountered before it.
    for (pos, valid) in valid_signatures.iter().enumerate() {
        let idx = batch_sig_indices[pos];
        if !valid {
            let signature = commit.signatures[idx]
                .signature()
                .map(|signature| signature.as_bytes().to_vec())
                .unwrap_or_default();
            return Err(VerificationError::wrong_signature(idx, signature));
        }
        if let Some(cache) = verified_signature_cache {
            insert_cache_entry(cache, chain_id, commit, idx);
        }
    }

    // Reaching here means the verifier reported failure yet flagged no
    // entry as invalid.
    Err(VerificationError::internal_batch_invariant())
}

/// Verify a commit one signature at a time. Used when a key scheme does not
/// support batch verification, or when the commit is too small for batching
/// to pay off.
#[allow(clippy::too_many_arguments)]
fn verify_commit_single(
    chain_id: &chain::Id,
    vals: &validator::Set,
    commit: &Commit,
    voting_power_needed: i64,
    rule: TallyRule,
    count_all_signatures: bool,
    look_up_by_index: bool,
    verified_signature_cache: Option<&dyn SignatureCache>,
) -> Result<(), VerificationError> {
    let mut lookup = Lookup::new(vals, look_up_by_index);
    let mut tallied_voting_power: i64 = 0;

    for (idx, commit_sig) in commit.signatures.iter().enumerate() {
        if rule.ignores(commit_sig) {
            continue;
        }

        if commit_sig.validate_basic().is_err() {
            return Err(VerificationError::invalid_commit_sig(idx));
        }

        let Some(validator) = lookup.resolve(vals, commit_sig, idx)? else {
            continue;
        };
        let Some(pub_key) = validator.pub_key.as_ref() else {
            return Err(VerificationError::nil_pub_key(idx));
        };
        let Some(signature) = commit_sig.signature() else {
            return Err(VerificationError::invalid_commit_sig(idx));
        };

        let vote_sign_bytes = commit.vote_sign_bytes(chain_id, idx);

        if !cache_hit(
            verified_signature_cache,
            signature.as_bytes(),
            pub_key,
            &vote_sign_bytes,
        ) {
            if !pub_key.verify_signature(&vote_sign_bytes, signature.as_bytes()) {
                return Err(VerificationError::wrong_signature(
                    idx,
                    signature.as_bytes().to_vec(),
                ));
            }
            if let Some(cache) = verified_signature_cache {
                cache.add(
                    signature.as_bytes(),
                    SignatureCacheValue {
                        validator_address: pub_key.address(),
                        vote_sign_bytes,
                    },
                );
            }
        }

        if rule.counts(commit_sig) {
            tallied_voting_power += validator.voting_power;
        }

        // Check if we have enough signatures and can thus exit early.
        if !count_all_signatures && tallied_voting_power > voting_power_needed {
            return Ok(());
        }
    }

    if tallied_voting_power <= voting_power_needed {
        return Err(VerificationError::not_enough_voting_power_signed(
            tallied_voting_power,
            voting_power_needed,
        ));
    }

    Ok(())
}
