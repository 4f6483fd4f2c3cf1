//! Test fixtures: deterministic keys, validator sets and signed commits.

use basalt::block::{self, BlockIdFlag, Commit, CommitSig};
use basalt::{chain, validator, PublicKey, Signature, Time};
use ed25519_dalek::{Signer, SigningKey};

use crate::prelude::*;

/// A validator together with the key that signs for it.
pub struct TestValidator {
    pub signing_key: SigningKey,
    pub info: validator::Info,
}

/// Deterministic ed25519 validators, one per entry of `powers`.
pub fn make_validators(powers: &[i64]) -> Vec<TestValidator> {
    powers
        .iter()
        .enumerate()
        .map(|(i, &power)| {
            let mut seed = [0xA5u8; 32];
            seed[0] = i as u8 + 1;
            let signing_key = SigningKey::from_bytes(&seed);
            let pub_key = PublicKey::Ed25519(signing_key.verifying_key().to_bytes());
            TestValidator {
                signing_key,
                info: validator::Info::new(pub_key, power),
            }
        })
        .collect()
}

pub fn make_set(validators: &[TestValidator]) -> validator::Set {
    validator::Set::new(validators.iter().map(|v| v.info.clone()).collect(), None).unwrap()
}

pub fn make_chain_id(s: &str) -> chain::Id {
    s.parse().unwrap()
}

pub fn make_block_id(tag: u8) -> block::Id {
    block::Id::new(
        vec![tag; 32],
        block::parts::Header::new(1, vec![tag ^ 0xFF; 32]),
    )
}

/// Build a commit where validator `i` votes according to `flags[i]`,
/// with genuine signatures over the commit's own sign-bytes.
pub fn signed_commit(
    chain_id: &chain::Id,
    validators: &[TestValidator],
    block_id: &block::Id,
    height: u64,
    flags: &[BlockIdFlag],
) -> Commit {
    assert_eq!(validators.len(), flags.len());
    let timestamp = Time::new(1_700_000_000, 0);

    let signatures = flags
        .iter()
        .zip(validators)
        .map(|(flag, validator)| match flag {
            BlockIdFlag::Absent => CommitSig::BlockIdFlagAbsent,
            BlockIdFlag::Commit => CommitSig::BlockIdFlagCommit {
                validator_address: validator.info.address,
                timestamp,
                signature: None,
            },
            BlockIdFlag::Nil => CommitSig::BlockIdFlagNil {
                validator_address: validator.info.address,
                timestamp,
                signature: None,
            },
        })
        .collect();
    let mut commit = Commit::new(height, 1, block_id.clone(), signatures);

    for idx in 0..commit.signatures.len() {
        if commit.signatures[idx].is_absent() {
            continue;
        }
        let sign_bytes = commit.vote_sign_bytes(chain_id, idx);
        let signed = validators[idx].signing_key.sign(&sign_bytes);
        set_signature(&mut commit, idx, signed.to_bytes().to_vec());
    }
    commit
}

/// Flip a byte of the signature at `idx`.
pub fn corrupt_signature(commit: &mut Commit, idx: usize) {
    let signature = match &mut commit.signatures[idx] {
        CommitSig::BlockIdFlagCommit { signature, .. }
        | CommitSig::BlockIdFlagNil { signature, .. } => signature,
        CommitSig::BlockIdFlagAbsent => panic!("cannot corrupt an absent signature"),
    };
    let mut bytes = signature.take().unwrap().into_bytes();
    bytes[0] ^= 0xFF;
    *signature = Signature::new(bytes).unwrap();
}

/// Rewrite the vote at `idx` so it carries `signer`'s address and a genuine
/// signature from `signer`, i.e. a second vote by the same validator.
pub fn duplicate_vote(
    commit: &mut Commit,
    idx: usize,
    signer: &TestValidator,
    chain_id: &chain::Id,
) {
    match &mut commit.signatures[idx] {
        CommitSig::BlockIdFlagCommit {
            validator_address,
            signature,
            ..
        } => {
            *validator_address = signer.info.address;
            *signature = None;
        },
        _ => panic!("expected a commit vote at index {idx}"),
    }
    let sign_bytes = commit.vote_sign_bytes(chain_id, idx);
    let signed = signer.signing_key.sign(&sign_bytes);
    set_signature(commit, idx, signed.to_bytes().to_vec());
}

fn set_signature(commit: &mut Commit, idx: usize, bytes: Vec<u8>) {
    match &mut commit.signatures[idx] {
        CommitSig::BlockIdFlagCommit { signature, .. }
        | CommitSig::BlockIdFlagNil { signature, .. } => {
            *signature = Signature::new(bytes).unwrap();
        },
        CommitSig::BlockIdFlagAbsent => panic!("absent votes carry no signature"),
    }
}
