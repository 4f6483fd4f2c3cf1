//! Commits and canonical vote sign-bytes.

use prost::Message;
use serde::{Deserialize, Serialize};

use crate::block::{self, CommitSig};
use crate::chain;
use crate::prelude::*;

/// Vote type tag of a precommit in the canonical vote encoding.
const PRECOMMIT_TYPE: i32 = 2;

/// Commit contains the evidence that a block was committed by a set of
/// validators: one [`CommitSig`] per validator of the signing set, in
/// validator-set order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Height at which the block was committed.
    pub height: u64,
    /// Round at which the block was committed.
    pub round: u32,
    /// Identifier of the committed block.
    pub block_id: block::Id,
    /// Per-validator signatures, indexed like the signing validator set.
    pub signatures: Vec<CommitSig>,
}

impl Commit {
    /// Construct a commit.
    pub fn new(height: u64, round: u32, block_id: block::Id, signatures: Vec<CommitSig>) -> Self {
        Self {
            height,
            round,
            block_id,
            signatures,
        }
    }

    /// Canonical sign-bytes of the vote at `idx`: the exact payload the
    /// validator signed.
    ///
    /// The encoding is the length-delimited canonical vote message. Votes
    /// for nil encode no block id. Callers treat the output as opaque.
    ///
    /// Panics if `idx` is out of bounds of `signatures`.
    pub fn vote_sign_bytes(&self, chain_id: &chain::Id, idx: usize) -> Vec<u8> {
        let commit_sig = &self.signatures[idx];

        let block_id = commit_sig.is_commit().then(|| CanonicalBlockId {
            hash: self.block_id.hash.clone(),
            part_set_header: Some(CanonicalPartSetHeader {
                total: self.block_id.part_set_header.total,
                hash: self.block_id.part_set_header.hash.clone(),
            }),
        });
        let timestamp = commit_sig.timestamp().map(|t| CanonicalTimestamp {
            seconds: t.seconds,
            nanos: t.nanos,
        });

        let vote = CanonicalVote {
            r#type: PRECOMMIT_TYPE,
            height: self.height as i64,
            round: i64::from(self.round),
            block_id,
            timestamp,
            chain_id: chain_id.as_str().to_string(),
        };
        vote.encode_length_delimited_to_vec()
    }
}

#[derive(Clone, PartialEq, Message)]
struct CanonicalVote {
    #[prost(int32, tag = "1")]
    r#type: i32,
    #[prost(sfixed64, tag = "2")]
    height: i64,
    #[prost(sfixed64, tag = "3")]
    round: i64,
    #[prost(message, optional, tag = "4")]
    block_id: Option<CanonicalBlockId>,
    #[prost(message, optional, tag = "5")]
    timestamp: Option<CanonicalTimestamp>,
    #[prost(string, tag = "6")]
    chain_id: String,
}

#[derive(Clone, PartialEq, Message)]
struct CanonicalBlockId {
    #[prost(bytes = "vec", tag = "1")]
    hash: Vec<u8>,
    #[prost(message, optional, tag = "2")]
    part_set_header: Option<CanonicalPartSetHeader>,
}

#[derive(Clone, PartialEq, Message)]
struct CanonicalPartSetHeader {
    #[prost(uint32, tag = "1")]
    total: u32,
    #[prost(bytes = "vec", tag = "2")]
    hash: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
struct CanonicalTimestamp {
    #[prost(int64, tag = "1")]
    seconds: i64,
    #[prost(int32, tag = "2")]
    nanos: i32,
}
