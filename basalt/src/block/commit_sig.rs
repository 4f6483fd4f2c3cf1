//! CommitSig within Commit

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::prelude::*;
use crate::{account, Signature, Time};

/// The block-id flag carried by a commit signature.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BlockIdFlag {
    /// No vote was received from the validator.
    Absent,
    /// The validator voted for the commit's block id.
    Commit,
    /// The validator voted for nil.
    Nil,
}

/// CommitSig represents a signature of a validator.
/// It's a part of the Commit and can be used to reconstruct the vote set given the validator set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommitSig {
    /// no vote was received from a validator.
    BlockIdFlagAbsent,
    /// voted for the Commit.BlockID.
    BlockIdFlagCommit {
        /// Validator address
        validator_address: account::Id,
        /// Timestamp of vote
        timestamp: Time,
        /// Signature of vote
        signature: Option<Signature>,
    },
    /// voted for nil.
    BlockIdFlagNil {
        /// Validator address
        validator_address: account::Id,
        /// Timestamp of vote
        timestamp: Time,
        /// Signature of vote
        signature: Option<Signature>,
    },
}

impl CommitSig {
    /// The block-id flag of this signature.
    pub fn block_id_flag(&self) -> BlockIdFlag {
        match self {
            Self::BlockIdFlagAbsent => BlockIdFlag::Absent,
            Self::BlockIdFlagCommit { .. } => BlockIdFlag::Commit,
            Self::BlockIdFlagNil { .. } => BlockIdFlag::Nil,
        }
    }

    /// Get the address of this validator if a vote was received.
    pub fn validator_address(&self) -> Option<account::Id> {
        match self {
            Self::BlockIdFlagCommit {
                validator_address, ..
            } => Some(*validator_address),
            Self::BlockIdFlagNil {
                validator_address, ..
            } => Some(*validator_address),
            _ => None,
        }
    }

    /// The vote timestamp, if a vote was received.
    pub fn timestamp(&self) -> Option<Time> {
        match self {
            Self::BlockIdFlagCommit { timestamp, .. } => Some(*timestamp),
            Self::BlockIdFlagNil { timestamp, .. } => Some(*timestamp),
            _ => None,
        }
    }

    /// The signature, if one was received.
    pub fn signature(&self) -> Option<&Signature> {
        match self {
            Self::BlockIdFlagCommit { signature, .. } => signature.as_ref(),
            Self::BlockIdFlagNil { signature, .. } => signature.as_ref(),
            _ => None,
        }
    }

    /// Whether this signature is absent (no vote was received from validator)
    pub fn is_absent(&self) -> bool {
        self == &Self::BlockIdFlagAbsent
    }

    /// Whether this signature is a commit (validator voted for the Commit.BlockId)
    pub fn is_commit(&self) -> bool {
        matches!(self, Self::BlockIdFlagCommit { .. })
    }

    /// Whether this signature is nil (validator voted for nil)
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::BlockIdFlagNil { .. })
    }

    /// Structural coherence of flag, address and signature: a received vote
    /// must carry a signature, an absent one carries nothing.
    pub fn validate_basic(&self) -> Result<(), Error> {
        match self {
            Self::BlockIdFlagAbsent => Ok(()),
            Self::BlockIdFlagCommit { signature, .. } => match signature {
                Some(_) => Ok(()),
                None => Err(Error::invalid_signature(
                    "expected non-empty signature for regular commitsig".to_string(),
                )),
            },
            Self::BlockIdFlagNil { signature, .. } => match signature {
                Some(_) => Ok(()),
                None => Err(Error::invalid_signature(
                    "nil commitsig has no signature".to_string(),
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    fn address(byte: u8) -> account::Id {
        account::Id::new([byte; account::LENGTH])
    }

    fn signature() -> Option<Signature> {
        Signature::new(vec![3u8; 64]).unwrap()
    }

    #[test]
    fn absent_is_always_coherent() {
        assert!(CommitSig::BlockIdFlagAbsent.validate_basic().is_ok());
        assert_eq!(CommitSig::BlockIdFlagAbsent.validator_address(), None);
        assert_eq!(
            CommitSig::BlockIdFlagAbsent.block_id_flag(),
            BlockIdFlag::Absent
        );
    }

    #[test]
    fn commit_without_signature_is_rejected() {
        let commit_sig = CommitSig::BlockIdFlagCommit {
            validator_address: address(1),
            timestamp: Time::new(1_700_000_000, 0),
            signature: None,
        };
        assert!(commit_sig.validate_basic().is_err());
    }

    #[test]
    fn nil_without_signature_is_rejected() {
        let commit_sig = CommitSig::BlockIdFlagNil {
            validator_address: address(1),
            timestamp: Time::new(1_700_000_000, 0),
            signature: None,
        };
        assert!(commit_sig.validate_basic().is_err());
    }

    #[test]
    fn signed_votes_are_coherent() {
        let commit_sig = CommitSig::BlockIdFlagCommit {
            validator_address: address(2),
            timestamp: Time::new(1_700_000_000, 0),
            signature: signature(),
        };
        assert!(commit_sig.validate_basic().is_ok());
        assert_eq!(commit_sig.validator_address(), Some(address(2)));
        assert!(commit_sig.is_commit() && !commit_sig.is_nil() && !commit_sig.is_absent());
    }

    #[test]
    fn serde_round_trip() {
        let commit_sig = CommitSig::BlockIdFlagNil {
            validator_address: address(9),
            timestamp: Time::new(1_700_000_000, 42),
            signature: signature(),
        };
        let encoded = serde_json::to_string(&commit_sig).unwrap();
        let decoded: CommitSig = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, commit_sig);
    }
}
