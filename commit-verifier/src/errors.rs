//! Error vocabulary of the commit verification engine.

use basalt::{account, block};
use flex_error::define_error;

use crate::prelude::*;

define_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    VerificationError {
        NilValidatorSet
            | _ | { format_args!("nil validator set") },

        NilCommit
            | _ | { format_args!("nil commit") },

        ZeroTrustDenominator
            | _ | { format_args!("trust level has a zero denominator") },

        InvalidCommitSignatures
            { expected: usize, got: usize }
            | e | {
                format_args!("invalid commit -- wrong set size: {} vs {}", e.expected, e.got)
            },

        InvalidCommitHeight
            { expected: u64, got: u64 }
            | e | {
                format_args!("invalid commit -- wrong height: {} vs {}", e.expected, e.got)
            },

        WrongBlockId
            { expected: block::Id, got: block::Id }
            | e | {
                format_args!("invalid commit -- wrong block id: want {}, got {}",
                    e.expected, e.got)
            },

        DoubleVote
            { validator: account::Id, first_index: usize, second_index: usize }
            | e | {
                format_args!("double vote from {} ({} and {})",
                    e.validator, e.first_index, e.second_index)
            },

        InvalidCommitSig
            { index: usize }
            | e | { format_args!("invalid commit signature at index {}", e.index) },

        NilPubKey
            { index: usize }
            | e | { format_args!("validator has no public key at index {}", e.index) },

        WrongSignature
            { index: usize, signature: Vec<u8> }
            | e | {
                format_args!("wrong signature (#{}): {}",
                    e.index, hex::encode_upper(&e.signature))
            },

        UnsupportedBatchSignature
            | _ | {
                format_args!(
                    "unsupported signature algorithm or insufficient signatures for batch verification")
            },

        OverflowComputingThreshold
            | _ | {
                format_args!(
                    "int64 overflow while calculating voting power needed; please provide a smaller trust level numerator")
            },

        NotEnoughVotingPowerSigned
            { got: i64, needed: i64 }
            | e | {
                format_args!("invalid commit -- insufficient voting power: got {}, needed more than {}",
                    e.got, e.needed)
            },

        InternalBatchInvariant
            | _ | { format_args!("batch verification failed with no invalid signatures") },
    }
}
