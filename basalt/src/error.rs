//! Error types for the core data model.

use flex_error::define_error;

use crate::account;
use crate::crypto::Algorithm;
use crate::prelude::*;

define_error! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    Error {
        InvalidAccountIdLength
            { got: usize }
            | e | {
                format_args!("invalid account id length: expected {} bytes, got {}",
                    account::LENGTH, e.got)
            },

        InvalidHexEncoding
            | _ | { format_args!("invalid hex encoding") },

        EmptyChainId
            | _ | { format_args!("chain id must not be empty") },

        ChainIdTooLong
            { len: usize }
            | e | {
                format_args!("chain id exceeds {} bytes: got {} bytes",
                    crate::chain::MAX_LENGTH, e.len)
            },

        EmptySignature
            | _ | { format_args!("signature must not be empty") },

        SignatureTooLong
            { len: usize }
            | e | {
                format_args!("signature exceeds {} bytes: got {} bytes",
                    crate::Signature::MAX_LENGTH, e.len)
            },

        InvalidSignature
            { detail: String }
            | e | { format_args!("invalid signature: {}", e.detail) },

        EmptyValidatorSet
            | _ | { format_args!("validator set must not be empty") },

        NegativeVotingPower
            { validator: account::Id }
            | e | { format_args!("validator {} has negative voting power", e.validator) },

        DuplicateValidatorAddress
            { address: account::Id }
            | e | { format_args!("duplicate validator address {}", e.address) },

        TotalVotingPowerOverflow
            | _ | { format_args!("total voting power exceeds the allowed maximum") },

        IncompatibleBatchKey
            { algorithm: Algorithm }
            | e | {
                format_args!("public key algorithm {:?} cannot join this batch", e.algorithm)
            },
    }
}
