//! Validators and validator sets.

use serde::{Deserialize, Serialize};

use crate::account;
use crate::crypto::PublicKey;
use crate::error::Error;
use crate::prelude::*;

/// Total voting power is capped at an eighth of `i64::MAX` so threshold
/// arithmetic can double or triple it without overflowing.
pub const MAX_TOTAL_VOTING_POWER: i64 = i64::MAX / 8;

/// Validator information.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// Validator account address
    pub address: account::Id,
    /// Validator public key, if one is known.
    pub pub_key: Option<PublicKey>,
    /// Validator voting power
    pub voting_power: i64,
    /// Validator name
    pub name: Option<String>,
}

impl Info {
    /// Create a validator with the address derived from its public key.
    pub fn new(pub_key: PublicKey, voting_power: i64) -> Self {
        Self {
            address: pub_key.address(),
            pub_key: Some(pub_key),
            voting_power,
            name: None,
        }
    }
}

/// Validator set: an ordered list of validators plus a designated proposer.
///
/// Construction enforces the set invariants: at least one validator,
/// distinct addresses, non-negative powers, and a total voting power within
/// [`MAX_TOTAL_VOTING_POWER`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Set {
    validators: Vec<Info>,
    proposer: Option<Info>,
    total_voting_power: i64,
}

impl Set {
    /// Constructs a validated validator set.
    ///
    /// When `proposer` is `None`, the first validator is the designated
    /// proposer.
    pub fn new(validators: Vec<Info>, proposer: Option<Info>) -> Result<Self, Error> {
        if validators.is_empty() {
            return Err(Error::empty_validator_set());
        }

        let mut addresses: Vec<_> = validators.iter().map(|v| v.address).collect();
        addresses.sort_unstable();
        if let Some(pair) = addresses.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::duplicate_validator_address(pair[0]));
        }

        let mut total_voting_power: i64 = 0;
        for validator in &validators {
            if validator.voting_power < 0 {
                return Err(Error::negative_voting_power(validator.address));
            }
            total_voting_power = total_voting_power
                .checked_add(validator.voting_power)
                .filter(|&total| total <= MAX_TOTAL_VOTING_POWER)
                .ok_or_else(Error::total_voting_power_overflow)?;
        }

        Ok(Self {
            validators,
            proposer,
            total_voting_power,
        })
    }

    /// The validators, in set order.
    pub fn validators(&self) -> &[Info] {
        &self.validators
    }

    /// Number of validators in the set.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the set is empty. Construction forbids it; this exists for
    /// the sake of the `len`/`is_empty` pairing.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Sum of all validators' voting power.
    pub fn total_voting_power(&self) -> i64 {
        self.total_voting_power
    }

    /// The designated proposer, defaulting to the first validator.
    pub fn proposer(&self) -> &Info {
        self.proposer.as_ref().unwrap_or(&self.validators[0])
    }

    /// Whether every validator key in the set uses the same signature
    /// scheme. A validator without a key makes this `false`.
    pub fn all_keys_have_same_type(&self) -> bool {
        let Some(first) = self.validators[0].pub_key.as_ref().map(PublicKey::algorithm) else {
            return false;
        };
        self.validators
            .iter()
            .all(|v| v.pub_key.as_ref().map(PublicKey::algorithm) == Some(first))
    }

    /// Look up a validator and its index by address. Linear scan; callers on
    /// a hot path should build their own index.
    pub fn get_by_address(&self, address: account::Id) -> Option<(usize, &Info)> {
        self.validators
            .iter()
            .enumerate()
            .find(|(_, v)| v.address == address)
    }
}
