//! Trust level fractions.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A fraction `numerator / denominator`, used as the trust level when
/// verifying a commit against a validator set the verifier has not observed
/// signing.
///
/// The denominator must be non-zero; the verification entrypoints reject a
/// zero denominator before doing any work.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Fraction {
    /// Fraction numerator.
    pub numerator: u64,
    /// Fraction denominator.
    pub denominator: u64,
}

impl Fraction {
    /// The light client default trust level.
    pub const ONE_THIRD: Self = Self::new(1, 3);

    /// The threshold a correct validator set must clear.
    pub const TWO_THIRDS: Self = Self::new(2, 3);

    /// Construct a fraction.
    pub const fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
