//! Block identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::block::parts;
use crate::prelude::*;

/// Composite identifier of a block: the header hash plus the part-set
/// header. Equality is structural.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Id {
    /// Header hash of the block.
    pub hash: Vec<u8>,
    /// Part-set header of the block.
    pub part_set_header: parts::Header,
}

impl Id {
    /// Construct a block id.
    pub fn new(hash: Vec<u8>, part_set_header: parts::Header) -> Self {
        Self {
            hash,
            part_set_header,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode_upper(&self.hash))
    }
}
