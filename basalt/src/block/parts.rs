//! Block part-set headers.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Header of the part-set a block was gossiped in: the number of parts and
/// the merkle root of their hashes.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Header {
    /// Number of parts the block was split into.
    pub total: u32,
    /// Root hash of the parts.
    pub hash: Vec<u8>,
}

impl Header {
    /// Construct a part-set header.
    pub fn new(total: u32, hash: Vec<u8>) -> Self {
        Self { total, hash }
    }
}
