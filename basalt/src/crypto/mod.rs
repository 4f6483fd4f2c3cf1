//! Cryptographic capabilities consumed by the commit verification engine.

pub mod batch;

mod public_key;

pub use public_key::{Algorithm, PublicKey};
