//! Core data model of the Basalt BFT consensus layer.
//!
//! This crate defines the types that commits, validator sets and votes are
//! made of, together with the cryptographic capabilities (single and batch
//! signature verification) that the `basalt-commit-verifier` crate builds
//! on.

#![no_std]

extern crate alloc;

mod prelude;

pub mod account;
pub mod block;
pub mod chain;
pub mod crypto;
pub mod error;
pub mod validator;

mod fraction;
mod signature;
mod time;

pub use crypto::PublicKey;
pub use error::Error;
pub use fraction::Fraction;
pub use signature::Signature;
pub use time::Time;
