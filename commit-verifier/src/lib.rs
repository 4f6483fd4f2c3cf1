//! Commit verification engine of the Basalt BFT consensus layer.
//!
//! Given a block id, a height and a [`Commit`](basalt::block::Commit), the
//! engine decides whether the commit carries enough valid validator
//! signatures under a validator set and a voting power threshold.
//!
//! Three verification modes are exposed:
//!
//! - **full** ([`verify_commit`]) — the consensus path: every present
//!   signature is verified so downstream consumers see exactly which
//!   validators signed; only votes for the block count toward the tally.
//! - **light** ([`verify_commit_light`] and variants) — the light client
//!   path: signatures that are not votes for the block are skipped, and
//!   verification stops as soon as the threshold is cleared.
//! - **light-trusting** ([`verify_commit_light_trusting`] and variants) —
//!   like light, but against a *trusted* validator set that need not be the
//!   set that signed; validators are resolved by address and the threshold
//!   is a caller-supplied trust level instead of 2/3.
//!
//! Whenever the commit is large enough and every key in the set shares a
//! batch-capable scheme, signatures are verified as a batch; acceptance
//! semantics and the first-invalid-signature diagnostics are identical to
//! the single-signature path.

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod prelude;

pub mod cache;
pub mod errors;

mod verify;

#[cfg(test)]
mod testing;

pub use verify::{
    verify_commit, verify_commit_light, verify_commit_light_all_signatures,
    verify_commit_light_trusting, verify_commit_light_trusting_all_signatures,
    verify_commit_light_trusting_with_cache, verify_commit_light_with_cache,
    BATCH_VERIFY_THRESHOLD,
};
