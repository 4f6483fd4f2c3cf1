//! Re-exports of `alloc` types used throughout the crate.

#![allow(unused_imports)]

pub use alloc::boxed::Box;
pub use alloc::format;
pub use alloc::string::{String, ToString};
pub use alloc::vec;
pub use alloc::vec::Vec;
