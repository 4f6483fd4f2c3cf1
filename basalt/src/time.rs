//! Vote timestamps.

use serde::{Deserialize, Serialize};

/// A timestamp carried on a commit signature.
///
/// Seconds and nanoseconds mirror the canonical protobuf `Timestamp` layout,
/// which is how the value enters a vote's sign-bytes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Time {
    /// Seconds since the UNIX epoch.
    pub seconds: i64,
    /// Sub-second nanoseconds.
    pub nanos: i32,
}

impl Time {
    /// Construct a timestamp from seconds and nanoseconds.
    pub const fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }
}
