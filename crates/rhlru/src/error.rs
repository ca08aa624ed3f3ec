//! Error types for rhlru

use std::fmt;

/// Result type alias for fallible cache construction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported at the cache API boundary
///
/// Lookups, inserts and removals never fail; only configuring a capacity the
/// 32-bit node index cannot address is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Requested capacity exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY)
    CapacityTooLarge(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityTooLarge(capacity) => write!(
                f,
                "Capacity too large: {} entries (max {})",
                capacity,
                crate::MAX_CAPACITY
            ),
        }
    }
}

impl std::error::Error for Error {}
