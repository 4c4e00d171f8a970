//! Error types for the waycache library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache construction parameters are invalid
//!   (zero set capacity or zero set count).
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` on [`RecencyList`](crate::ds::RecencyList)).
//!
//! ## Example Usage
//!
//! ```
//! use waycache::cache::SetAssociativeCache;
//! use waycache::error::ConfigError;
//!
//! // Fallible constructor for user-configurable parameters
//! let cache: Result<SetAssociativeCache<u64, u64>, ConfigError> =
//!     SetAssociativeCache::try_new(4, 16);
//! assert!(cache.is_ok());
//!
//! // Invalid parameters are caught without panicking
//! let bad = SetAssociativeCache::<u64, u64>::try_new(0, 16);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`SetAssociativeCache::try_new`](crate::cache::SetAssociativeCache::try_new)
/// and the builder's `try_build` methods. Carries a human-readable description
/// of which parameter failed validation.
///
/// # Example
///
/// ```
/// use waycache::cache::SetAssociativeCache;
///
/// let err = SetAssociativeCache::<u64, u64>::try_new(4, 0).unwrap_err();
/// assert!(err.to_string().contains("sets"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`RecencyList::check_invariants`](crate::ds::RecencyList::check_invariants),
/// which validates the linkage of the recency order. Carries a human-readable
/// description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
