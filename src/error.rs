//! Error types for query-string decoding.
//!
//! Decoding is deliberately tolerant: malformed percent-escapes pass through
//! verbatim, over-limit parameter counts are truncated, and reserved keys are
//! silently dropped. The single fatal condition is an explicit array index
//! beyond the configured ceiling, which aborts the whole parse.
//!
//! ## Examples
//!
//! ```rust
//! use nested_qs::parse;
//!
//! let err = parse("a[21]=x").unwrap_err();
//! assert_eq!(err.to_string(), "Index of array [21] is overstep limit: 20");
//! ```

use thiserror::Error;

/// Represents all possible errors that can occur while decoding a query string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An explicit array index exceeded the configured ceiling.
    ///
    /// No partial result is returned; the parse either fully succeeds or
    /// fails with this error.
    #[error("Index of array [{index}] is overstep limit: {limit}")]
    IndexLimitExceeded {
        /// The offending index as written in the key.
        index: u64,
        /// The active `array_limit` at the time of the failure.
        limit: i64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
