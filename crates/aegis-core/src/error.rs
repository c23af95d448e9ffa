//! # Shared Error Types
//!
//! Error enums shared across the workspace, derived with `thiserror`.
//! Crate-specific failures (`AuditError`, `VcError`) live with the code
//! that raises them; only the errors both sides of the provider boundary
//! need are defined here.

use thiserror::Error;

/// Error in cryptographic provider operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key generation or parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// Digest or hex decoding failed.
    #[error("digest error: {0}")]
    DigestError(String),
}

/// Error constructing or parsing a [`Timestamp`](crate::Timestamp).
#[derive(Error, Debug)]
pub enum TimestampError {
    /// The input carried a timezone offset other than `Z`.
    #[error("timestamp must use Z suffix (UTC only), got: {0:?}")]
    NonUtc(String),

    /// The input was not valid RFC 3339.
    #[error("invalid RFC 3339 timestamp {input:?}: {source}")]
    Invalid {
        /// The rejected input string.
        input: String,
        /// The underlying chrono parse error.
        source: chrono::ParseError,
    },

    /// The epoch value is outside the representable range.
    #[error("epoch value out of range: {0}")]
    OutOfRange(i64),
}
