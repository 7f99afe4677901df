//! Error types for kvcodec
//!
//! Provides a unified error type for encoding, decoding and store access.

use thiserror::Error;

/// Result type alias using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;

/// Unified error type for kvcodec operations
#[derive(Debug, Error)]
pub enum CodecError {
    // -------------------------------------------------------------------------
    // Decoding Errors
    // -------------------------------------------------------------------------
    /// Input is truncated, carries the wrong tag, or an embedded length
    /// field disagrees with the bytes that follow.
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),

    // -------------------------------------------------------------------------
    // Precondition Errors
    // -------------------------------------------------------------------------
    #[error("{what} length {len} exceeds maximum {max}")]
    LengthExceeded {
        what: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Score out of range: {0}")]
    ScoreOutOfRange(f64),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    /// Reserved for `OrderedStore` implementations backed by a real engine;
    /// the in-memory store never fails.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CodecError {
    /// Build a `MalformedEncoding` error, logging it at debug level.
    pub(crate) fn malformed(context: &str, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        tracing::debug!(context, %detail, "malformed encoding");
        CodecError::MalformedEncoding(format!("{}: {}", context, detail))
    }
}
