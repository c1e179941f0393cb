//! Error types for xofhash.

use thiserror::Error;

/// Errors that can occur while driving a hasher session or its output pool.
///
/// Every variant is a local validation failure reported to the immediate
/// caller. A rejected call never modifies the session it was made on.
#[derive(Debug, Error)]
pub enum HashError {
    /// A second initialization conflicts with the mode or key material the
    /// session was already initialized with.
    #[error("session already initialized with a different mode or key material")]
    AlreadyInitialized,

    /// Keyed mode requires a key of exactly 32 bytes.
    #[error("invalid key length: {actual} bytes (expected 32)")]
    InvalidKeyLength {
        /// The length of the rejected key.
        actual: usize,
    },

    /// Derive-key mode requires a non-empty context string.
    #[error("derive-key context must not be empty")]
    EmptyContext,

    /// `update` or a finalize call was made before any `init_*` call.
    #[error("session not initialized")]
    NotInitialized,

    /// A zero-length output was requested.
    #[error("invalid output length: output must be at least one byte")]
    InvalidOutputLength,

    /// The requested output range does not fit in the keystream position space.
    #[error("invalid seek: offset {offset} + {len} bytes overflows the keystream")]
    InvalidSeek {
        /// The requested start offset.
        offset: u64,
        /// The requested output length.
        len: usize,
    },

    /// The requested output exceeds the single-call output ceiling.
    #[error("output too large: {requested} bytes (max {max})")]
    OutputTooLarge {
        /// The requested output length.
        requested: usize,
        /// The configured maximum.
        max: usize,
    },

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },

    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// An I/O error occurred while reading input data.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
