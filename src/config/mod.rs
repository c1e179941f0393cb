//! Configuration for output production.
//!
//! - [`OutputConfig`] - Output length defaults and ceilings, pool sizing
//!
//! # Example
//!
//! ```
//! use xofhash::OutputConfig;
//!
//! // Raise the single-call ceiling to 1 MiB
//! let config = OutputConfig::new(4 * 1024, 1024 * 1024)?;
//!
//! // Builder pattern
//! let config = OutputConfig::default()
//!     .with_default_out_len(64)
//!     .with_max_output_len(64 * 1024);
//! assert!(config.validate().is_ok());
//! # Ok::<(), xofhash::HashError>(())
//! ```

use crate::error::HashError;

/// Length of the base digest in bytes.
pub const OUT_LEN: usize = 32;

/// Length of a keyed-mode key in bytes.
pub const KEY_LEN: usize = 32;

/// Default small-buffer threshold (4 KiB).
pub const DEFAULT_SMALL_BUFFER_LEN: usize = 4 * 1024;

/// Default maximum output length of a single finalize call (32 KiB).
///
/// This is a ceiling of this crate, not of BLAKE3. Longer outputs are
/// assembled from seeked calls or streamed through an
/// [`OutputReader`](crate::OutputReader).
pub const DEFAULT_MAX_OUTPUT_LEN: usize = 32 * 1024;

/// Configuration for output lengths and output buffer sizing.
///
/// - `small_threshold` - Requests up to this size use the pool's shared small buffer
/// - `max_output_len` - Largest output a single finalize call may produce
/// - `default_out_len` - Output length used when a caller passes `None`
///
/// Constraints: all non-zero, `small_threshold <= max_output_len`,
/// `default_out_len <= max_output_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputConfig {
    small_threshold: usize,
    max_output_len: usize,
    default_out_len: usize,
}

impl OutputConfig {
    /// Creates a new configuration.
    ///
    /// The default output length is [`OUT_LEN`], capped at `max_output_len`.
    ///
    /// Returns error if a size is zero or `small_threshold > max_output_len`.
    pub fn new(small_threshold: usize, max_output_len: usize) -> Result<Self, HashError> {
        Self::checked(small_threshold, max_output_len, OUT_LEN.min(max_output_len))
    }

    fn checked(
        small_threshold: usize,
        max_output_len: usize,
        default_out_len: usize,
    ) -> Result<Self, HashError> {
        if small_threshold == 0 || max_output_len == 0 || default_out_len == 0 {
            return Err(HashError::InvalidConfig {
                message: "output sizes must be non-zero",
            });
        }

        if small_threshold > max_output_len {
            return Err(HashError::InvalidConfig {
                message: "small_threshold cannot be greater than max_output_len",
            });
        }

        if default_out_len > max_output_len {
            return Err(HashError::InvalidConfig {
                message: "default_out_len cannot be greater than max_output_len",
            });
        }

        Ok(Self {
            small_threshold,
            max_output_len,
            default_out_len,
        })
    }

    /// Sets the small-buffer threshold.
    ///
    /// Does not validate. Use [`OutputConfig::validate`].
    pub fn with_small_threshold(mut self, size: usize) -> Self {
        self.small_threshold = size;
        self
    }

    /// Sets the single-call output ceiling.
    ///
    /// Does not validate. Use [`OutputConfig::validate`].
    pub fn with_max_output_len(mut self, size: usize) -> Self {
        self.max_output_len = size;
        self
    }

    /// Sets the output length used when finalize is called without one.
    ///
    /// Does not validate. Use [`OutputConfig::validate`].
    pub fn with_default_out_len(mut self, size: usize) -> Self {
        self.default_out_len = size;
        self
    }

    /// Returns the small-buffer threshold.
    pub fn small_threshold(&self) -> usize {
        self.small_threshold
    }

    /// Returns the single-call output ceiling.
    pub fn max_output_len(&self) -> usize {
        self.max_output_len
    }

    /// Returns the default output length.
    pub fn default_out_len(&self) -> usize {
        self.default_out_len
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), HashError> {
        Self::checked(
            self.small_threshold,
            self.max_output_len,
            self.default_out_len,
        )
        .map(|_| ())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            small_threshold: DEFAULT_SMALL_BUFFER_LEN,
            max_output_len: DEFAULT_MAX_OUTPUT_LEN,
            default_out_len: OUT_LEN,
        }
    }
}
