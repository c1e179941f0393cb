//! Output buffer pool for finalize calls.
//!
//! An [`OutputPool`] owns one small scratch buffer and at most one cached
//! large buffer. Small requests never allocate after the first one; a large
//! request reuses the cached buffer if it is big enough and otherwise
//! replaces it with a buffer of exactly the requested size. The large slot is
//! replaced, never grown, so one huge request does not stick around as a
//! growing high-water mark.
//!
//! Pools are either owned by the caller or taken from the current thread via
//! [`OutputPool::with_thread_local`]. Nothing here is shared across threads.

use std::cell::Cell;

use tracing::debug;

use crate::config::OutputConfig;
use crate::error::HashError;
use crate::output::{Digest, HexCase, codec};

#[derive(Debug)]
struct LargeSlot {
    capacity: usize,
    data: Vec<u8>,
}

impl LargeSlot {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            data: Vec::with_capacity(capacity),
        }
    }
}

/// A reusable set of output buffers.
///
/// # Example
///
/// ```
/// use xofhash::{HasherSession, OutputConfig, OutputPool};
///
/// let mut pool = OutputPool::new(&OutputConfig::default());
/// let mut session = HasherSession::standard();
/// session.update(b"abc")?;
///
/// let first = session.finalize_in(&mut pool, 0, 32, |out| out.to_vec())?;
/// let again = session.finalize_in(&mut pool, 0, 32, |out| out.to_vec())?;
/// assert_eq!(first, again);
/// # Ok::<(), xofhash::HashError>(())
/// ```
#[derive(Debug)]
pub struct OutputPool {
    small_threshold: usize,
    max_output_len: usize,
    small: Vec<u8>,
    large: Option<LargeSlot>,
}

impl OutputPool {
    /// Creates an empty pool sized by `config`.
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            small_threshold: config.small_threshold(),
            max_output_len: config.max_output_len(),
            small: Vec::new(),
            large: None,
        }
    }

    /// Hands back a buffer whose writable region is exactly `size` bytes.
    ///
    /// The region's previous contents are unspecified; the caller must
    /// overwrite all of it before reading.
    ///
    /// # Errors
    ///
    /// - [`HashError::InvalidOutputLength`] if `size` is zero
    /// - [`HashError::OutputTooLarge`] if `size` exceeds the pool's maximum
    pub fn acquire(&mut self, size: usize) -> Result<OutputBuf<'_>, HashError> {
        if size == 0 {
            return Err(HashError::InvalidOutputLength);
        }
        if size > self.max_output_len {
            return Err(HashError::OutputTooLarge {
                requested: size,
                max: self.max_output_len,
            });
        }

        let data = if size <= self.small_threshold {
            if self.small.capacity() < self.small_threshold {
                self.small.clear();
                self.small.reserve_exact(self.small_threshold);
            }
            &mut self.small
        } else {
            let fits = matches!(&self.large, Some(slot) if slot.capacity >= size);
            if !fits {
                debug!(
                    previous = self.large_capacity(),
                    requested = size,
                    "replacing cached large output buffer"
                );
                self.large = Some(LargeSlot::new(size));
            }
            &mut self.large.get_or_insert_with(|| LargeSlot::new(size)).data
        };

        // Only bytes beyond the previous length are zeroed
        if data.len() > size {
            data.truncate(size);
        } else {
            data.resize(size, 0);
        }
        Ok(OutputBuf { data })
    }

    /// Returns the capacity the cached large buffer was sized for, or zero.
    pub fn large_capacity(&self) -> usize {
        self.large.as_ref().map_or(0, |slot| slot.capacity)
    }

    /// Returns the small-buffer threshold.
    pub fn small_threshold(&self) -> usize {
        self.small_threshold
    }

    /// Returns the largest size [`OutputPool::acquire`] accepts.
    pub fn max_output_len(&self) -> usize {
        self.max_output_len
    }

    /// Releases the cached large buffer.
    pub fn shrink(&mut self) {
        self.large = None;
    }

    /// Adopts the limits of `config`, dropping a cached large buffer that no
    /// longer fits them.
    fn set_limits(&mut self, config: &OutputConfig) {
        if self.small_threshold == config.small_threshold()
            && self.max_output_len == config.max_output_len()
        {
            return;
        }
        self.small_threshold = config.small_threshold();
        self.max_output_len = config.max_output_len();

        let capacity = self.large_capacity();
        if capacity > self.max_output_len || capacity <= self.small_threshold {
            self.large = None;
        }
    }

    /// Runs `f` with the current thread's pool, configured for `config`.
    ///
    /// The pool is taken out of its thread slot for the duration of `f`, so a
    /// nested call (for instance from inside an output callback) gets a
    /// temporary pool instead of aliasing the outer one.
    pub fn with_thread_local<R>(config: &OutputConfig, f: impl FnOnce(&mut OutputPool) -> R) -> R {
        let mut pool = THREAD_OUTPUT_POOL
            .try_with(Cell::take)
            .ok()
            .flatten()
            .unwrap_or_else(|| {
                debug!("creating thread output pool");
                OutputPool::new(config)
            });
        pool.set_limits(config);

        let result = f(&mut pool);
        let _ = THREAD_OUTPUT_POOL.try_with(|slot| slot.set(Some(pool)));
        result
    }

    /// Drops the current thread's pool and its buffers.
    pub(crate) fn release_thread_local() {
        let _ = THREAD_OUTPUT_POOL.try_with(Cell::take);
    }
}

thread_local! {
    static THREAD_OUTPUT_POOL: Cell<Option<OutputPool>> = const { Cell::new(None) };
}

/// A buffer acquired from an [`OutputPool`].
///
/// Its region is exactly the acquired size. Write it fully, then render it.
#[derive(Debug)]
pub struct OutputBuf<'a> {
    data: &'a mut Vec<u8>,
}

impl OutputBuf<'_> {
    /// Returns the writable region.
    pub fn region_mut(&mut self) -> &mut [u8] {
        self.data.as_mut_slice()
    }

    /// Returns the committed region.
    pub fn as_slice(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Returns the region length.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the region is empty. Never true for an acquired buffer.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copies the region into an owned [`Digest`].
    pub fn to_digest(&self) -> Digest {
        Digest::copy_from_slice(self.as_slice())
    }

    /// Renders the region as hex.
    pub fn to_hex(&self, case: HexCase) -> String {
        codec::encode(self.as_slice(), case)
    }
}
