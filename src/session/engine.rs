//! Hasher session - mode state machine and output production.
//!
//! A [`HasherSession`] owns one primitive state. It is initialized exactly
//! once, absorbs input through `update`, and produces output at any offset of
//! the keystream without changing the absorbed state.
//!
//! # Example
//!
//! ```
//! use xofhash::HasherSession;
//!
//! let mut session = HasherSession::new();
//! session.init_keyed(&[7u8; 32])?;
//! session.update(b"Hello, ")?.update(b"World!")?;
//!
//! let tag = session.finalize(None)?;
//! let tail = session.finalize_at_offset(32, 32)?;
//! assert_eq!(&session.finalize(Some(64))?.as_bytes()[32..], tail.as_bytes());
//! # Ok::<(), xofhash::HashError>(())
//! ```

use std::fmt;
use std::io::{self, Read, Write};

use tracing::trace;

use super::mode::Mode;
use super::reader::OutputReader;
use crate::buffer::{OutputPool, ReadBuffer};
use crate::config::{KEY_LEN, OutputConfig};
use crate::error::HashError;
use crate::hash::{Blake3Primitive, XofPrimitive};
use crate::output::{Digest, HexCase, codec};

#[derive(Clone)]
struct Active<P> {
    mode: Mode,
    state: P,
}

/// A streaming hasher with a fixed mode.
///
/// # State machine
///
/// - A new session is uninitialized: `update` and finalize fail with
///   [`HashError::NotInitialized`]
/// - `init_*` selects the mode once. Repeating the same keyed or derive-key
///   initialization is a no-op; anything else fails with
///   [`HashError::AlreadyInitialized`]
/// - `reset` discards absorbed input and keeps the mode
///
/// Rejected calls leave the session as it was.
///
/// # Output
///
/// Finalize calls never change the absorbed state, so they can be repeated
/// and mixed with further `update` calls. Each call produces at most
/// [`OutputConfig::max_output_len`] bytes; longer outputs come from seeked
/// calls or an [`OutputReader`].
///
/// # Threads
///
/// Mutation needs `&mut self`; share a session across threads behind a lock
/// or give each thread its own.
#[derive(Clone)]
pub struct HasherSession<P = Blake3Primitive> {
    active: Option<Active<P>>,
    config: OutputConfig,
}

impl HasherSession {
    /// Creates an uninitialized BLAKE3 session with the default config.
    pub fn new() -> Self {
        Self {
            active: None,
            config: OutputConfig::default(),
        }
    }

    /// Creates an uninitialized BLAKE3 session with `config`.
    pub fn with_config(config: OutputConfig) -> Result<Self, HashError> {
        Self::for_primitive(config)
    }

    /// Creates a BLAKE3 session in standard mode.
    pub fn standard() -> Self {
        let mut session = Self::new();
        session.activate(Mode::Standard);
        session
    }

    /// Creates a BLAKE3 session in keyed mode.
    pub fn keyed(key: &[u8]) -> Result<Self, HashError> {
        let mut session = Self::new();
        session.init_keyed(key)?;
        Ok(session)
    }

    /// Creates a BLAKE3 session in derive-key mode.
    pub fn derive_key(context: &str) -> Result<Self, HashError> {
        let mut session = Self::new();
        session.init_derive_key(context)?;
        Ok(session)
    }
}

impl Default for HasherSession {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: XofPrimitive> HasherSession<P> {
    /// Creates an uninitialized session over any primitive.
    ///
    /// Returns error if `config` does not validate.
    pub fn for_primitive(config: OutputConfig) -> Result<Self, HashError> {
        config.validate()?;
        Ok(Self {
            active: None,
            config,
        })
    }

    fn activate(&mut self, mode: Mode) {
        let state = match &mode {
            Mode::Standard => P::new_standard(),
            Mode::Keyed { key } => P::new_keyed(key),
            Mode::DeriveKey { context } => P::new_derive_key(context),
        };
        trace!(mode = mode.name(), "session initialized");
        self.active = Some(Active { mode, state });
    }

    fn reconcile(&mut self, mode: Mode) -> Result<(), HashError> {
        match &self.active {
            None => {
                self.activate(mode);
                Ok(())
            }
            Some(active) if active.mode == mode => Ok(()),
            Some(_) => Err(HashError::AlreadyInitialized),
        }
    }

    /// Selects standard mode.
    ///
    /// Fails with [`HashError::AlreadyInitialized`] if any mode is already set.
    pub fn init_standard(&mut self) -> Result<(), HashError> {
        if self.active.is_some() {
            return Err(HashError::AlreadyInitialized);
        }
        self.activate(Mode::Standard);
        Ok(())
    }

    /// Selects keyed mode with a 32-byte key.
    ///
    /// # Errors
    ///
    /// - [`HashError::InvalidKeyLength`] if `key` is not 32 bytes
    /// - [`HashError::AlreadyInitialized`] if the session is initialized with
    ///   another mode or key
    pub fn init_keyed(&mut self, key: &[u8]) -> Result<(), HashError> {
        let key: [u8; KEY_LEN] = key
            .try_into()
            .map_err(|_| HashError::InvalidKeyLength { actual: key.len() })?;
        self.reconcile(Mode::Keyed { key })
    }

    /// Selects derive-key mode under `context`.
    ///
    /// # Errors
    ///
    /// - [`HashError::EmptyContext`] if `context` is empty
    /// - [`HashError::AlreadyInitialized`] if the session is initialized with
    ///   another mode or context
    pub fn init_derive_key(&mut self, context: &str) -> Result<(), HashError> {
        if context.is_empty() {
            return Err(HashError::EmptyContext);
        }
        self.reconcile(Mode::DeriveKey {
            context: context.to_owned(),
        })
    }

    /// Returns the mode, or `None` before initialization.
    pub fn mode(&self) -> Option<&Mode> {
        self.active.as_ref().map(|active| &active.mode)
    }

    /// Returns true once a mode has been selected.
    pub fn is_initialized(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the output configuration.
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    fn state(&self) -> Result<&P, HashError> {
        self.active
            .as_ref()
            .map(|active| &active.state)
            .ok_or(HashError::NotInitialized)
    }

    /// Absorbs `input`. Empty input is a no-op.
    ///
    /// Calls chain: `session.update(a)?.update(b)?` equals
    /// `session.update(&[a, b].concat())?`.
    pub fn update(&mut self, input: &[u8]) -> Result<&mut Self, HashError> {
        let active = self.active.as_mut().ok_or(HashError::NotInitialized)?;
        if !input.is_empty() {
            active.state.update(input);
        }
        Ok(self)
    }

    /// Absorbs everything `reader` yields until EOF, returning the byte count.
    ///
    /// On an I/O error the session is restored to its state before the call.
    pub fn update_reader<R: Read>(&mut self, mut reader: R) -> Result<u64, HashError> {
        let active = self.active.as_mut().ok_or(HashError::NotInitialized)?;
        let saved = active.state.clone();
        let mut buffer = ReadBuffer::take();
        let buf = buffer.as_mut_slice();
        let mut consumed = 0u64;

        loop {
            let n = match reader.read(buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    active.state = saved;
                    return Err(e.into());
                }
            };
            active.state.update(&buf[..n]);
            consumed += n as u64;
        }

        Ok(consumed)
    }

    /// Returns `out_len` bytes of output, default [`OutputConfig::default_out_len`].
    ///
    /// # Errors
    ///
    /// - [`HashError::NotInitialized`] before initialization
    /// - [`HashError::InvalidOutputLength`] if `out_len` is zero
    /// - [`HashError::OutputTooLarge`] if `out_len` exceeds the maximum
    pub fn finalize(&self, out_len: Option<usize>) -> Result<Digest, HashError> {
        self.finalize_at_offset(0, out_len.unwrap_or(self.config.default_out_len()))
    }

    /// Returns `out_len` bytes of the keystream starting at byte `seek`.
    ///
    /// Equal to `finalize(Some(seek + out_len))[seek..]` for any output that
    /// fits in one call.
    ///
    /// # Errors
    ///
    /// As [`HasherSession::finalize`], plus [`HashError::InvalidSeek`] if
    /// `seek + out_len` overflows `u64`.
    pub fn finalize_at_offset(&self, seek: u64, out_len: usize) -> Result<Digest, HashError> {
        self.finalize_with(seek, out_len, Digest::copy_from_slice)
    }

    /// Returns the output as hex.
    pub fn finalize_hex(&self, out_len: Option<usize>, case: HexCase) -> Result<String, HashError> {
        let out_len = out_len.unwrap_or(self.config.default_out_len());
        self.finalize_hex_at_offset(0, out_len, case)
    }

    /// Returns a seeked output range as hex.
    pub fn finalize_hex_at_offset(
        &self,
        seek: u64,
        out_len: usize,
        case: HexCase,
    ) -> Result<String, HashError> {
        self.finalize_with(seek, out_len, |out| codec::encode(out, case))
    }

    /// Passes a borrowed view of the output to `f` and returns its result.
    ///
    /// The view points into the current thread's output pool and lives only
    /// for the call, so no copy is made.
    ///
    /// ```
    /// use xofhash::HasherSession;
    ///
    /// let mut session = HasherSession::standard();
    /// session.update(b"abc")?;
    /// let zeros = session.finalize_with(0, 1024, |out| out.iter().filter(|b| **b == 0).count())?;
    /// assert!(zeros < 1024);
    /// # Ok::<(), xofhash::HashError>(())
    /// ```
    pub fn finalize_with<R>(
        &self,
        seek: u64,
        out_len: usize,
        f: impl FnOnce(&[u8]) -> R,
    ) -> Result<R, HashError> {
        let state = self.state()?;
        OutputPool::with_thread_local(&self.config, |pool| {
            emit(state, &self.config, pool, seek, out_len, f)
        })
    }

    /// Like [`HasherSession::finalize_with`], using a caller-owned pool.
    ///
    /// The pool's own maximum applies in addition to the session's.
    pub fn finalize_in<R>(
        &self,
        pool: &mut OutputPool,
        seek: u64,
        out_len: usize,
        f: impl FnOnce(&[u8]) -> R,
    ) -> Result<R, HashError> {
        emit(self.state()?, &self.config, pool, seek, out_len, f)
    }

    /// Writes `out.len()` keystream bytes starting at `seek` into `out`.
    ///
    /// The caller supplies the memory, so the single-call maximum does not
    /// apply. An empty `out` is a no-op.
    pub fn fill_at_offset(&self, seek: u64, out: &mut [u8]) -> Result<(), HashError> {
        let state = self.state()?;
        check_range(seek, out.len())?;
        if !out.is_empty() {
            state.fill_at(seek, out);
        }
        Ok(())
    }

    /// Returns a cursor over the keystream positioned at `seek`.
    ///
    /// The reader holds a snapshot; later updates to the session do not
    /// affect it.
    pub fn output_reader(&self, seek: u64) -> Result<OutputReader<P>, HashError> {
        Ok(OutputReader::new(self.state()?.clone(), self.config, seek))
    }

    /// Discards absorbed input, keeping the mode and key material.
    ///
    /// A no-op on an uninitialized session.
    pub fn reset(&mut self) {
        if let Some(active) = self.active.as_mut() {
            active.state.reset();
            trace!(mode = active.mode.name(), "session reset");
        }
    }
}

impl<P: XofPrimitive> Write for HasherSession<P> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<P> fmt::Debug for HasherSession<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HasherSession")
            .field("mode", &self.active.as_ref().map(|active| &active.mode))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Validates an output request, fills a pool buffer and hands it to `f`.
///
/// Nothing touches the primitive until every check has passed.
pub(super) fn emit<P: XofPrimitive, R>(
    state: &P,
    config: &OutputConfig,
    pool: &mut OutputPool,
    seek: u64,
    out_len: usize,
    f: impl FnOnce(&[u8]) -> R,
) -> Result<R, HashError> {
    if out_len == 0 {
        return Err(HashError::InvalidOutputLength);
    }
    if out_len > config.max_output_len() {
        return Err(HashError::OutputTooLarge {
            requested: out_len,
            max: config.max_output_len(),
        });
    }
    check_range(seek, out_len)?;

    let mut buf = pool.acquire(out_len)?;
    state.fill_at(seek, buf.region_mut());
    Ok(f(buf.as_slice()))
}

/// Rejects ranges whose end does not fit in a `u64` keystream position.
pub(super) fn check_range(seek: u64, len: usize) -> Result<(), HashError> {
    u64::try_from(len)
        .ok()
        .and_then(|len| seek.checked_add(len))
        .map(|_| ())
        .ok_or(HashError::InvalidSeek { offset: seek, len })
}
