//! Seekable cursor over a session's output keystream.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

use super::engine::{check_range, emit};
use crate::buffer::OutputPool;
use crate::config::OutputConfig;
use crate::error::HashError;
use crate::hash::{Blake3Primitive, XofPrimitive};
use crate::output::Digest;

/// A cursor over the output keystream of a finalized snapshot.
///
/// Created by [`HasherSession::output_reader`](crate::HasherSession::output_reader).
/// Implements [`Read`] and [`Seek`], so arbitrarily long outputs can be
/// streamed with `std::io::copy` without materializing them.
///
/// # Example
///
/// ```
/// use std::io::{Read, Seek, SeekFrom};
/// use xofhash::HasherSession;
///
/// let mut session = HasherSession::standard();
/// session.update(b"stream me")?;
///
/// let mut reader = session.output_reader(0)?;
/// let mut head = [0u8; 16];
/// reader.read_exact(&mut head)?;
/// assert_eq!(reader.position(), 16);
///
/// reader.seek(SeekFrom::Start(0))?;
/// assert_eq!(reader.read_block(16)?.as_bytes(), &head);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct OutputReader<P = Blake3Primitive> {
    state: P,
    config: OutputConfig,
    position: u64,
}

impl<P: XofPrimitive> OutputReader<P> {
    pub(super) fn new(state: P, config: OutputConfig, position: u64) -> Self {
        Self {
            state,
            config,
            position,
        }
    }

    /// Returns the current keystream position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Moves to an absolute keystream position.
    pub fn set_position(&mut self, position: u64) {
        self.position = position;
    }

    /// Reads `len` bytes through the thread output pool and advances.
    ///
    /// `len` is bounded by [`OutputConfig::max_output_len`].
    pub fn read_block(&mut self, len: usize) -> Result<Digest, HashError> {
        let position = self.position;
        let block = OutputPool::with_thread_local(&self.config, |pool| {
            emit(
                &self.state,
                &self.config,
                pool,
                position,
                len,
                Digest::copy_from_slice,
            )
        })?;
        self.position += len as u64;
        Ok(block)
    }

    /// Fills `out` from the current position and advances.
    pub fn fill(&mut self, out: &mut [u8]) -> Result<(), HashError> {
        check_range(self.position, out.len())?;
        if !out.is_empty() {
            self.state.fill_at(self.position, out);
        }
        self.position += out.len() as u64;
        Ok(())
    }
}

impl<P: XofPrimitive> Read for OutputReader<P> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = u64::MAX - self.position;
        let n = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
        self.fill(&mut buf[..n]).map_err(io::Error::other)?;
        Ok(n)
    }
}

impl<P: XofPrimitive> Seek for OutputReader<P> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let position = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
            SeekFrom::End(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "the output keystream has no end to seek from",
                ));
            }
        };
        let position = position.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek to a negative or overflowing position",
            )
        })?;
        self.position = position;
        Ok(position)
    }
}

impl<P> fmt::Debug for OutputReader<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputReader")
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}
