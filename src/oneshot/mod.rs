//! One-shot hashing helpers.
//!
//! [`digest`] and [`hex_digest`] reuse a standard-mode session that belongs
//! to the calling thread. It is created on first use, reset before every
//! call, and dropped when the thread exits or [`release_thread_state`] runs.
//! Threads never share it, so the helpers are safe to call from anywhere.

use std::cell::Cell;

use tracing::debug;

use crate::buffer::OutputPool;
use crate::error::HashError;
use crate::hash::{Blake3Primitive, XofPrimitive};
use crate::output::{Digest, HexCase};
use crate::session::HasherSession;

thread_local! {
    static DEFAULT_SESSION: Cell<Option<HasherSession>> = const { Cell::new(None) };
}

/// Runs `f` with the thread's default session, freshly reset.
///
/// A nested call made from inside `f` gets a temporary session.
fn with_default_session<R>(f: impl FnOnce(&mut HasherSession) -> R) -> R {
    let mut session = DEFAULT_SESSION
        .try_with(Cell::take)
        .ok()
        .flatten()
        .unwrap_or_else(|| {
            debug!("creating default session");
            HasherSession::standard()
        });
    session.reset();

    let result = f(&mut session);
    let _ = DEFAULT_SESSION.try_with(|slot| slot.set(Some(session)));
    result
}

/// Hashes `input` in standard mode.
///
/// `out_len` defaults to 32 bytes.
///
/// ```
/// let digest = xofhash::digest(b"", None)?;
/// assert_eq!(
///     digest.to_hex(),
///     "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
/// );
/// # Ok::<(), xofhash::HashError>(())
/// ```
pub fn digest(input: &[u8], out_len: Option<usize>) -> Result<Digest, HashError> {
    with_default_session(|session| {
        session.update(input)?;
        session.finalize(out_len)
    })
}

/// Hashes `input` in standard mode and returns lowercase hex.
pub fn hex_digest(input: &[u8], out_len: Option<usize>) -> Result<String, HashError> {
    with_default_session(|session| {
        session.update(input)?;
        session.finalize_hex(out_len, HexCase::Lower)
    })
}

/// Hashes `input` in standard mode and returns uppercase hex.
pub fn hex_digest_upper(input: &[u8], out_len: Option<usize>) -> Result<String, HashError> {
    with_default_session(|session| {
        session.update(input)?;
        session.finalize_hex(out_len, HexCase::Upper)
    })
}

/// Hashes `input` in keyed mode.
pub fn keyed_digest(key: &[u8], input: &[u8], out_len: Option<usize>) -> Result<Digest, HashError> {
    let mut session = HasherSession::keyed(key)?;
    session.update(input)?;
    session.finalize(out_len)
}

/// Derives `out_len` bytes (default 32) of key material under `context`.
pub fn derive_key(
    context: &str,
    material: &[u8],
    out_len: Option<usize>,
) -> Result<Digest, HashError> {
    let mut session = HasherSession::derive_key(context)?;
    session.update(material)?;
    session.finalize(out_len)
}

/// Drops the calling thread's default session and output pool.
///
/// Both are recreated on next use.
pub fn release_thread_state() {
    let _ = DEFAULT_SESSION.try_with(Cell::take);
    OutputPool::release_thread_local();
}

/// Returns the oldest `blake3` release line the BLAKE3 backend supports.
pub fn version() -> &'static str {
    Blake3Primitive::version()
}
