//! xofhash
//!
//! Streaming BLAKE3 hashing with extendable output.
//!
//! `xofhash` wraps a BLAKE3 state in a [`HasherSession`] that:
//!
//! - is initialized exactly once in standard, keyed or derive-key mode
//! - absorbs input incrementally, from slices, `Read`ers or async readers
//! - produces output of any length at any offset of the keystream, without
//!   touching the absorbed state
//! - writes output into pooled buffers instead of allocating per call
//!
//! The crate intentionally:
//! - does NOT implement BLAKE3 itself (the `blake3` crate does)
//! - does NOT share mutable state between threads
//!
//! # Sessions
//!
//! ```
//! use xofhash::{HasherSession, HexCase};
//!
//! let mut session = HasherSession::standard();
//! session.update(b"Hello, ")?;
//! session.update(b"World!")?;
//!
//! let digest = session.finalize(None)?;
//! let more = session.finalize_at_offset(32, 64)?;
//! println!("{} then {}", digest, more);
//!
//! let hex = session.finalize_hex(Some(16), HexCase::Upper)?;
//! assert_eq!(hex.len(), 32);
//! # Ok::<(), xofhash::HashError>(())
//! ```
//!
//! # One-shot
//!
//! ```
//! let hex = xofhash::hex_digest(b"", None)?;
//! assert_eq!(hex, "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262");
//!
//! let subkey = xofhash::derive_key("example.com 2024 session keys", b"secret", Some(64))?;
//! assert_eq!(subkey.len(), 64);
//! # Ok::<(), xofhash::HashError>(())
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use xofhash::{HasherSession, update_async};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), xofhash::HashError> {
//!     let mut session = HasherSession::standard();
//!     update_async(&mut session, reader).await?;
//!     println!("{}", session.finalize(None)?);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod hash;
mod oneshot;
mod output;
mod session;

mod buffer; // output pool + thread-local read buffers

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface
//

pub use buffer::{OutputBuf, OutputPool};
pub use config::{DEFAULT_MAX_OUTPUT_LEN, DEFAULT_SMALL_BUFFER_LEN, KEY_LEN, OUT_LEN, OutputConfig};
pub use error::HashError;
pub use hash::{BLAKE3_MIN_VERSION, Blake3Primitive, XofPrimitive};
pub use oneshot::{
    derive_key, digest, hex_digest, hex_digest_upper, keyed_digest, release_thread_state, version,
};
pub use output::{Digest, HexCase, decode_hex, encode_hex};
pub use session::{HasherSession, Mode, OutputReader};

#[cfg(feature = "async-io")]
pub use async_stream::{UpdateAsync, update_async};
