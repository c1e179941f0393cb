//! Async input support for hasher sessions.
//!
//! This module feeds a `futures-io::AsyncRead` into a session, making it
//! runtime-agnostic and compatible with tokio, async-std, smol, and other
//! async runtimes.
//!
//! - [`update_async`] - Absorbs an async reader into a session until EOF
//!
//! This module requires the `async-io` feature to be enabled.

mod update;

pub use update::{UpdateAsync, update_async};
