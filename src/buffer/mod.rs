//! Internal buffer management.
//!
//! - [`OutputPool`] - Reusable output buffers for finalize calls
//! - `ReadBuffer` - Thread-local scratch buffers for reader-driven updates

mod output;
mod read;

pub use output::{OutputBuf, OutputPool};
pub(crate) use read::ReadBuffer;
