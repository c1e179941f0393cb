//! Hasher sessions.
//!
//! - [`HasherSession`] - Mode state machine with `update`/`finalize`/`reset`
//! - [`Mode`] - Standard, keyed or derive-key, with its key material
//! - [`OutputReader`] - Seekable `Read` cursor over the output keystream

mod engine;
mod mode;
mod reader;

pub use engine::HasherSession;
pub use mode::Mode;
pub use reader::OutputReader;
