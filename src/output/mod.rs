//! Output types.
//!
//! - [`Digest`] - Owned hash output of any length
//! - [`HexCase`] - Hex letter case, with the [`encode_hex`]/[`decode_hex`] codec

pub(crate) mod codec;
mod value;

pub use codec::HexCase;
pub use codec::{decode as decode_hex, encode as encode_hex};
pub use value::Digest;
