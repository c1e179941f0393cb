//! Hash primitives.
//!
//! - [`XofPrimitive`] - The operations a session needs from a hash algorithm
//! - [`Blake3Primitive`] - BLAKE3 implementation over the `blake3` crate

mod blake3;
mod primitive;

pub use self::blake3::{BLAKE3_MIN_VERSION, Blake3Primitive};
pub use primitive::XofPrimitive;
