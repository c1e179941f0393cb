//! BLAKE3 primitive backed by the `blake3` crate.

use std::fmt;

use super::primitive::XofPrimitive;
use crate::config::KEY_LEN;

/// Oldest `blake3` crate release line this backend supports.
///
/// This is a floor, not the resolved version of the dependency.
pub const BLAKE3_MIN_VERSION: &str = "1.5";

/// BLAKE3 hash state.
#[derive(Clone)]
pub struct Blake3Primitive {
    state: blake3::Hasher,
}

impl fmt::Debug for Blake3Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blake3Primitive")
            .field("absorbed", &self.state.count())
            .finish_non_exhaustive()
    }
}

impl XofPrimitive for Blake3Primitive {
    fn new_standard() -> Self {
        Self {
            state: blake3::Hasher::new(),
        }
    }

    fn new_keyed(key: &[u8; KEY_LEN]) -> Self {
        Self {
            state: blake3::Hasher::new_keyed(key),
        }
    }

    fn new_derive_key(context: &str) -> Self {
        Self {
            state: blake3::Hasher::new_derive_key(context),
        }
    }

    fn update(&mut self, input: &[u8]) {
        self.state.update(input);
    }

    fn fill_at(&self, offset: u64, out: &mut [u8]) {
        let mut reader = self.state.finalize_xof();
        reader.set_position(offset);
        reader.fill(out);
    }

    fn finalize(&self, out: &mut [u8]) {
        self.state.finalize_xof().fill(out);
    }

    fn reset(&mut self) {
        self.state.reset();
    }

    fn version() -> &'static str {
        BLAKE3_MIN_VERSION
    }
}
