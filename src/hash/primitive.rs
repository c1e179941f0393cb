//! The boundary between sessions and the hash algorithm.

use crate::config::KEY_LEN;

/// An extendable-output hash function with BLAKE3's three modes.
///
/// Sessions treat the implementation as an opaque state: they choose the
/// mode once, feed input, and read keystream bytes at arbitrary offsets.
/// Reading output must not change the state.
pub trait XofPrimitive: Clone {
    /// Creates a state for standard hashing.
    fn new_standard() -> Self;

    /// Creates a state for keyed hashing.
    fn new_keyed(key: &[u8; KEY_LEN]) -> Self;

    /// Creates a state for key derivation under `context`.
    fn new_derive_key(context: &str) -> Self;

    /// Absorbs `input`.
    fn update(&mut self, input: &[u8]);

    /// Writes `out.len()` keystream bytes starting at byte `offset`.
    fn fill_at(&self, offset: u64, out: &mut [u8]);

    /// Writes the first `out.len()` keystream bytes.
    fn finalize(&self, out: &mut [u8]) {
        self.fill_at(0, out);
    }

    /// Discards absorbed input, keeping the mode and key material.
    fn reset(&mut self);

    /// Returns the version string of the implementation.
    ///
    /// Backends wrapping another crate may report the oldest release they
    /// support rather than the one resolved at build time.
    fn version() -> &'static str;
}
