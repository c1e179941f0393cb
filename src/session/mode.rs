//! Session initialization modes.

use std::fmt;

use crate::config::KEY_LEN;

/// The hashing mode a session was initialized with.
///
/// Key material lives in its variant, so a keyed session always has a key
/// and a standard session never does.
#[derive(Clone)]
pub enum Mode {
    /// Plain hashing.
    Standard,
    /// Keyed hashing (MAC-like) with a 32-byte key.
    Keyed {
        /// The secret key.
        key: [u8; KEY_LEN],
    },
    /// Key derivation under a domain-separating context string.
    DeriveKey {
        /// The context string, never empty.
        context: String,
    },
}

impl Mode {
    /// Returns a short name for the mode, safe to log.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Standard => "standard",
            Mode::Keyed { .. } => "keyed",
            Mode::DeriveKey { .. } => "derive_key",
        }
    }
}

impl PartialEq for Mode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Mode::Standard, Mode::Standard) => true,
            // blake3::Hash compares in constant time
            (Mode::Keyed { key: a }, Mode::Keyed { key: b }) => {
                blake3::Hash::from(*a) == blake3::Hash::from(*b)
            }
            (Mode::DeriveKey { context: a }, Mode::DeriveKey { context: b }) => a == b,
            _ => false,
        }
    }
}

impl Eq for Mode {}

impl fmt::Debug for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Standard => f.write_str("Standard"),
            Mode::Keyed { .. } => f.debug_struct("Keyed").finish_non_exhaustive(),
            Mode::DeriveKey { context } => f
                .debug_struct("DeriveKey")
                .field("context", context)
                .finish(),
        }
    }
}
