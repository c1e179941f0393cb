//! Hex codec for digest output.

use crate::error::HashError;

/// Letter case of hex output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HexCase {
    /// `[0-9a-f]`
    #[default]
    Lower,
    /// `[0-9A-F]`
    Upper,
}

/// Encodes `bytes` as hex, two characters per byte, no prefix or separators.
pub fn encode(bytes: &[u8], case: HexCase) -> String {
    match case {
        HexCase::Lower => hex::encode(bytes),
        HexCase::Upper => hex::encode_upper(bytes),
    }
}

/// Decodes a hex string of either case.
pub fn decode(hex_str: &str) -> Result<Vec<u8>, HashError> {
    Ok(hex::decode(hex_str)?)
}
