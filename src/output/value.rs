//! Owned hash output.

use std::fmt;

use bytes::Bytes;

use super::codec::{self, HexCase};
use crate::error::HashError;

/// Hash output of any length.
///
/// A thin wrapper around [`Bytes`]; cloning is cheap.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest(Bytes);

impl Digest {
    /// Wraps existing bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Copies a slice into a new digest.
    pub fn copy_from_slice(slice: &[u8]) -> Self {
        Self(Bytes::copy_from_slice(slice))
    }

    /// Returns the digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consumes the digest, returning the underlying [`Bytes`].
    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    /// Returns the digest length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the digest has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copies the digest into a fixed-size array.
    ///
    /// Returns `None` if the length is not exactly `N`.
    pub fn to_array<const N: usize>(&self) -> Option<[u8; N]> {
        self.as_bytes().try_into().ok()
    }

    /// Returns the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        codec::encode(&self.0, HexCase::Lower)
    }

    /// Returns the digest as an uppercase hex string.
    pub fn to_hex_upper(&self) -> String {
        codec::encode(&self.0, HexCase::Upper)
    }

    /// Returns the digest as a hex string in the given case.
    pub fn to_hex_case(&self, case: HexCase) -> String {
        codec::encode(&self.0, case)
    }

    /// Parses a digest from a hex string of either case.
    pub fn from_hex(hex_str: &str) -> Result<Self, HashError> {
        codec::decode(hex_str).map(Self::new)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self::copy_from_slice(&bytes)
    }
}

impl PartialEq<[u8]> for Digest {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Digest {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_bytes() == other
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::UpperHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_upper())
    }
}
