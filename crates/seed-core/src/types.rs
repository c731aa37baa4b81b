//! Core value types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::HashParseError;

/// A 256-bit block identifier.
///
/// Bytes are kept in display order: the first byte is the leftmost pair of
/// hex digits in the familiar `0x0000001c...` notation, so leading-zero
/// proof-of-work hashes read the same in logs and in the checkpoint tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// The zero hash (32 zero bytes).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Return the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Parse a 64-digit hex string, with or without a `0x` prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use seed_core::types::Hash256;
    /// let h = Hash256::from_hex(&format!("0x{}ff", "00".repeat(31))).unwrap();
    /// assert_eq!(h.as_bytes()[31], 0xff);
    /// ```
    pub fn from_hex(s: &str) -> Result<Self, HashParseError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits).map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| HashParseError::InvalidLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// The same bytes in the opposite order.
    ///
    /// Converts between wire order, as produced by [`Hash256::digest`], and
    /// the display order used for constants.
    pub fn reversed(&self) -> Self {
        let mut bytes = self.0;
        bytes.reverse();
        Self(bytes)
    }

    /// Double SHA-256 of arbitrary data, in wire byte order.
    pub fn digest(data: &[u8]) -> Self {
        let first = Sha256::digest(data);
        Self(Sha256::digest(first).into())
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Hash256 {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS_HEX: &str = "0x0000001ce91d2acda7b3d67fb5f0df3650ecff20faa107f349f25bd4e07d7add";

    #[test]
    fn parse_with_and_without_prefix() {
        let a = Hash256::from_hex(GENESIS_HEX).unwrap();
        let b: Hash256 = GENESIS_HEX.trim_start_matches("0x").parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_bytes()[0..4], [0x00, 0x00, 0x00, 0x1c]);
    }

    #[test]
    fn display_is_lowercase_hex_without_prefix() {
        let h = Hash256::from_hex(GENESIS_HEX).unwrap();
        assert_eq!(format!("0x{h}"), GENESIS_HEX);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            Hash256::from_hex("0xzz"),
            Err(HashParseError::InvalidHex(_))
        ));
        assert_eq!(
            Hash256::from_hex("abcd"),
            Err(HashParseError::InvalidLength(2))
        );
    }

    #[test]
    fn zero_hash() {
        assert!(Hash256::ZERO.is_zero());
        assert!(!Hash256([1; 32]).is_zero());
        assert_eq!(Hash256::default(), Hash256::ZERO);
    }

    #[test]
    fn digest_is_deterministic_and_distinct() {
        assert_eq!(Hash256::digest(b"seed"), Hash256::digest(b"seed"));
        assert_ne!(Hash256::digest(b"seed"), Hash256::digest(b"seeds"));
    }

    #[test]
    fn reversed_flips_byte_order() {
        let h = Hash256::from_hex(GENESIS_HEX).unwrap();
        assert_eq!(h.reversed().as_bytes()[28..], [0x1c, 0x00, 0x00, 0x00]);
        assert_eq!(h.reversed().reversed(), h);
    }

    #[test]
    fn serde_uses_hex_string() {
        let h = Hash256([0xAB; 32]);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", "ab".repeat(32)));
        let back: Hash256 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, h);
    }
}
