// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Byte and Hex Input Handling
//!
//! Key material arrives either as raw bytes or as a hex string with an
//! optional `0x`/`0X` prefix (Ethereum format). [`Hex`] captures both forms
//! at the API boundary and is normalized to bytes exactly once, at
//! construction of the consuming type — never lazily at each use site.

use subtle::ConstantTimeEq;

use crate::error::Result;

/// A key input: raw bytes, or a hex string with an optional `0x` prefix.
///
/// # Example
///
/// ```
/// use fabstir_ecies::Hex;
///
/// let from_str = Hex::from("0x0102ff").into_bytes().unwrap();
/// let from_bytes = Hex::from(vec![0x01, 0x02, 0xff]).into_bytes().unwrap();
/// assert_eq!(from_str, from_bytes);
/// ```
#[derive(Debug, Clone)]
pub enum Hex {
    /// Hex-encoded string, `0x`-optional, case-insensitive prefix
    Str(String),
    /// Raw bytes, passed through untouched
    Bytes(Vec<u8>),
}

impl Hex {
    /// Normalize to raw bytes. Hex strings are decoded (prefix stripped);
    /// byte inputs pass through losslessly.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Hex::Str(s) => decode_hex(&s),
            Hex::Bytes(b) => Ok(b),
        }
    }
}

impl From<&str> for Hex {
    fn from(s: &str) -> Self {
        Hex::Str(s.to_string())
    }
}

impl From<String> for Hex {
    fn from(s: String) -> Self {
        Hex::Str(s)
    }
}

impl From<Vec<u8>> for Hex {
    fn from(b: Vec<u8>) -> Self {
        Hex::Bytes(b)
    }
}

impl From<&[u8]> for Hex {
    fn from(b: &[u8]) -> Self {
        Hex::Bytes(b.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for Hex {
    fn from(b: [u8; N]) -> Self {
        Hex::Bytes(b.to_vec())
    }
}

/// Strip a leading `0x` or `0X` prefix, if present.
pub fn remove_0x(hex: &str) -> &str {
    if hex.starts_with("0x") || hex.starts_with("0X") {
        &hex[2..]
    } else {
        hex
    }
}

/// Decode a `0x`-optional hex string into bytes.
pub fn decode_hex(hex: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(remove_0x(hex))?)
}

/// Constant-time byte equality.
///
/// Length is compared in variable time (lengths are public here: key format
/// sizes), the contents in constant time.
pub fn equal_bytes(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_remove_0x_variants() {
        assert_eq!(remove_0x("0xabcd"), "abcd");
        assert_eq!(remove_0x("0Xabcd"), "abcd");
        assert_eq!(remove_0x("abcd"), "abcd");
        assert_eq!(remove_0x(""), "");
    }

    #[test]
    fn test_decode_hex_with_and_without_prefix() {
        assert_eq!(decode_hex("0x0102").unwrap(), vec![1, 2]);
        assert_eq!(decode_hex("0102").unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_decode_hex_rejects_garbage() {
        let result = decode_hex("0xzz");
        assert!(matches!(result, Err(Error::InvalidKey { .. })));

        // odd length
        assert!(decode_hex("abc").is_err());
    }

    #[test]
    fn test_hex_enum_normalization() {
        let a = Hex::from("0x0a0b").into_bytes().unwrap();
        let b = Hex::from(vec![0x0a, 0x0b]).into_bytes().unwrap();
        let c = Hex::from([0x0a, 0x0b]).into_bytes().unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_equal_bytes() {
        assert!(equal_bytes(b"same", b"same"));
        assert!(!equal_bytes(b"same", b"diff"));
        assert!(!equal_bytes(b"short", b"longer-input"));
        assert!(equal_bytes(b"", b""));
    }
}
