// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Public Key
//!
//! A validated secp256k1 curve point. Stored canonically; converted on
//! demand between the SEC1 compressed (33-byte) and uncompressed (65-byte)
//! encodings. Conversions are lossless and deterministic: a point built from
//! either encoding normalizes to the same canonical value.
//!
//! `from_bytes` additionally accepts a bare 64-byte x || y coordinate pair
//! (Ethereum style, no SEC1 prefix), which is reconstructed by prepending
//! `0x04` before validation.

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint};

use crate::bytes::decode_hex;
use crate::config::consts::RAW_PUBLIC_KEY_SIZE;
use crate::ecdh::SharedSecret;
use crate::error::{Error, Result};
use crate::keys::PrivateKey;

/// A validated secp256k1 public key
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    point: k256::PublicKey,
}

impl PublicKey {
    /// Parse a public key from bytes.
    ///
    /// Accepts three encodings:
    /// - 33 bytes: SEC1 compressed (`0x02`/`0x03` prefix)
    /// - 65 bytes: SEC1 uncompressed (`0x04` prefix)
    /// - 64 bytes: bare x || y, auto-prefixed with `0x04`
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`] for any other length, an unknown prefix, or
    /// coordinates that are not a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey> {
        // Bare 64-byte coordinate pairs are reconstructed, not rejected,
        // for compatibility with Ethereum-style key material.
        let fixed;
        let sec1: &[u8] = if bytes.len() == RAW_PUBLIC_KEY_SIZE {
            let mut v = Vec::with_capacity(1 + RAW_PUBLIC_KEY_SIZE);
            v.push(0x04);
            v.extend_from_slice(bytes);
            fixed = v;
            &fixed
        } else {
            bytes
        };

        let encoded = EncodedPoint::from_bytes(sec1).map_err(|e| Error::InvalidKey {
            key_type: "public_key",
            reason: format!("not a valid SEC1 encoding: {}", e),
        })?;

        let point = Option::<k256::PublicKey>::from(k256::PublicKey::from_encoded_point(&encoded))
            .ok_or_else(|| Error::InvalidKey {
                key_type: "public_key",
                reason: "coordinates are not a point on the curve".to_string(),
            })?;

        Ok(PublicKey { point })
    }

    /// Parse a public key from a `0x`-optional hex string.
    pub fn from_hex(hex: &str) -> Result<PublicKey> {
        Self::from_bytes(&decode_hex(hex)?)
    }

    pub(crate) fn from_point(point: k256::PublicKey) -> PublicKey {
        PublicKey { point }
    }

    /// SEC1 compressed encoding (33 bytes).
    pub fn compressed(&self) -> Vec<u8> {
        self.to_bytes(true)
    }

    /// SEC1 uncompressed encoding (65 bytes).
    pub fn uncompressed(&self) -> Vec<u8> {
        self.to_bytes(false)
    }

    /// Encode per the given compression mode (33 or 65 bytes).
    pub fn to_bytes(&self, compressed: bool) -> Vec<u8> {
        self.point.to_encoded_point(compressed).as_bytes().to_vec()
    }

    /// Hex encoding (no `0x` prefix) in the given compression mode.
    pub fn to_hex(&self, compressed: bool) -> String {
        hex::encode(self.to_bytes(compressed))
    }

    /// Derive the shared symmetric key on the receiving side.
    ///
    /// `self` is the SENDER's transmitted (ephemeral) public point; the
    /// sender-point input to the KDF is therefore this point itself, while
    /// the ECDH point is recomputed locally from the receiver's scalar.
    /// Yields the same key as the sender's [`PrivateKey::encapsulate`] for
    /// the same `hkdf_key_compressed` setting on both sides.
    pub fn decapsulate(&self, sk: &PrivateKey, hkdf_key_compressed: bool) -> Result<SharedSecret> {
        let sender_point = self.to_bytes(hkdf_key_compressed);
        let shared_point = sk.shared_point(self, hkdf_key_compressed)?;
        crate::ecdh::derive_shared_key(&sender_point, &shared_point)
    }

    pub(crate) fn as_affine(&self) -> &AffinePoint {
        self.point.as_affine()
    }

    pub(crate) fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey::from(&self.point)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", self.to_hex(true))
    }
}
