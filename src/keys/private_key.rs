// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Private Key
//!
//! A validated secp256k1 private scalar in `[1, n-1]`, immutable once
//! constructed, owning its public counterpart (derived once and cached for
//! the instance's lifetime).
//!
//! ## Security Considerations
//!
//! - The scalar is NEVER logged; `Debug` prints a redacted placeholder
//! - Candidate buffers used during generation are zeroized
//! - Equality on private keys compares in constant time

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ecdsa::SigningKey, ProjectivePoint, SecretKey};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use crate::bytes::decode_hex;
use crate::config::consts::SECRET_KEY_LENGTH;
use crate::ecdh::{derive_shared_key, SharedSecret};
use crate::error::{Error, Result};
use crate::keys::PublicKey;

/// A secp256k1 private scalar with its cached public key
pub struct PrivateKey {
    secret: SecretKey,
    public_key: PublicKey,
}

impl PrivateKey {
    /// Generate a new private key by rejection sampling.
    ///
    /// Samples 32 random bytes from the OS RNG and retries until the curve's
    /// scalar-validity predicate accepts them. Each 256-bit sample is valid
    /// with overwhelming probability, so the loop almost always runs once.
    pub fn generate() -> PrivateKey {
        let mut candidate = Zeroizing::new([0u8; SECRET_KEY_LENGTH]);
        loop {
            OsRng.fill_bytes(candidate.as_mut());
            if let Ok(secret) = SecretKey::from_slice(candidate.as_ref()) {
                return Self::from_secret(secret);
            }
        }
    }

    /// Construct from 32 raw scalar bytes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`] if the input is not exactly 32 bytes or the
    /// scalar is out of range (zero, or >= the curve order).
    pub fn from_bytes(bytes: &[u8]) -> Result<PrivateKey> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(Error::InvalidKey {
                key_type: "private_key",
                reason: format!(
                    "expected {} bytes, got {}",
                    SECRET_KEY_LENGTH,
                    bytes.len()
                ),
            });
        }

        let secret = SecretKey::from_slice(bytes).map_err(|e| Error::InvalidKey {
            key_type: "private_key",
            reason: format!("scalar out of range: {}", e),
        })?;

        Ok(Self::from_secret(secret))
    }

    /// Construct from a `0x`-optional hex string.
    pub fn from_hex(hex: &str) -> Result<PrivateKey> {
        let bytes = Zeroizing::new(decode_hex(hex)?);
        Self::from_bytes(&bytes)
    }

    fn from_secret(secret: SecretKey) -> PrivateKey {
        let public_key = PublicKey::from_point(secret.public_key());
        PrivateKey { secret, public_key }
    }

    /// The public key derived from this private key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// The raw 32-byte scalar, zeroized on drop.
    pub fn secret(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.secret.to_bytes().into())
    }

    /// The scalar as a lowercase hex string (no `0x` prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(self.secret())
    }

    /// Derive the shared symmetric key for a message TO `peer`.
    ///
    /// The sender-point input to the KDF is this key's OWN public point,
    /// compressed or uncompressed per `hkdf_key_compressed`. The counterpart
    /// operation on the receiving side is [`PublicKey::decapsulate`], and
    /// `a.encapsulate(B) == b_side.decapsulate(...)` holds for any valid key
    /// pair (Diffie-Hellman symmetry).
    pub fn encapsulate(&self, peer: &PublicKey, hkdf_key_compressed: bool) -> Result<SharedSecret> {
        let sender_point = self.public_key.to_bytes(hkdf_key_compressed);
        let shared_point = self.shared_point(peer, hkdf_key_compressed)?;
        derive_shared_key(&sender_point, &shared_point)
    }

    /// Compute the ECDH point `peer * scalar`, encoded per `compressed` with
    /// the SEC1 prefix byte stripped (32 bytes of x, or 64 bytes of x || y).
    ///
    /// Only coordinate material feeds the KDF; the encoding tag never does.
    pub(crate) fn shared_point(
        &self,
        peer: &PublicKey,
        compressed: bool,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let scalar = self.secret.to_nonzero_scalar();
        let point = ProjectivePoint::from(*peer.as_affine()) * *scalar;

        // A nonzero scalar times a prime-order point cannot be the identity,
        // but the encoding below would silently produce a single 0x00 byte
        // for it, so the invariant is checked rather than assumed.
        if point == ProjectivePoint::IDENTITY {
            return Err(Error::KeyDerivation {
                operation: "ecdh",
                reason: "shared point is the identity".to_string(),
            });
        }

        let encoded = point.to_affine().to_encoded_point(compressed);
        Ok(Zeroizing::new(encoded.as_bytes()[1..].to_vec()))
    }

    pub(crate) fn signing_key(&self) -> SigningKey {
        SigningKey::from(&self.secret)
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        crate::bytes::equal_bytes(self.secret().as_ref(), other.secret().as_ref())
    }
}

impl Eq for PrivateKey {}

impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        Self::from_secret(self.secret.clone())
    }
}

// Never expose the scalar through Debug output
impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("secret", &"[REDACTED]")
            .field("public_key", &self.public_key)
            .finish()
    }
}
