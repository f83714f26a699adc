// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Encryption Service
//!
//! The public-facing orchestrator. A [`Service`] holds one private key (its
//! own, used for decrypting and signing), one public key (the peer's, used
//! for encrypting and verifying), and an explicit [`Config`] snapshot. Both
//! keys are accepted as [`Hex`] (hex string or raw bytes) and normalized
//! exactly once, at construction.
//!
//! ## Protocol Flow
//!
//! 1. `encrypt` generates an ephemeral key pair and encapsulates it against
//!    the held public key
//! 2. The message is sealed with XChaCha20-Poly1305 under the derived key
//! 3. The ephemeral public key is prepended (wire codec)
//! 4. When the signing policy is enabled, a detached ECDSA signature over
//!    the envelope is prepended
//! 5. `decrypt` runs the same pipeline in reverse, verifying the signature
//!    first when the policy expects one
//!
//! Instances are stateless apart from the immutable key fields: two calls
//! against the same `Service` may run concurrently without coordination.

use std::any::Any;

use tracing::debug;

use crate::bytes::{equal_bytes, Hex};
use crate::config::consts::COMPRESSED_PUBLIC_KEY_SIZE;
use crate::config::Config;
use crate::encryption;
use crate::envelope;
use crate::error::{Error, Result};
use crate::keys::{PrivateKey, PublicKey};
use crate::signature::{sign_envelope, verify_envelope};
use zeroize::Zeroizing;

/// Encrypt `msg` to `receiver` (ECIES, no signature layer).
///
/// Generates an ephemeral key pair, derives the shared key against
/// `receiver`, seals the message, and prepends the ephemeral public key in
/// the encoding selected by `config.ephemeral_key_compressed`.
pub fn encrypt(receiver: &PublicKey, msg: &[u8], config: &Config) -> Result<Vec<u8>> {
    let ephemeral = PrivateKey::generate();
    let key = ephemeral.encapsulate(receiver, config.hkdf_key_compressed)?;
    let sealed = encryption::seal(&key, msg)?;
    Ok(envelope::encode(ephemeral.public_key(), &sealed, config))
}

/// Decrypt an unsigned envelope with `sk` (ECIES, no signature layer).
pub fn decrypt(sk: &PrivateKey, msg: &[u8], config: &Config) -> Result<Vec<u8>> {
    let (sender, sealed) = envelope::decode(msg, config)?;
    let key = sender.decapsulate(sk, config.hkdf_key_compressed)?;
    encryption::open(&key, sealed)
}

/// Orchestrates encryption, decryption, and the signing policy over a fixed
/// pair of keys
pub struct Service {
    private_key: PrivateKey,
    public_key: PublicKey,
    /// The peer key exactly as supplied (normalized to bytes once); its
    /// length selects the comparison encoding in [`Service::equals`]
    public_key_bytes: Vec<u8>,
    config: Config,
}

impl Service {
    /// Build a service from a private key, a peer public key, and an
    /// explicit configuration snapshot.
    ///
    /// Keys may be hex strings (`0x`-optional) or raw bytes; they are parsed
    /// and validated here, once, and never re-inspected per call.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKey`] if either key fails validation.
    pub fn new(
        private_key: impl Into<Hex>,
        public_key: impl Into<Hex>,
        config: Config,
    ) -> Result<Service> {
        let secret_bytes = Zeroizing::new(private_key.into().into_bytes()?);
        let private_key = PrivateKey::from_bytes(&secret_bytes)?;

        let public_key_bytes = public_key.into().into_bytes()?;
        let public_key = PublicKey::from_bytes(&public_key_bytes)?;

        Ok(Service {
            private_key,
            public_key,
            public_key_bytes,
            config,
        })
    }

    /// Generate a fresh key pair (convenience re-export of
    /// [`PrivateKey::generate`]).
    pub fn generate_key_pair() -> PrivateKey {
        PrivateKey::generate()
    }

    /// The configuration snapshot this service operates under.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encrypt a message to the held public key, signing the envelope with
    /// the held private key when the signing policy is enabled.
    pub fn encrypt(&self, message: &[u8]) -> Result<Vec<u8>> {
        let encrypted = encrypt(&self.public_key, message, &self.config)?;

        if self.config.signature.enabled {
            let signature =
                sign_envelope(&encrypted, &self.private_key, self.config.signature.use_low_s);
            return Ok(envelope::encode_signed(&signature, &encrypted));
        }

        Ok(encrypted)
    }

    /// Decrypt a message with the held private key.
    ///
    /// When the signing policy is enabled, the leading 64 bytes are split
    /// off and verified against the held public key first. A failed
    /// verification raises [`Error::InvalidSignature`] (carrying the
    /// policy-configured message) under `throw_on_invalid`; otherwise the
    /// envelope is decrypted anyway — an explicit policy choice to degrade
    /// to unauthenticated decryption, not a fallback.
    pub fn decrypt(&self, message: &[u8]) -> Result<Vec<u8>> {
        if self.config.signature.enabled {
            let (signature, envelope_bytes) = envelope::decode_signed(message)?;
            let verified = verify_envelope(signature, envelope_bytes, &self.public_key);

            if !verified {
                debug!("envelope signature did not verify");
                if self.config.signature.throw_on_invalid {
                    return Err(Error::InvalidSignature(
                        self.config.signature.error_message.clone(),
                    ));
                }
            }

            return decrypt(&self.private_key, envelope_bytes, &self.config);
        }

        decrypt(&self.private_key, message, &self.config)
    }

    /// Compare the service's key material against another key instance.
    ///
    /// - [`PrivateKey`]: constant-time comparison against the held secret
    /// - [`PublicKey`]: comparison against the held public key bytes, in the
    ///   encoding (compressed or uncompressed) the held bytes were supplied
    ///   in
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for any other comparand type.
    pub fn equals(&self, other: &dyn Any) -> Result<bool> {
        if let Some(sk) = other.downcast_ref::<PrivateKey>() {
            return Ok(equal_bytes(
                self.private_key.secret().as_ref(),
                sk.secret().as_ref(),
            ));
        }

        if let Some(pk) = other.downcast_ref::<PublicKey>() {
            let data = if self.public_key_bytes.len() == COMPRESSED_PUBLIC_KEY_SIZE {
                pk.compressed()
            } else {
                pk.uncompressed()
            };
            return Ok(equal_bytes(&self.public_key_bytes, &data));
        }

        Err(Error::TypeMismatch(
            "expected a PrivateKey or PublicKey instance".to_string(),
        ))
    }
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("private_key", &self.private_key)
            .field("public_key", &self.public_key)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn self_addressed(config: Config) -> (PrivateKey, Service) {
        let key = PrivateKey::generate();
        let service = Service::new(
            key.secret().to_vec(),
            key.public_key().compressed(),
            config,
        )
        .unwrap();
        (key, service)
    }

    #[test]
    fn test_round_trip_default_config() {
        let (_, service) = self_addressed(Config::default());
        let encrypted = service.encrypt(b"hello").unwrap();
        assert_eq!(service.decrypt(&encrypted).unwrap(), b"hello");
    }

    #[test]
    fn test_hex_and_byte_keys_are_equivalent() {
        let key = PrivateKey::generate();
        let config = Config::default();

        let from_bytes = Service::new(
            key.secret().to_vec(),
            key.public_key().uncompressed(),
            config.clone(),
        )
        .unwrap();
        let from_hex = Service::new(
            format!("0x{}", key.to_hex()),
            key.public_key().to_hex(false),
            config,
        )
        .unwrap();

        let encrypted = from_hex.encrypt(b"cross").unwrap();
        assert_eq!(from_bytes.decrypt(&encrypted).unwrap(), b"cross");
    }

    #[test]
    fn test_invalid_keys_rejected_at_construction() {
        let result = Service::new(vec![0u8; 32], vec![0x02u8; 33], Config::default());
        assert!(matches!(result, Err(Error::InvalidKey { .. })));

        let key = PrivateKey::generate();
        let result = Service::new(key.secret().to_vec(), vec![0u8; 12], Config::default());
        assert!(matches!(result, Err(Error::InvalidKey { .. })));
    }

    #[test]
    fn test_equals_private_key() {
        let (key, service) = self_addressed(Config::default());

        let same = PrivateKey::from_bytes(key.secret().as_ref()).unwrap();
        assert!(service.equals(&same).unwrap());

        let other = PrivateKey::generate();
        assert!(!service.equals(&other).unwrap());
    }

    #[test]
    fn test_equals_public_key_follows_stored_encoding() {
        let key = PrivateKey::generate();

        // stored compressed: comparand compared in compressed form
        let service = Service::new(
            key.secret().to_vec(),
            key.public_key().compressed(),
            Config::default(),
        )
        .unwrap();
        assert!(service.equals(key.public_key()).unwrap());

        // stored uncompressed: same key still matches
        let service = Service::new(
            key.secret().to_vec(),
            key.public_key().uncompressed(),
            Config::default(),
        )
        .unwrap();
        assert!(service.equals(key.public_key()).unwrap());

        // unrelated key of the same type
        let unrelated = PrivateKey::generate();
        assert!(!service.equals(unrelated.public_key()).unwrap());
    }

    #[test]
    fn test_equals_type_mismatch() {
        let (_, service) = self_addressed(Config::default());
        let result = service.equals(&"not a key");
        assert!(matches!(result, Err(Error::TypeMismatch(_))));
    }
}
