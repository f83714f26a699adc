//! XChaCha20-Poly1305 Sealed Blocks
//!
//! Authenticated encryption of a payload under a derived 32-byte key. The
//! sealed block layout is part of the wire protocol:
//!
//! ```text
//! [nonce: 24][tag: 16][ciphertext: N]
//! ```
//!
//! Note the tag sits BETWEEN the nonce and the ciphertext. The AEAD
//! primitive natively produces `ciphertext || tag`, so both directions
//! re-slice and reorder.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::{rngs::OsRng, RngCore};

use crate::config::consts::{AEAD_TAG_LENGTH, SEALED_OVERHEAD, XCHACHA20_NONCE_LENGTH};
use crate::error::{Error, Result};

/// Encrypt `plaintext` under `key`, returning `nonce || tag || ciphertext`.
///
/// A fresh random 24-byte nonce is generated for every call; the 16-byte
/// Poly1305 tag is moved in front of the ciphertext.
pub fn seal(key: &[u8; 32], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = XChaCha20Poly1305::new(key.into());

    let mut nonce = [0u8; XCHACHA20_NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce);

    // native AEAD output: ciphertext || tag
    let ciphered = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|_| Error::EncryptionFailed {
            reason: "plaintext exceeds AEAD length limit".to_string(),
        })?;

    let split = ciphered.len() - AEAD_TAG_LENGTH;
    let (encrypted, tag) = ciphered.split_at(split);

    let mut sealed = Vec::with_capacity(SEALED_OVERHEAD + encrypted.len());
    sealed.extend_from_slice(&nonce);
    sealed.extend_from_slice(tag);
    sealed.extend_from_slice(encrypted);
    Ok(sealed)
}

/// Decrypt a `nonce || tag || ciphertext` block produced by [`seal`].
///
/// # Errors
///
/// - [`Error::MalformedEnvelope`] if the block is shorter than nonce + tag
///   (checked before any slicing)
/// - [`Error::AuthenticationFailed`] if the tag does not verify — kept
///   distinct from key and envelope errors because the caller's surfacing
///   policy differs
pub fn open(key: &[u8; 32], sealed: &[u8]) -> Result<Vec<u8>> {
    if sealed.len() < SEALED_OVERHEAD {
        return Err(Error::MalformedEnvelope {
            reason: format!(
                "sealed block too short: expected at least {} bytes, got {}",
                SEALED_OVERHEAD,
                sealed.len()
            ),
        });
    }

    let (nonce, rest) = sealed.split_at(XCHACHA20_NONCE_LENGTH);
    let (tag, encrypted) = rest.split_at(AEAD_TAG_LENGTH);

    // reassemble the AEAD's native ciphertext || tag order
    let mut native = Vec::with_capacity(encrypted.len() + AEAD_TAG_LENGTH);
    native.extend_from_slice(encrypted);
    native.extend_from_slice(tag);

    let cipher = XChaCha20Poly1305::new(key.into());
    cipher
        .decrypt(XNonce::from_slice(nonce), native.as_slice())
        .map_err(|_| Error::AuthenticationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn random_key() -> [u8; 32] {
        let mut key = [0u8; 32];
        OsRng.fill_bytes(&mut key);
        key
    }

    #[test]
    fn test_seal_open_round_trip() {
        let key = random_key();
        let plaintext = b"hello sealed world";

        let sealed = seal(&key, plaintext).unwrap();
        let opened = open(&key, &sealed).unwrap();
        assert_eq!(opened, plaintext);
    }

    #[test]
    fn test_sealed_block_layout() {
        let key = random_key();
        let plaintext = b"layout";

        let sealed = seal(&key, plaintext).unwrap();
        assert_eq!(sealed.len(), SEALED_OVERHEAD + plaintext.len());

        // fresh nonce per call means two seals of the same input differ
        let sealed2 = seal(&key, plaintext).unwrap();
        assert_ne!(sealed[..XCHACHA20_NONCE_LENGTH], sealed2[..XCHACHA20_NONCE_LENGTH]);
    }

    #[test]
    fn test_empty_plaintext() {
        let key = random_key();
        let sealed = seal(&key, b"").unwrap();
        assert_eq!(sealed.len(), SEALED_OVERHEAD);
        assert_eq!(open(&key, &sealed).unwrap(), b"");
    }

    #[test]
    fn test_tamper_detection_every_region() {
        let key = random_key();
        let sealed = seal(&key, b"tamper target payload").unwrap();

        // flipping one bit anywhere (nonce, tag, or ciphertext) must fail
        // authentication, never silently succeed
        for index in 0..sealed.len() {
            let mut corrupted = sealed.clone();
            corrupted[index] ^= 0x01;
            let result = open(&key, &corrupted);
            assert!(
                matches!(result, Err(Error::AuthenticationFailed)),
                "bit flip at byte {} was not detected",
                index
            );
        }
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let sealed = seal(&random_key(), b"secret").unwrap();
        let result = open(&random_key(), &sealed);
        assert!(matches!(result, Err(Error::AuthenticationFailed)));
    }

    #[test]
    fn test_short_block_is_malformed_not_auth_failure() {
        let key = random_key();
        let result = open(&key, &[0u8; SEALED_OVERHEAD - 1]);
        assert!(matches!(result, Err(Error::MalformedEnvelope { .. })));
    }
}
