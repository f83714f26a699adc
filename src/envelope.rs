// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire Codec
//!
//! Assembles and parses the byte blobs exchanged between peers:
//!
//! ```text
//! Unsigned envelope:
//!   [ephemeralPubKey: 33 or 65][nonce: 24][tag: 16][ciphertext: N]
//!
//! Signed envelope:
//!   [signature: 64][ephemeralPubKey: 33 or 65][nonce: 24][tag: 16][ciphertext: N]
//! ```
//!
//! The ephemeral-key field length is implied by the `ephemeral_key_compressed`
//! switch, not encoded in the envelope. The receiver must be configured with
//! the same mode the sender used; `decode` checks the SEC1 prefix byte
//! against the configured mode so a disagreement fails cleanly instead of
//! misparsing.

use tracing::debug;

use crate::config::consts::{SEALED_OVERHEAD, SIGNATURE_SIZE};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::keys::PublicKey;

/// Assemble an unsigned envelope: ephemeral public key, then sealed block.
pub fn encode(ephemeral: &PublicKey, sealed: &[u8], config: &Config) -> Vec<u8> {
    let mut key = ephemeral.to_bytes(config.ephemeral_key_compressed);
    key.reserve(sealed.len());
    key.extend_from_slice(sealed);
    key
}

/// Split an unsigned envelope into the sender's (ephemeral) public key and
/// the sealed block, at the offset implied by the configured mode.
///
/// # Errors
///
/// [`Error::MalformedEnvelope`] if the envelope is shorter than the minimum
/// for the configured mode, or its leading SEC1 prefix byte contradicts the
/// mode (the usual symptom of a sender/receiver configuration mismatch).
/// [`Error::InvalidKey`] if the key field parses structurally but is not a
/// point on the curve.
pub fn decode<'a>(envelope: &'a [u8], config: &Config) -> Result<(PublicKey, &'a [u8])> {
    let key_size = config.ephemeral_key_size();

    if envelope.len() < key_size + SEALED_OVERHEAD {
        return Err(Error::MalformedEnvelope {
            reason: format!(
                "expected at least {} bytes for the configured mode, got {}",
                key_size + SEALED_OVERHEAD,
                envelope.len()
            ),
        });
    }

    let prefix = envelope[0];
    let prefix_matches_mode = if config.ephemeral_key_compressed {
        prefix == 0x02 || prefix == 0x03
    } else {
        prefix == 0x04
    };
    if !prefix_matches_mode {
        return Err(Error::MalformedEnvelope {
            reason: format!(
                "ephemeral key prefix 0x{:02x} does not match the configured {} mode \
                 (sender and receiver compression settings must agree)",
                prefix,
                if config.ephemeral_key_compressed {
                    "compressed"
                } else {
                    "uncompressed"
                }
            ),
        });
    }

    let sender = PublicKey::from_bytes(&envelope[..key_size])?;
    debug!(
        envelope_len = envelope.len(),
        key_size, "decoded envelope"
    );
    Ok((sender, &envelope[key_size..]))
}

/// Prepend a 64-byte compact signature to an envelope.
pub fn encode_signed(signature: &[u8; SIGNATURE_SIZE], envelope: &[u8]) -> Vec<u8> {
    let mut signed = Vec::with_capacity(SIGNATURE_SIZE + envelope.len());
    signed.extend_from_slice(signature);
    signed.extend_from_slice(envelope);
    signed
}

/// Split a signed envelope at the fixed 64-byte offset into
/// `(signature, envelope)`.
pub fn decode_signed(signed: &[u8]) -> Result<(&[u8], &[u8])> {
    if signed.len() <= SIGNATURE_SIZE {
        return Err(Error::MalformedEnvelope {
            reason: format!(
                "signed envelope must be longer than the {}-byte signature, got {}",
                SIGNATURE_SIZE,
                signed.len()
            ),
        });
    }
    Ok(signed.split_at(SIGNATURE_SIZE))
}
