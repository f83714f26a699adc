// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Envelope Signing
//!
//! The optional detached-signature layer for sender authentication. The
//! signature is ECDSA over secp256k1 on the SHA-256 digest of the complete
//! unsigned envelope, serialized in compact 64-byte r || s form and placed
//! in front of the envelope by the wire codec.
//!
//! Signatures are low-S normalized when the policy asks for it, and incoming
//! high-S signatures are normalized before verification so either form
//! verifies.

use k256::ecdsa::signature::{Signer, Verifier};
use k256::ecdsa::Signature;

use crate::config::consts::SIGNATURE_SIZE;
use crate::keys::{PrivateKey, PublicKey};

/// Sign `envelope` with `sk`, returning the compact 64-byte signature.
///
/// The message digest is SHA-256 of the envelope bytes. With `use_low_s`
/// the signature is canonicalized to the low-S form (RFC 6979 deterministic
/// nonces make this reproducible for identical inputs).
pub fn sign_envelope(envelope: &[u8], sk: &PrivateKey, use_low_s: bool) -> [u8; SIGNATURE_SIZE] {
    let signing_key = sk.signing_key();
    let mut signature: Signature = signing_key.sign(envelope);

    if use_low_s {
        if let Some(normalized) = signature.normalize_s() {
            signature = normalized;
        }
    }

    let mut compact = [0u8; SIGNATURE_SIZE];
    compact.copy_from_slice(&signature.to_bytes());
    compact
}

/// Verify a compact 64-byte signature over `envelope` against `pk`.
///
/// Returns `false` for malformed signature bytes rather than erroring: the
/// caller's signing policy decides whether a failed verification is fatal.
pub fn verify_envelope(signature: &[u8], envelope: &[u8], pk: &PublicKey) -> bool {
    if signature.len() != SIGNATURE_SIZE {
        return false;
    }

    let mut signature = match Signature::from_slice(signature) {
        Ok(sig) => sig,
        Err(_) => return false,
    };

    // accept high-S encodings of otherwise valid signatures
    if let Some(normalized) = signature.normalize_s() {
        signature = normalized;
    }

    pk.verifying_key().verify(envelope, &signature).is_ok()
}
