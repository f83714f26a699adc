// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crypto Error Types
//!
//! Typed errors for every failure the ECIES pipeline can produce, with
//! context preservation so callers can tell apart the cases their retry and
//! surfacing policies treat differently:
//!
//! - **InvalidKey**: malformed or out-of-range private/public key bytes,
//!   raised at construction and never deferred
//! - **MalformedEnvelope**: wire blob shorter than the configured mode allows,
//!   or with an ephemeral-key prefix that contradicts the configured mode
//! - **AuthenticationFailed**: AEAD tag verification rejected the sealed block
//! - **InvalidSignature**: signature verification failed and the signing
//!   policy requires throwing; carries the policy-configured message verbatim
//! - **TypeMismatch**: `Service::equals` called with an unsupported comparand

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for all cryptographic and codec operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid cryptographic key (wrong size, out of range, not on the curve)
    #[error("Invalid key ({key_type}): {reason}")]
    InvalidKey {
        /// Type of key that failed (e.g., "private_key", "public_key")
        key_type: &'static str,
        /// Specific failure reason
        reason: String,
    },

    /// Envelope failed structural validation before any slicing took place
    #[error("Malformed envelope: {reason}")]
    MalformedEnvelope { reason: String },

    /// AEAD tag verification failed (tampered data or wrong key)
    ///
    /// Deliberately carries no detail: the AEAD primitive does not
    /// distinguish a bad key from a flipped ciphertext bit.
    #[error("Authentication failed: AEAD tag verification rejected the sealed block")]
    AuthenticationFailed,

    /// AEAD encryption itself failed (plaintext exceeds the cipher's limits)
    #[error("Encryption failed: {reason}")]
    EncryptionFailed { reason: String },

    /// Signature verification failed under a throw-on-invalid policy.
    /// The message text comes from the signing policy, verbatim.
    #[error("{0}")]
    InvalidSignature(String),

    /// `equals()` was called with something that is neither a `PrivateKey`
    /// nor a `PublicKey`
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// ECDH or HKDF plumbing failed
    #[error("Key derivation failed during {operation}: {reason}")]
    KeyDerivation {
        /// Which key derivation operation failed
        operation: &'static str,
        /// Specific failure reason
        reason: String,
    },

    /// Configuration file was present but could not be read or parsed
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

// Conversion from hex decode errors
impl From<hex::FromHexError> for Error {
    fn from(err: hex::FromHexError) -> Self {
        Error::InvalidKey {
            key_type: "hex",
            reason: format!("hex decode error: {}", err),
        }
    }
}

// Conversion from k256 errors (elliptic curve operations)
impl From<k256::elliptic_curve::Error> for Error {
    fn from(err: k256::elliptic_curve::Error) -> Self {
        Error::InvalidKey {
            key_type: "unknown",
            reason: format!("k256 error: {}", err),
        }
    }
}

// Conversion from chacha20poly1305 errors. The aead crate reports every
// decryption failure the same way, so this always maps to an auth failure.
impl From<chacha20poly1305::aead::Error> for Error {
    fn from(_: chacha20poly1305::aead::Error) -> Self {
        Error::AuthenticationFailed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::InvalidKey {
            key_type: "private_key",
            reason: "scalar out of range".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid key (private_key): scalar out of range"
        );

        let err = Error::InvalidSignature("Invalid signature".to_string());
        assert_eq!(format!("{}", err), "Invalid signature");

        let err = Error::MalformedEnvelope {
            reason: "too short".to_string(),
        };
        assert_eq!(format!("{}", err), "Malformed envelope: too short");
    }

    #[test]
    fn test_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> =
            Box::new(Error::TypeMismatch("test".to_string()));
        assert!(err.to_string().contains("test"));
    }

    #[test]
    fn test_from_hex_error_conversion() {
        let hex_err = hex::decode("not_valid_hex").unwrap_err();
        let err: Error = hex_err.into();

        match err {
            Error::InvalidKey { key_type, reason } => {
                assert_eq!(key_type, "hex");
                assert!(reason.contains("decode"));
            }
            _ => panic!("Expected Error::InvalidKey"),
        }
    }

    #[test]
    fn test_from_aead_error_is_auth_failure() {
        let err: Error = chacha20poly1305::aead::Error.into();
        assert!(matches!(err, Error::AuthenticationFailed));
    }
}
