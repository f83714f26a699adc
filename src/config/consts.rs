// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Protocol Constants
//!
//! Fixed sizes of every field in the wire format. These are protocol
//! constants, not tunables: changing any of them breaks interoperability
//! with existing peers.

/// secp256k1 private scalar, big-endian
pub const SECRET_KEY_LENGTH: usize = 32;

/// SEC1 compressed point: 1-byte parity prefix + 32-byte x
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

/// SEC1 uncompressed point: 0x04 prefix + 32-byte x + 32-byte y
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

/// Bare x || y coordinate pair without the SEC1 prefix (Ethereum style)
pub const RAW_PUBLIC_KEY_SIZE: usize = 64;

/// ECDSA signature in compact r || s form
pub const SIGNATURE_SIZE: usize = 64;

/// XChaCha20-Poly1305 nonce
pub const XCHACHA20_NONCE_LENGTH: usize = 24;

/// Poly1305 authentication tag
pub const AEAD_TAG_LENGTH: usize = 16;

/// Fixed overhead of a sealed block: nonce + tag, before any ciphertext
pub const SEALED_OVERHEAD: usize = XCHACHA20_NONCE_LENGTH + AEAD_TAG_LENGTH;
