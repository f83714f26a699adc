// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECIES Hybrid Encryption over secp256k1
//!
//! Implements the end-to-end encryption scheme used between SDK clients and
//! nodes: a sender encrypts to a recipient's public key using an ephemeral
//! key pair, ECDH + HKDF-SHA256 key derivation, and XChaCha20-Poly1305
//! authenticated encryption, with an optional detached ECDSA signature layer
//! for sender authentication.
//!
//! ## Wire Format
//!
//! ```text
//! Unsigned envelope:
//!   [ephemeralPubKey: 33 or 65][nonce: 24][tag: 16][ciphertext: N]
//!
//! Signed envelope:
//!   [signature: 64][ephemeralPubKey: 33 or 65][nonce: 24][tag: 16][ciphertext: N]
//! ```
//!
//! The ephemeral-key length is NOT self-describing: it is implied by the
//! `ephemeral_key_compressed` configuration switch, which both peers must
//! agree on out of band (see [`config::Config`]).
//!
//! ## Security Considerations
//!
//! - Key material is validated at construction and never logged
//! - Derived symmetric keys live for a single call and are zeroized
//! - Nonces are random per encryption, never reused by construction
//! - Signature verification failures either raise or silently degrade to
//!   unauthenticated decryption, per the configured policy
//!
//! ## Example
//!
//! ```
//! use fabstir_ecies::{Config, PrivateKey, Service};
//!
//! let key = PrivateKey::generate();
//! let service = Service::new(
//!     key.secret().to_vec(),
//!     key.public_key().compressed(),
//!     Config::default(),
//! )?;
//!
//! let encrypted = service.encrypt(b"hello")?;
//! assert_eq!(service.decrypt(&encrypted)?, b"hello");
//! # Ok::<(), fabstir_ecies::Error>(())
//! ```

pub mod bytes;
pub mod config;
pub mod ecdh;
pub mod encryption;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod service;
pub mod signature;

pub use bytes::Hex;
pub use config::{Config, SignatureConfig};
pub use ecdh::{derive_shared_key, SharedSecret};
pub use encryption::{open, seal};
pub use error::{Error, Result};
pub use keys::{PrivateKey, PublicKey};
pub use service::{decrypt, encrypt, Service};
pub use signature::{sign_envelope, verify_envelope};
