// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Key Material
//!
//! Value types for secp256k1 key pairs:
//!
//! - [`PrivateKey`]: a validated private scalar that owns its derived
//!   public key
//! - [`PublicKey`]: a validated curve point, stored canonically and
//!   convertible between SEC1 compressed and uncompressed encodings
//!
//! Both types validate at construction and never hold malformed material.

pub mod private_key;
pub mod public_key;

pub use private_key::PrivateKey;
pub use public_key::PublicKey;
