// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration
//!
//! Explicit configuration values for the ECIES pipeline. A `Config` is built
//! once (from a project-root TOML file or from defaults) and threaded into
//! the [`Service`](crate::service::Service) constructor — nothing in this
//! crate reads ambient or global state, so encrypt/decrypt stay pure
//! functions of their explicit inputs.
//!
//! ## Operational precondition
//!
//! The wire format is not self-describing: the ephemeral-key length in the
//! envelope is implied by `ephemeral_key_compressed`, and the key-derivation
//! input layout by `hkdf_key_compressed`. Both peers MUST run with equal
//! values for these two switches or decryption fails.

pub mod consts;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Name of the optional configuration file, looked up in the working
/// directory (project root).
pub const CONFIG_FILE: &str = "fabstir-ecies.toml";

/// Signing-layer policy, read once per operation
///
/// # Fields
///
/// * `enabled` - whether encrypt signs and decrypt expects + verifies a
///   signature prefix
/// * `throw_on_invalid` - whether a failed verification raises
///   [`Error::InvalidSignature`] or is silently ignored
/// * `error_message` - message carried by the raised error, verbatim
/// * `use_low_s` - request canonical low-S normalization from the signer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    pub enabled: bool,
    pub throw_on_invalid: bool,
    pub error_message: String,
    pub use_low_s: bool,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            throw_on_invalid: true,
            error_message: "Invalid signature".to_string(),
            use_low_s: true,
        }
    }
}

/// Complete configuration snapshot for the ECIES pipeline
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compression mode of the sender-point input fed to HKDF
    pub hkdf_key_compressed: bool,
    /// Compression mode of the ephemeral public key placed in the envelope
    pub ephemeral_key_compressed: bool,
    /// Signing-layer policy
    pub signature: SignatureConfig,
}

impl Config {
    /// Load configuration from `fabstir-ecies.toml` in the working directory,
    /// falling back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// A present-but-unreadable or present-but-invalid file is an error, not
    /// a silent fallback: running with defaults the operator did not choose
    /// is how peers end up with mismatched compression modes.
    pub fn load() -> Result<Config> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from an explicit path (see [`Config::load`]).
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            debug!(
                path = %path.display(),
                "no configuration file found, using defaults"
            );
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(path).map_err(|e| Error::Config {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&raw).map_err(|e| Error::Config {
            reason: format!("failed to parse {}: {}", path.display(), e),
        })?;

        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Byte length of the ephemeral public key field in the envelope,
    /// as implied by `ephemeral_key_compressed` (33 or 65).
    pub fn ephemeral_key_size(&self) -> usize {
        if self.ephemeral_key_compressed {
            consts::COMPRESSED_PUBLIC_KEY_SIZE
        } else {
            consts::UNCOMPRESSED_PUBLIC_KEY_SIZE
        }
    }
}
