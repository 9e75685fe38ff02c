// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persisted config record and unlocking a vault from it.
//!
//! The record is JSON with hex-encoded byte fields:
//!
//! ```json
//! {
//!   "version": 1,
//!   "sealed_private_key": "<nonce || ciphertext || tag>",
//!   "public_key": "<32 bytes>",
//!   "kdf_salt": "<32 bytes>"
//! }
//! ```
//!
//! Neither the raw private key nor the derived key is ever part of it.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use secman_core::{Result, SecmanError};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::crypto;
use crate::kdf::{self, DerivedKey, SALT_LEN};
use crate::keypair::{MasterKeypair, KEY_BYTES};
use crate::layout::VaultLayout;
use crate::prompt::PasswordSource;

/// Current record format version.
pub const RECORD_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigRecord {
    pub version: u32,
    #[serde(with = "hex")]
    pub sealed_private_key: Vec<u8>,
    #[serde(with = "hex")]
    pub public_key: [u8; KEY_BYTES],
    #[serde(with = "hex")]
    pub kdf_salt: [u8; SALT_LEN],
}

impl ConfigRecord {
    pub fn new(
        sealed_private_key: Vec<u8>,
        public_key: [u8; KEY_BYTES],
        kdf_salt: [u8; SALT_LEN],
    ) -> Result<Self> {
        if sealed_private_key.is_empty() {
            return Err(SecmanError::Record("sealed private key is empty".to_string()));
        }
        Ok(Self {
            version: RECORD_VERSION,
            sealed_private_key,
            public_key,
            kdf_salt,
        })
    }

    /// Serialize into `file` and flush it to stable storage.
    ///
    /// `path` is only used for error context.
    pub fn write_to(&self, file: &mut File, path: &Path) -> Result<()> {
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| SecmanError::Record(format!("failed to serialize config record: {e}")))?;

        file.write_all(&json)
            .and_then(|()| file.write_all(b"\n"))
            .and_then(|()| file.sync_all())
            .map_err(|e| SecmanError::io("write config record", path, e))?;

        debug!(path = %path.display(), bytes = json.len(), "config record written");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            std::fs::read(path).map_err(|e| SecmanError::io("read config record", path, e))?;
        Self::from_json_slice(&bytes)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(SecmanError::Record(
                "config record is empty; a previous initialization did not finish".to_string(),
            ));
        }

        let record: Self = serde_json::from_slice(bytes)
            .map_err(|e| SecmanError::Record(format!("malformed config record: {e}")))?;

        if record.version != RECORD_VERSION {
            return Err(SecmanError::Record(format!(
                "unsupported config record version {} (expected {RECORD_VERSION})",
                record.version
            )));
        }
        if record.sealed_private_key.is_empty() {
            return Err(SecmanError::Record("sealed private key is empty".to_string()));
        }
        Ok(record)
    }

    /// Recover the master keypair with the master password.
    pub fn unlock(&self, password: &SecretString) -> Result<MasterKeypair> {
        let key = kdf::derive_key(password.expose_secret().as_bytes(), &self.kdf_salt)?;
        self.open_with_key(&key)
    }

    /// Open the sealed private key with an already derived key and check it
    /// against the stored public key.
    pub fn open_with_key(&self, key: &DerivedKey) -> Result<MasterKeypair> {
        let plaintext = crypto::open(key.as_bytes(), &self.sealed_private_key)?;
        if plaintext.len() != KEY_BYTES {
            return Err(SecmanError::Record(format!(
                "sealed private key has {} bytes, expected {KEY_BYTES}",
                plaintext.len()
            )));
        }
        let mut private = Zeroizing::new([0u8; KEY_BYTES]);
        private.copy_from_slice(&plaintext);

        let keypair = MasterKeypair::from_private_bytes(&private);
        if keypair.public_bytes() != self.public_key {
            return Err(SecmanError::Record(
                "public key does not match the sealed private key".to_string(),
            ));
        }
        Ok(keypair)
    }
}

/// Load the vault's config record and unlock it with a password from
/// `passwords`.
pub fn unlock_vault(layout: &VaultLayout, passwords: &dyn PasswordSource) -> Result<MasterKeypair> {
    let record = ConfigRecord::load(layout.config_file())?;
    let password = passwords.existing_password()?;
    let keypair = record.unlock(&password)?;
    info!(root = %layout.root().display(), "vault unlocked");
    Ok(keypair)
}
