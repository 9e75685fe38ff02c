// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! First-time vault initialization.
//!
//! The exclusive creation of the config record file is the gate: whoever
//! creates it owns the vault. Everything written before the gate is either a
//! directory that did not exist or nothing at all, so refusing an existing
//! vault leaves the filesystem untouched.

use std::path::PathBuf;

use secman_core::{Result, SecmanError};
use secrecy::ExposeSecret;
use tracing::{debug, info};

use crate::crypto;
use crate::kdf;
use crate::keypair::{MasterKeypair, KEY_BYTES};
use crate::layout::{create_dir_private, VaultLayout, VaultState};
use crate::prompt::PasswordSource;
use crate::record::ConfigRecord;
use crate::rng::RandomSource;

/// What [`initialize`] created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub created_root: bool,
    pub created_encrypted_files_dir: bool,
    pub created_sites_file: bool,
    pub public_key: [u8; KEY_BYTES],
}

impl InitReport {
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key)
    }
}

/// Create a new vault at `layout`.
///
/// Fails with [`SecmanError::AlreadyInitialized`] if a config record exists,
/// even an empty one left behind by an interrupted run.
pub fn initialize(
    layout: &VaultLayout,
    passwords: &dyn PasswordSource,
    rng: &dyn RandomSource,
) -> Result<InitReport> {
    let probe = layout.probe()?;
    debug!(root = %layout.root().display(), state = ?probe.state, "initializing vault");

    let password = passwords.new_password()?;
    if password.expose_secret().is_empty() {
        return Err(SecmanError::Prompt("empty password not allowed".to_string()));
    }

    let created_root = probe.state == VaultState::NoDirectory;
    if created_root {
        create_dir_private(layout.root())?;
    }

    let mut config_file = layout.create_config_file()?;

    let created_encrypted_files_dir = !probe.encrypted_files_dir_present;
    if created_encrypted_files_dir {
        create_dir_private(layout.encrypted_files_dir())?;
    }
    let created_sites_file = layout.create_sites_file()?;

    let salt = kdf::generate_salt(rng)?;
    let key = kdf::derive_key(password.expose_secret().as_bytes(), &salt)?;
    debug!("derived vault key");

    let keypair = MasterKeypair::generate(rng)?;
    let sealed = crypto::seal(key.as_bytes(), &keypair.private_bytes()[..], rng)?;
    let record = ConfigRecord::new(sealed, keypair.public_bytes(), salt)?;

    // Reopen with the same key; this also checks the public half.
    record.open_with_key(&key).map_err(|e| {
        SecmanError::Seal(format!("sealed key failed verification before commit: {e}"))
    })?;
    debug!("sealed key verified");

    record.write_to(&mut config_file, layout.config_file())?;

    let report = InitReport {
        root: layout.root().to_path_buf(),
        config_file: layout.config_file().to_path_buf(),
        created_root,
        created_encrypted_files_dir,
        created_sites_file,
        public_key: keypair.public_bytes(),
    };
    info!(
        root = %report.root.display(),
        public_key = %report.public_key_hex(),
        "vault initialized"
    );
    Ok(report)
}
