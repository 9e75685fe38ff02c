// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `secman verify` command implementation.

use secman_core::SecmanError;
use secman_vault::{unlock_vault, TerminalPrompt, VaultLayout};

/// Unlock the vault and confirm the sealed key matches the public key.
pub fn run_verify(layout: &VaultLayout) -> Result<(), SecmanError> {
    let keypair = unlock_vault(layout, &TerminalPrompt)?;
    println!("Vault unlocked: {}", layout.root().display());
    println!("Public key: {}", hex::encode(keypair.public_bytes()));
    Ok(())
}
