// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault bootstrap for secman.
//!
//! A master password is stretched with Argon2id into a symmetric key, which
//! seals the private half of a freshly generated X25519 keypair with
//! AES-256-GCM. The sealed key, the public key, and the KDF salt form the
//! config record, written exactly once into the vault directory.

pub mod crypto;
pub mod init;
pub mod kdf;
pub mod keypair;
pub mod layout;
pub mod prompt;
pub mod record;
pub mod rng;

pub use init::{initialize, InitReport};
pub use keypair::MasterKeypair;
pub use layout::{VaultLayout, VaultProbe, VaultState};
pub use prompt::{PasswordSource, TerminalPrompt};
pub use record::{unlock_vault, ConfigRecord};
pub use rng::{RandomSource, SystemRandomSource};
