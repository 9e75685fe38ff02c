// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the secman vault.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by every secman crate.
pub type Result<T> = std::result::Result<T, SecmanError>;

/// The error type shared by all vault operations.
///
/// Every variant is terminal for the operation that produced it. Nothing in
/// the library retries or exits the process; the binary reports the error
/// once and chooses the exit status.
#[derive(Debug, Error)]
pub enum SecmanError {
    /// Filesystem failure while probing, creating, or writing vault files.
    #[error("{context} ({}): {source}", path.display())]
    Io {
        /// The step that failed, e.g. "create vault directory".
        context: String,
        /// The path the step was operating on.
        path: PathBuf,
        source: std::io::Error,
    },

    /// The randomness source was unavailable or returned too few bytes.
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// Key derivation received malformed input or failed internally.
    #[error("key derivation failed: {0}")]
    Derivation(String),

    /// Authenticated encryption of key material failed.
    #[error("sealing failed: {0}")]
    Seal(String),

    /// A sealed blob could not be opened: wrong key, tampering, or truncation.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// A config record already exists; nothing was written.
    #[error("vault already initialized: config record found at {}", path.display())]
    AlreadyInitialized { path: PathBuf },

    /// The master password could not be obtained.
    #[error("password prompt failed: {0}")]
    Prompt(String),

    /// The persisted config record is malformed or inconsistent.
    #[error("invalid config record: {0}")]
    Record(String),

    /// The vault location could not be resolved from configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl SecmanError {
    /// Wrap an I/O error with the failing step and path.
    pub fn io(context: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SecmanError::Io {
            context: context.into(),
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for the refusal to touch an existing vault.
    pub fn is_already_initialized(&self) -> bool {
        matches!(self, SecmanError::AlreadyInitialized { .. })
    }
}
