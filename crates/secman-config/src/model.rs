// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level secman configuration.
///
/// Every section is optional and falls back to the defaults below. The KDF
/// cost is intentionally absent: it is fixed in the vault crate so that
/// existing vaults stay openable.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SecmanConfig {
    /// Vault location and file names.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Diagnostic logging.
    #[serde(default)]
    pub log: LogConfig,
}

impl SecmanConfig {
    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Where the vault lives on disk.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Vault root directory. `None` means `<home>/.secman`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// File name of the config record inside the root.
    #[serde(default = "default_config_file")]
    pub config_file: String,

    /// File name of the site store inside the root.
    #[serde(default = "default_sites_file")]
    pub sites_file: String,

    /// Directory name for encrypted attachments inside the root.
    #[serde(default = "default_encrypted_files_dir")]
    pub encrypted_files_dir: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            root: None,
            config_file: default_config_file(),
            sites_file: default_sites_file(),
            encrypted_files_dir: default_encrypted_files_dir(),
        }
    }
}

/// Name of the vault directory created under the home directory.
pub const DEFAULT_VAULT_DIR_NAME: &str = ".secman";

fn default_config_file() -> String {
    "secman.json".to_string()
}

fn default_sites_file() -> String {
    "sites.json".to_string()
}

fn default_encrypted_files_dir() -> String {
    "files".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Level for secman's own targets (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
