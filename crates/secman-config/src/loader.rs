// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./secman.toml` > `~/.config/secman/secman.toml` > `/etc/secman/secman.toml`
//! with environment variable overrides via the `SECMAN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use tracing::debug;

use crate::model::SecmanConfig;

/// System-wide configuration file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/secman/secman.toml";

/// Configuration file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "secman.toml";

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "SECMAN_";

/// Sections that may be overridden from the environment.
const ENV_SECTIONS: &[&str] = &["vault", "log"];

/// Path of the per-user configuration file, if a config directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("secman").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/secman/secman.toml` (system-wide)
/// 3. `~/.config/secman/secman.toml` (user XDG config)
/// 4. `./secman.toml` (local directory)
/// 5. `SECMAN_*` environment variables
pub fn load_config() -> Result<SecmanConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no environment).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SecmanConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SecmanConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
///
/// The XDG hierarchy is skipped entirely.
pub fn load_config_from_path(path: &Path) -> Result<SecmanConfig, figment::Error> {
    debug!(path = %path.display(), "loading configuration from explicit path");
    Figment::new()
        .merge(Serialized::defaults(SecmanConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SecmanConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Only `SECMAN_VAULT_*` and `SECMAN_LOG_*` are consumed; other `SECMAN_`
/// variables (such as the password variable read by the prompt) never reach
/// the configuration. The first underscore after the section name becomes the
/// section separator, so `SECMAN_VAULT_CONFIG_FILE` maps to
/// `vault.config_file`, not `vault.config.file`.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .filter(|key| env_key_to_path(key.as_str()).is_some())
        .map(|key| {
            env_key_to_path(key.as_str())
                .unwrap_or_else(|| key.as_str().to_ascii_lowercase())
                .into()
        })
}

/// Map a prefix-stripped env key (`VAULT_ROOT`) to a dotted path (`vault.root`).
fn env_key_to_path(key: &str) -> Option<String> {
    let key = key.to_ascii_lowercase();
    ENV_SECTIONS.iter().find_map(|section| {
        key.strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|field| !field.is_empty())
            .map(|field| format!("{section}.{field}"))
    })
}
