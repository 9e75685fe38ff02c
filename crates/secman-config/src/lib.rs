// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for secman.
//!
//! Provides TOML configuration parsing with strict validation (`deny_unknown_fields`),
//! XDG file hierarchy lookup, environment variable overrides, and miette
//! diagnostics with typo suggestions.
//!
//! # Usage
//!
//! ```no_run
//! use secman_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("sites file: {}", config.vault.sites_file);
//! ```

use std::path::Path;

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{LogConfig, SecmanConfig, VaultConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// Returns either a valid `SecmanConfig` or every diagnostic found.
pub fn load_and_validate() -> Result<SecmanConfig, Vec<ConfigError>> {
    finish(loader::load_config(), collect_toml_sources)
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<SecmanConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_path(path), || {
        std::fs::read_to_string(path)
            .map(|content| vec![(path.display().to_string(), content)])
            .unwrap_or_default()
    })
}

/// Load configuration from a TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<SecmanConfig, Vec<ConfigError>> {
    finish(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn finish(
    loaded: Result<SecmanConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<SecmanConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read the hierarchy's TOML files so diagnostics can point into them.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut paths = vec![std::path::PathBuf::from(loader::SYSTEM_CONFIG_PATH)];
    paths.extend(loader::user_config_path());
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(loader::LOCAL_CONFIG_FILE));
    }

    paths
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
