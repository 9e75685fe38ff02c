// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates constraints serde cannot express: file names that must stay
//! inside the vault root, distinct names, and a known log level.

use std::path::{Component, Path};

use crate::diagnostic::ConfigError;
use crate::model::SecmanConfig;

/// Log levels accepted by `log.level`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SecmanConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Some(root) = &config.vault.root {
        if root.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: "vault.root must not be empty when set".to_string(),
            });
        }
    }

    let names = [
        ("vault.config_file", &config.vault.config_file),
        ("vault.sites_file", &config.vault.sites_file),
        ("vault.encrypted_files_dir", &config.vault.encrypted_files_dir),
    ];

    for (key, value) in &names {
        if let Some(message) = check_entry_name(key, value) {
            errors.push(ConfigError::Validation { message });
        }
    }

    for (i, (key_a, value_a)) in names.iter().enumerate() {
        for (key_b, value_b) in names.iter().skip(i + 1) {
            if value_a == value_b {
                errors.push(ConfigError::Validation {
                    message: format!("{key_a} and {key_b} must differ, both are `{value_a}`"),
                });
            }
        }
    }

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A vault entry name must be exactly one normal path component.
fn check_entry_name(key: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        return Some(format!("{key} must not be empty"));
    }
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => None,
        _ => Some(format!(
            "{key} `{value}` must be a plain name inside the vault root"
        )),
    }
}
