// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `secman init` command implementation.

use secman_core::SecmanError;
use secman_vault::{initialize, InitReport, SystemRandomSource, TerminalPrompt, VaultLayout};

/// Run the `secman init` command.
///
/// Reads the master password from `SECMAN_PASSWORD` or the terminal, then
/// creates the vault under `layout`.
pub fn run_init(layout: &VaultLayout) -> Result<(), SecmanError> {
    let report = initialize(layout, &TerminalPrompt, &SystemRandomSource::new())?;
    for line in summary(&report) {
        println!("{line}");
    }
    Ok(())
}

fn summary(report: &InitReport) -> Vec<String> {
    let mut lines = Vec::new();
    if report.created_root {
        lines.push(format!(
            "Created directory to store passwords: {}",
            report.root.display()
        ));
    }
    if report.created_sites_file {
        lines.push("Created empty site store".to_string());
    }
    lines.push(format!("Config record: {}", report.config_file.display()));
    lines.push(format!("Public key: {}", report.public_key_hex()));
    lines.push("Password Vault successfully initialized".to_string());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report(created_root: bool) -> InitReport {
        InitReport {
            root: PathBuf::from("/home/u/.secman"),
            config_file: PathBuf::from("/home/u/.secman/secman.json"),
            created_root,
            created_encrypted_files_dir: true,
            created_sites_file: true,
            public_key: [0xaa; 32],
        }
    }

    #[test]
    fn summary_announces_new_directory() {
        let lines = summary(&report(true));
        assert_eq!(
            lines[0],
            "Created directory to store passwords: /home/u/.secman"
        );
        assert_eq!(
            lines.last().map(String::as_str),
            Some("Password Vault successfully initialized")
        );
    }

    #[test]
    fn summary_skips_directory_line_for_existing_root() {
        let lines = summary(&report(false));
        assert!(!lines.iter().any(|l| l.starts_with("Created directory")));
        assert!(lines.iter().any(|l| l.contains(&"aa".repeat(32))));
    }
}
