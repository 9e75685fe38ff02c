// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `secman status` command implementation.
//!
//! Probes the vault directory without writing anything and reports what it
//! found. Falls back to plain output when stdout is not a TTY.

use std::io::IsTerminal;

use secman_core::SecmanError;
use secman_vault::{ConfigRecord, VaultLayout, VaultProbe, VaultState};
use serde::Serialize;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub root: String,
    pub state: &'static str,
    pub config_file: String,
    pub sites_file_present: bool,
    pub encrypted_files_dir_present: bool,
    pub public_key: Option<String>,
    pub record_error: Option<String>,
}

fn state_name(state: VaultState) -> &'static str {
    match state {
        VaultState::NoDirectory => "absent",
        VaultState::DirectoryNoConfig => "uninitialized",
        VaultState::DirectoryWithConfig => "initialized",
    }
}

fn build_status(layout: &VaultLayout, probe: &VaultProbe) -> StatusResponse {
    let (public_key, record_error) = if probe.state == VaultState::DirectoryWithConfig {
        match ConfigRecord::load(layout.config_file()) {
            Ok(record) => (Some(hex::encode(record.public_key)), None),
            Err(e) => (None, Some(e.to_string())),
        }
    } else {
        (None, None)
    };

    StatusResponse {
        root: layout.root().display().to_string(),
        state: state_name(probe.state),
        config_file: layout.config_file().display().to_string(),
        sites_file_present: probe.sites_file_present,
        encrypted_files_dir_present: probe.encrypted_files_dir_present,
        public_key,
        record_error,
    }
}

/// Run the `secman status` command.
///
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub fn run_status(layout: &VaultLayout, json: bool, plain: bool) -> Result<(), SecmanError> {
    let probe = layout.probe()?;
    let status = build_status(layout, &probe);

    if json {
        let rendered = serde_json::to_string_pretty(&status)
            .map_err(|e| SecmanError::Record(format!("failed to render status: {e}")))?;
        println!("{rendered}");
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_status(&status, use_color);
    }
    Ok(())
}

fn print_status(status: &StatusResponse, use_color: bool) {
    println!();
    println!("  secman status");
    println!("  {}", "-".repeat(35));
    println!("    Vault:    {}", status.root);

    let healthy = status.state == "initialized" && status.record_error.is_none();
    if use_color {
        use colored::Colorize;
        if healthy {
            println!("    State:    {} {}", "✓".green(), status.state.green());
        } else {
            println!("    State:    {} {}", "✗".yellow(), status.state.yellow());
        }
    } else if healthy {
        println!("    State:    [OK] {}", status.state);
    } else {
        println!("    State:    [--] {}", status.state);
    }

    println!("    Sites:    {}", presence(status.sites_file_present));
    println!("    Files:    {}", presence(status.encrypted_files_dir_present));
    if let Some(key) = &status.public_key {
        println!("    Key:      {key}");
    }
    if let Some(err) = &status.record_error {
        println!("    Record:   {err}");
        println!();
        println!("  Remove {} and run: secman init", status.config_file);
    } else if status.state != "initialized" {
        println!();
        println!("  Create with: secman init");
    }
    println!();
}

fn presence(present: bool) -> &'static str {
    if present { "present" } else { "missing" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secman_config::model::VaultConfig;

    #[test]
    fn absent_vault_reports_absent() {
        let dir = tempfile::tempdir().unwrap();
        let layout = VaultLayout::new(dir.path().join("v"), &VaultConfig::default());
        let status = build_status(&layout, &layout.probe().unwrap());
        assert_eq!(status.state, "absent");
        assert!(status.public_key.is_none());
    }

    #[test]
    fn empty_record_is_reported_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let layout = VaultLayout::new(dir.path(), &VaultConfig::default());
        std::fs::write(layout.config_file(), b"").unwrap();

        let status = build_status(&layout, &layout.probe().unwrap());
        assert_eq!(status.state, "initialized");
        assert!(status.record_error.is_some());
    }

    #[test]
    fn status_response_serializes() {
        let resp = StatusResponse {
            root: "/home/u/.secman".to_string(),
            state: "uninitialized",
            config_file: "/home/u/.secman/secman.json".to_string(),
            sites_file_present: false,
            encrypted_files_dir_present: false,
            public_key: None,
            record_error: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"state\":\"uninitialized\""));
    }
}
