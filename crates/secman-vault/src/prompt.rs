// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master password acquisition via TTY prompt or the SECMAN_PASSWORD
//! environment variable.

use secman_core::{Result, SecmanError};
use secrecy::SecretString;
use zeroize::Zeroizing;

/// The environment variable name for providing the master password.
pub const PASSWORD_ENV_VAR: &str = "SECMAN_PASSWORD";

const NEW_PASSWORD_PROMPT: &str = "Please enter a strong master password: ";
const CONFIRM_PASSWORD_PROMPT: &str = "Confirm master password: ";
const EXISTING_PASSWORD_PROMPT: &str = "Master password: ";

/// Where the master password comes from.
pub trait PasswordSource {
    /// A password for a vault being created. Interactive sources confirm it.
    fn new_password(&self) -> Result<SecretString>;

    /// The password of an existing vault.
    fn existing_password(&self) -> Result<SecretString>;
}

/// Reads the password from `SECMAN_PASSWORD`, falling back to a TTY prompt.
///
/// Priority:
/// 1. `SECMAN_PASSWORD` environment variable (for scripts and CI)
/// 2. Interactive TTY prompt via `rpassword`
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl PasswordSource for TerminalPrompt {
    fn new_password(&self) -> Result<SecretString> {
        // Env var does not need confirmation.
        if let Some(password) = password_from_env() {
            return Ok(password);
        }
        require_terminal()?;

        let mut first = read_hidden(NEW_PASSWORD_PROMPT)?;
        let second = read_hidden(CONFIRM_PASSWORD_PROMPT)?;
        if *first != *second {
            return Err(SecmanError::Prompt("passwords do not match".to_string()));
        }
        non_empty(std::mem::take(&mut *first))
    }

    fn existing_password(&self) -> Result<SecretString> {
        if let Some(password) = password_from_env() {
            return Ok(password);
        }
        require_terminal()?;

        let mut password = read_hidden(EXISTING_PASSWORD_PROMPT)?;
        non_empty(std::mem::take(&mut *password))
    }
}

fn password_from_env() -> Option<SecretString> {
    match std::env::var(PASSWORD_ENV_VAR) {
        Ok(value) if !value.is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}

fn require_terminal() -> Result<()> {
    if std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        Ok(())
    } else {
        Err(SecmanError::Prompt(format!(
            "no password provided; set {PASSWORD_ENV_VAR} or run interactively"
        )))
    }
}

fn read_hidden(label: &str) -> Result<Zeroizing<String>> {
    rpassword::prompt_password(label)
        .map(Zeroizing::new)
        .map_err(|e| SecmanError::Prompt(format!("failed to read password: {e}")))
}

fn non_empty(password: String) -> Result<SecretString> {
    if password.is_empty() {
        return Err(SecmanError::Prompt("empty password not allowed".to_string()));
    }
    Ok(SecretString::from(password))
}
