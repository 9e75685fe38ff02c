// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! secman - a file-based password vault.
//!
//! This is the binary entry point. It owns the only error handler that turns
//! a failure into a message and an exit status.

mod init;
mod status;
mod verify;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use secman_config::SecmanConfig;
use secman_core::SecmanError;
use secman_vault::VaultLayout;
use tracing::debug;

/// Exit status when the vault already exists.
const EXIT_ALREADY_INITIALIZED: u8 = 2;

/// Exit status for an invalid configuration (EX_CONFIG).
const EXIT_CONFIG: u8 = 78;

/// secman - a file-based password vault.
#[derive(Parser, Debug)]
#[command(name = "secman", version, about, long_about = None)]
struct Cli {
    /// Read configuration from FILE instead of the standard locations.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Vault directory, overriding `vault.root`.
    #[arg(long, global = true, value_name = "DIR")]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new password vault.
    Init,
    /// Show whether a vault exists and what it contains.
    Status {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
        /// Print machine-readable JSON.
        #[arg(long)]
        json: bool,
    },
    /// Unlock the vault with the master password and check its keypair.
    Verify,
    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => secman_config::load_and_validate_path(path),
        None => secman_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            secman_config::render_errors(&errors);
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    if let Some(vault) = &cli.vault {
        config.vault.root = Some(vault.display().to_string());
    }

    init_tracing(&config.log.level);

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn run(cli: &Cli, config: &SecmanConfig) -> Result<(), SecmanError> {
    if let Commands::Config = cli.command {
        return print_config(config);
    }

    let layout = match &cli.vault {
        Some(dir) => VaultLayout::new(dir.clone(), &config.vault),
        None => VaultLayout::from_config(config)?,
    };
    debug!(
        command = ?cli.command,
        root = %layout.root().display(),
        config_file = %layout.config_file().display(),
        "resolved vault layout"
    );

    match &cli.command {
        Commands::Init => init::run_init(&layout),
        Commands::Status { plain, json } => status::run_status(&layout, *json, *plain),
        Commands::Verify => verify::run_verify(&layout),
        Commands::Config => Ok(()),
    }
}

fn print_config(config: &SecmanConfig) -> Result<(), SecmanError> {
    let rendered = config
        .to_toml()
        .map_err(|e| SecmanError::Config(format!("failed to render configuration: {e}")))?;
    print!("{rendered}");
    Ok(())
}

/// Print `err` once and map it to an exit status.
fn report(err: &SecmanError) -> ExitCode {
    eprintln!("secman: error: {err}");
    if let SecmanError::AlreadyInitialized { path } = err {
        eprintln!(
            "secman: nothing was changed. To start over, remove {} manually.",
            path.display()
        );
    }
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &SecmanError) -> u8 {
    match err {
        SecmanError::AlreadyInitialized { .. } => EXIT_ALREADY_INITIALIZED,
        SecmanError::Config(_) => EXIT_CONFIG,
        _ => 1,
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins; otherwise secman's own targets log at `log_level` and
/// dependencies at `warn`.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("secman={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
