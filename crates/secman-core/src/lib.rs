// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core definitions shared across the secman workspace.
//!
//! This crate holds the error taxonomy used by the vault library and the
//! command-line front end. It has no I/O of its own.

pub mod error;

pub use error::{Result, SecmanError};

/// Version of the secman workspace, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
