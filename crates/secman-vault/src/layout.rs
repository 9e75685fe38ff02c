// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! On-disk layout of a vault and the primitives that create it.
//!
//! A vault is a directory holding:
//! - the config record (sealed master key, public key, KDF salt),
//! - the site store, created once as an empty JSON array,
//! - a directory for encrypted attachments.
//!
//! Directories are created `0700` and files `0600`. Files are only ever
//! created with `O_CREAT | O_EXCL`, so an existing file is never truncated.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use secman_config::model::{VaultConfig, DEFAULT_VAULT_DIR_NAME};
use secman_config::SecmanConfig;
use secman_core::{Result, SecmanError};
use tracing::debug;

/// Initial content of a fresh site store.
pub const EMPTY_SITE_STORE: &[u8] = b"[]";

/// Paths that make up one vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultLayout {
    root: PathBuf,
    config_file: PathBuf,
    sites_file: PathBuf,
    encrypted_files_dir: PathBuf,
}

/// What a read-only look at the vault root found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    NoDirectory,
    DirectoryNoConfig,
    DirectoryWithConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultProbe {
    pub state: VaultState,
    pub sites_file_present: bool,
    pub encrypted_files_dir_present: bool,
}

impl VaultLayout {
    /// Build a layout under `root` using the file names from `names`.
    ///
    /// `names.root` is ignored; the explicit `root` wins.
    pub fn new(root: impl Into<PathBuf>, names: &VaultConfig) -> Self {
        let root = root.into();
        Self {
            config_file: root.join(&names.config_file),
            sites_file: root.join(&names.sites_file),
            encrypted_files_dir: root.join(&names.encrypted_files_dir),
            root,
        }
    }

    /// Resolve the layout from configuration.
    ///
    /// A configured root of `~` or `~/...` is expanded against the home
    /// directory. Without a configured root the vault lives at
    /// `<home>/.secman`.
    pub fn from_config(config: &SecmanConfig) -> Result<Self> {
        let root = match config.vault.root.as_deref() {
            Some(root) => expand_home(root)?,
            None => home_dir()?.join(DEFAULT_VAULT_DIR_NAME),
        };
        Ok(Self::new(root, &config.vault))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn sites_file(&self) -> &Path {
        &self.sites_file
    }

    pub fn encrypted_files_dir(&self) -> &Path {
        &self.encrypted_files_dir
    }

    /// Inspect the vault without modifying anything.
    pub fn probe(&self) -> Result<VaultProbe> {
        match std::fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(SecmanError::io(
                    "inspect vault directory",
                    &self.root,
                    io::Error::new(io::ErrorKind::NotADirectory, "path exists but is not a directory"),
                ));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(root = %self.root.display(), "vault directory absent");
                return Ok(VaultProbe {
                    state: VaultState::NoDirectory,
                    sites_file_present: false,
                    encrypted_files_dir_present: false,
                });
            }
            Err(e) => return Err(SecmanError::io("inspect vault directory", &self.root, e)),
        }

        let config_present =
            entry_present(&self.config_file, EntryKind::File, "inspect config record")?;
        let sites_file_present =
            entry_present(&self.sites_file, EntryKind::File, "inspect site store")?;
        let encrypted_files_dir_present = entry_present(
            &self.encrypted_files_dir,
            EntryKind::Directory,
            "inspect encrypted files directory",
        )?;

        let state = if config_present {
            VaultState::DirectoryWithConfig
        } else {
            VaultState::DirectoryNoConfig
        };
        debug!(
            root = %self.root.display(),
            ?state,
            sites_file_present,
            encrypted_files_dir_present,
            "probed vault"
        );

        Ok(VaultProbe {
            state,
            sites_file_present,
            encrypted_files_dir_present,
        })
    }

    /// Exclusively create the config record file.
    ///
    /// This is the only place that reports [`SecmanError::AlreadyInitialized`].
    pub fn create_config_file(&self) -> Result<File> {
        match create_new_private(&self.config_file) {
            Ok(file) => {
                debug!(path = %self.config_file.display(), "created config record file");
                Ok(file)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(SecmanError::AlreadyInitialized {
                    path: self.config_file.clone(),
                })
            }
            Err(e) => Err(SecmanError::io("create config record", &self.config_file, e)),
        }
    }

    /// Create the site store holding `[]`, unless one already exists.
    ///
    /// Returns whether the file was created. An existing store is left
    /// untouched.
    pub fn create_sites_file(&self) -> Result<bool> {
        let mut file = match create_new_private(&self.sites_file) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                entry_present(&self.sites_file, EntryKind::File, "inspect site store")?;
                debug!(path = %self.sites_file.display(), "site store already present");
                return Ok(false);
            }
            Err(e) => return Err(SecmanError::io("create site store", &self.sites_file, e)),
        };

        file.write_all(EMPTY_SITE_STORE)
            .and_then(|()| file.sync_all())
            .map_err(|e| SecmanError::io("write site store", &self.sites_file, e))?;

        debug!(path = %self.sites_file.display(), "created site store");
        Ok(true)
    }
}

/// Create a directory (and missing parents) with mode `0700`.
///
/// A directory that already exists is accepted as is.
pub fn create_dir_private(path: &Path) -> Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder
        .create(path)
        .map_err(|e| SecmanError::io("create directory", path, e))?;
    debug!(path = %path.display(), "directory ready");
    Ok(())
}

/// Atomically create a new file with mode `0600`.
///
/// Fails with [`io::ErrorKind::AlreadyExists`] if anything is at `path`.
pub fn create_new_private(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Directory,
}

/// Whether `path` exists as the expected kind of entry.
///
/// An entry of the other kind is an error, never "present".
fn entry_present(path: &Path, kind: EntryKind, context: &str) -> Result<bool> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(SecmanError::io(context, path, e)),
    };

    match kind {
        EntryKind::Directory if !meta.is_dir() => Err(SecmanError::io(
            context,
            path,
            io::Error::new(io::ErrorKind::NotADirectory, "path exists but is not a directory"),
        )),
        EntryKind::File if !meta.is_file() => Err(SecmanError::io(
            context,
            path,
            io::Error::new(io::ErrorKind::IsADirectory, "path exists but is not a regular file"),
        )),
        _ => Ok(true),
    }
}

fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        SecmanError::Config("cannot determine home directory; set vault.root".to_string())
    })
}

fn expand_home(root: &str) -> Result<PathBuf> {
    if root == "~" {
        return home_dir();
    }
    match root.strip_prefix("~/") {
        Some(rest) => Ok(home_dir()?.join(rest)),
        None => Ok(PathBuf::from(root)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_in(dir: &Path) -> VaultLayout {
        VaultLayout::new(dir.join("vault"), &VaultConfig::default())
    }

    #[test]
    fn layout_joins_names_under_root() {
        let layout = VaultLayout::new("/srv/vault", &VaultConfig::default());
        assert_eq!(layout.config_file(), Path::new("/srv/vault/secman.json"));
        assert_eq!(layout.sites_file(), Path::new("/srv/vault/sites.json"));
        assert_eq!(layout.encrypted_files_dir(), Path::new("/srv/vault/files"));
    }

    #[test]
    fn from_config_uses_explicit_root() {
        let mut config = SecmanConfig::default();
        config.vault.root = Some("/opt/secrets".to_string());
        let layout = VaultLayout::from_config(&config).unwrap();
        assert_eq!(layout.root(), Path::new("/opt/secrets"));
    }

    #[test]
    fn probe_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let probe = layout_in(dir.path()).probe().unwrap();
        assert_eq!(probe.state, VaultState::NoDirectory);
        assert!(!probe.sites_file_present);
    }

    #[test]
    fn probe_distinguishes_config_presence() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        create_dir_private(layout.root()).unwrap();
        assert_eq!(layout.probe().unwrap().state, VaultState::DirectoryNoConfig);

        std::fs::write(layout.config_file(), b"").unwrap();
        assert_eq!(layout.probe().unwrap().state, VaultState::DirectoryWithConfig);
    }

    #[test]
    fn probe_rejects_root_that_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        std::fs::write(layout.root(), b"not a dir").unwrap();
        assert!(matches!(layout.probe(), Err(SecmanError::Io { .. })));
    }

    #[test]
    fn probe_rejects_wrong_kind_entries() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        create_dir_private(layout.root()).unwrap();
        std::fs::write(layout.encrypted_files_dir(), b"not a dir").unwrap();
        assert!(matches!(layout.probe(), Err(SecmanError::Io { .. })));

        std::fs::remove_file(layout.encrypted_files_dir()).unwrap();
        std::fs::create_dir(layout.sites_file()).unwrap();
        assert!(matches!(layout.probe(), Err(SecmanError::Io { .. })));
        assert!(matches!(layout.create_sites_file(), Err(SecmanError::Io { .. })));
    }

    #[test]
    fn create_dir_private_accepts_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a");
        create_dir_private(&path).unwrap();
        create_dir_private(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn config_file_creation_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        create_dir_private(layout.root()).unwrap();

        layout.create_config_file().unwrap();
        let err = layout.create_config_file().unwrap_err();
        assert!(err.is_already_initialized());
    }

    #[test]
    fn sites_file_is_created_once_and_never_clobbered() {
        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        create_dir_private(layout.root()).unwrap();

        assert!(layout.create_sites_file().unwrap());
        assert_eq!(std::fs::read(layout.sites_file()).unwrap(), EMPTY_SITE_STORE);

        std::fs::write(layout.sites_file(), b"[{\"site\":\"x\"}]").unwrap();
        assert!(!layout.create_sites_file().unwrap());
        assert_eq!(
            std::fs::read(layout.sites_file()).unwrap(),
            b"[{\"site\":\"x\"}]"
        );
    }

    #[cfg(unix)]
    #[test]
    fn created_paths_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let layout = layout_in(dir.path());
        create_dir_private(layout.root()).unwrap();
        layout.create_sites_file().unwrap();

        let dir_mode = std::fs::metadata(layout.root()).unwrap().permissions().mode();
        let file_mode = std::fs::metadata(layout.sites_file()).unwrap().permissions().mode();
        assert_eq!(dir_mode & 0o777, 0o700);
        assert_eq!(file_mode & 0o777, 0o600);
    }
}
