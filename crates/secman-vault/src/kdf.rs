// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Argon2id key derivation from the master password.
//!
//! The cost parameters are compiled in rather than configured. A vault is
//! only openable with the parameters it was created with, and the record
//! format does not carry them.

use secman_core::{Result, SecmanError};
use zeroize::Zeroizing;

use crate::rng::{random_array, RandomSource};

/// Salt length in bytes.
pub const SALT_LEN: usize = 32;

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Memory cost in KiB (64 MiB).
pub const MEMORY_COST_KIB: u32 = 64 * 1024;

/// Number of passes over memory.
pub const ITERATIONS: u32 = 3;

/// Degree of parallelism.
pub const PARALLELISM: u32 = 1;

/// A symmetric key derived from the master password.
///
/// Zeroed on drop. `Debug` never prints the bytes.
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive a 32-byte key from `password` and a 32-byte `salt` using Argon2id.
///
/// Deterministic for a given input pair. Any password content, including the
/// empty string, is accepted here; emptiness is policed by the caller.
pub fn derive_key(password: &[u8], salt: &[u8]) -> Result<DerivedKey> {
    if salt.len() != SALT_LEN {
        return Err(SecmanError::Derivation(format!(
            "salt must be {SALT_LEN} bytes, got {}",
            salt.len()
        )));
    }

    let params = argon2::Params::new(MEMORY_COST_KIB, ITERATIONS, PARALLELISM, Some(KEY_LEN))
        .map_err(|e| SecmanError::Derivation(format!("invalid Argon2id parameters: {e}")))?;

    let argon2 = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password, salt, output.as_mut())
        .map_err(|e| SecmanError::Derivation(format!("Argon2id key derivation failed: {e}")))?;

    Ok(DerivedKey(output))
}

/// Generate a fresh salt for a new vault.
pub fn generate_salt(rng: &dyn RandomSource) -> Result<[u8; SALT_LEN]> {
    random_array(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SystemRandomSource;

    #[test]
    fn derive_key_produces_consistent_output() {
        let salt = [1u8; SALT_LEN];

        let key1 = derive_key(b"test password", &salt).unwrap();
        let key2 = derive_key(b"test password", &salt).unwrap();

        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn different_password_produces_different_key() {
        let salt = [2u8; SALT_LEN];

        let key1 = derive_key(b"password one", &salt).unwrap();
        let key2 = derive_key(b"password two", &salt).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn different_salt_produces_different_key() {
        let key1 = derive_key(b"same password", &[1u8; SALT_LEN]).unwrap();
        let key2 = derive_key(b"same password", &[2u8; SALT_LEN]).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn empty_password_still_derives() {
        assert!(derive_key(b"", &[3u8; SALT_LEN]).is_ok());
    }

    #[test]
    fn short_salt_is_rejected() {
        let err = derive_key(b"pw", &[0u8; 16]).unwrap_err();
        assert!(matches!(err, SecmanError::Derivation(_)));
    }

    #[test]
    fn long_salt_is_rejected() {
        let err = derive_key(b"pw", &[0u8; 33]).unwrap_err();
        assert!(matches!(err, SecmanError::Derivation(_)));
    }

    #[test]
    fn generate_salt_produces_random_values() {
        let rng = SystemRandomSource::new();
        assert_ne!(generate_salt(&rng).unwrap(), generate_salt(&rng).unwrap());
    }

    #[test]
    fn debug_redacts_key_bytes() {
        let key = derive_key(b"pw", &[4u8; SALT_LEN]).unwrap();
        let debug = format!("{key:?}");
        assert_eq!(debug, "DerivedKey([REDACTED])");
    }
}
