// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations.
//!
//! Every call to [`seal`] draws a fresh 96-bit nonce from the supplied
//! randomness source. The sealed blob is `nonce || ciphertext || tag`.

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use secman_core::{Result, SecmanError};
use zeroize::Zeroizing;

use crate::kdf::KEY_LEN;
use crate::rng::{random_array, RandomSource};

/// GCM authentication tag length.
pub const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key`, returning the self-contained sealed blob.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8], rng: &dyn RandomSource) -> Result<Vec<u8>> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| SecmanError::Seal("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let nonce_bytes: [u8; NONCE_LEN] = random_array(rng)?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    let mut in_out = Zeroizing::new(plaintext.to_vec());
    less_safe
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut *in_out)
        .map_err(|_| SecmanError::Seal("AES-256-GCM encryption failed".to_string()))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + in_out.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&in_out);
    Ok(blob)
}

/// Decrypt a blob produced by [`seal`].
///
/// A wrong key, a modified byte, or a truncated blob all yield
/// [`SecmanError::Authentication`].
pub fn open(key: &[u8; KEY_LEN], blob: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(SecmanError::Authentication(format!(
            "sealed blob is {} bytes, shorter than nonce and tag",
            blob.len()
        )));
    }

    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| SecmanError::Authentication("failed to create AES-256-GCM key".to_string()))?;
    let less_safe = LessSafeKey::new(unbound);

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
        .map_err(|_| SecmanError::Authentication("malformed nonce".to_string()))?;

    let mut in_out = Zeroizing::new(ciphertext.to_vec());
    let plaintext_len = less_safe
        .open_in_place(nonce, Aad::empty(), &mut *in_out)
        .map_err(|_| {
            SecmanError::Authentication("wrong password or corrupted sealed key".to_string())
        })?
        .len();

    in_out.truncate(plaintext_len);
    Ok(in_out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SystemRandomSource;

    fn key(byte: u8) -> [u8; KEY_LEN] {
        [byte; KEY_LEN]
    }

    #[test]
    fn seal_open_roundtrip() {
        let rng = SystemRandomSource::new();
        let blob = seal(&key(1), b"private key bytes", &rng).unwrap();
        let opened = open(&key(1), &blob).unwrap();
        assert_eq!(opened.as_slice(), b"private key bytes");
    }

    #[test]
    fn seal_produces_different_blobs_for_same_plaintext() {
        let rng = SystemRandomSource::new();
        let a = seal(&key(1), b"same input twice", &rng).unwrap();
        let b = seal(&key(1), b"same input twice", &rng).unwrap();
        assert_ne!(&a[..NONCE_LEN], &b[..NONCE_LEN]);
        assert_ne!(a, b);
    }

    #[test]
    fn blob_carries_nonce_and_tag() {
        let rng = SystemRandomSource::new();
        let blob = seal(&key(1), &[0u8; 32], &rng).unwrap();
        assert_eq!(blob.len(), NONCE_LEN + 32 + TAG_LEN);
    }

    #[test]
    fn open_with_wrong_key_fails() {
        let rng = SystemRandomSource::new();
        let blob = seal(&key(1), b"secret", &rng).unwrap();
        let err = open(&key(2), &blob).unwrap_err();
        assert!(matches!(err, SecmanError::Authentication(_)));
    }

    #[test]
    fn tampered_blob_fails() {
        let rng = SystemRandomSource::new();
        let mut blob = seal(&key(1), b"do not tamper", &rng).unwrap();
        let last = blob.len() - 1;
        blob[last] ^= 0x01;
        assert!(matches!(
            open(&key(1), &blob),
            Err(SecmanError::Authentication(_))
        ));
    }

    #[test]
    fn truncated_blob_fails() {
        let rng = SystemRandomSource::new();
        let blob = seal(&key(1), b"abc", &rng).unwrap();
        assert!(matches!(
            open(&key(1), &blob[..NONCE_LEN + 4]),
            Err(SecmanError::Authentication(_))
        ));
        assert!(matches!(
            open(&key(1), &[]),
            Err(SecmanError::Authentication(_))
        ));
    }
}
