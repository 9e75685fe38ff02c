// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cryptographically secure randomness.
//!
//! Every generator in this crate (KDF salt, keypair seed, AEAD nonce) takes a
//! [`RandomSource`] argument. Production code passes [`SystemRandomSource`];
//! tests can substitute a deterministic or failing source.

use ring::rand::{SecureRandom, SystemRandom};
use secman_core::{Result, SecmanError};

/// A source of cryptographically secure random bytes.
pub trait RandomSource {
    /// Fill `dest` entirely, or fail with [`SecmanError::Entropy`].
    fn fill(&self, dest: &mut [u8]) -> Result<()>;
}

/// The operating system CSPRNG, via `ring`.
#[derive(Debug)]
pub struct SystemRandomSource {
    inner: SystemRandom,
}

impl SystemRandomSource {
    pub fn new() -> Self {
        Self {
            inner: SystemRandom::new(),
        }
    }
}

impl Default for SystemRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SystemRandomSource {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        self.inner.fill(dest).map_err(|_| {
            SecmanError::Entropy(format!(
                "system random source failed to produce {} bytes",
                dest.len()
            ))
        })
    }
}

/// Draw a fixed-size array from `rng`.
pub fn random_array<const N: usize>(rng: &dyn RandomSource) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    rng.fill(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl RandomSource for Broken {
        fn fill(&self, _dest: &mut [u8]) -> Result<()> {
            Err(SecmanError::Entropy("unavailable".to_string()))
        }
    }

    #[test]
    fn system_source_fills_distinct_values() {
        let rng = SystemRandomSource::new();
        let a: [u8; 32] = random_array(&rng).unwrap();
        let b: [u8; 32] = random_array(&rng).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn failing_source_propagates_entropy_error() {
        let err = random_array::<12>(&Broken).unwrap_err();
        assert!(matches!(err, SecmanError::Entropy(_)));
    }
}
