// SPDX-FileCopyrightText: 2026 Secman Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The vault's X25519 master keypair.

use secman_core::Result;
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::Zeroizing;

use crate::rng::RandomSource;

/// Length of both halves of the keypair.
pub const KEY_BYTES: usize = 32;

/// An X25519 keypair. The secret half is zeroed on drop.
pub struct MasterKeypair {
    secret: StaticSecret,
    public: PublicKey,
}

impl MasterKeypair {
    /// Generate a keypair seeded only from `rng`.
    pub fn generate(rng: &dyn RandomSource) -> Result<Self> {
        let mut seed = Zeroizing::new([0u8; KEY_BYTES]);
        rng.fill(seed.as_mut())?;
        Ok(Self::from_private_bytes(&seed))
    }

    /// Rebuild a keypair from its private half.
    ///
    /// `bytes` stays with the caller, who is responsible for wiping it.
    pub fn from_private_bytes(bytes: &[u8; KEY_BYTES]) -> Self {
        let secret = StaticSecret::from(*bytes);
        let public = PublicKey::from(&secret);
        Self { secret, public }
    }

    pub fn public_bytes(&self) -> [u8; KEY_BYTES] {
        self.public.to_bytes()
    }

    pub fn private_bytes(&self) -> Zeroizing<[u8; KEY_BYTES]> {
        Zeroizing::new(self.secret.to_bytes())
    }
}

impl std::fmt::Debug for MasterKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKeypair")
            .field("public", &hex::encode(self.public.as_bytes()))
            .field("private", &"[REDACTED]")
            .finish()
    }
}
