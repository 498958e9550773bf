// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-installation key derivation salt.
//!
//! The salt is generated once, on the first unlock, and stored in the blob
//! store under [`SALT_KEY`]. It is never regenerated: a new salt would derive
//! new keys and strand every secret encrypted under the old ones.

use std::sync::Arc;

use coffer_core::{BlobStore, CofferError};
use ring::rand::{SecureRandom, SystemRandom};
use tracing::{debug, info};

/// Blob store key holding the salt.
pub const SALT_KEY: &str = "salt";

/// Salt length in bytes.
pub const SALT_LEN: usize = 8;

/// Random, non-secret value mixed into key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    pub const fn from_bytes(bytes: [u8; SALT_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }

    /// Draw a fresh salt from the system CSPRNG.
    pub fn generate() -> Result<Self, CofferError> {
        let rng = SystemRandom::new();
        let mut bytes = [0u8; SALT_LEN];
        rng.fill(&mut bytes)
            .map_err(|_| CofferError::Vault("failed to generate random salt".to_string()))?;
        Ok(Self(bytes))
    }
}

/// Reads the installation salt, creating it on first use.
pub struct SaltStore {
    blobs: Arc<dyn BlobStore>,
}

impl SaltStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Return the persisted salt, generating and persisting one if absent.
    ///
    /// Writes at most once per installation. A stored value of the wrong
    /// length is reported as corruption rather than replaced.
    pub async fn get_or_create_salt(&self) -> Result<Salt, CofferError> {
        if let Some(stored) = self.blobs.get(SALT_KEY).await? {
            let bytes: [u8; SALT_LEN] = stored.try_into().map_err(|v: Vec<u8>| {
                CofferError::Vault(format!(
                    "corrupted salt (expected {SALT_LEN} bytes, found {})",
                    v.len()
                ))
            })?;
            debug!("using existing salt");
            return Ok(Salt(bytes));
        }

        let salt = Salt::generate()?;
        self.blobs.set(SALT_KEY, salt.as_bytes()).await?;
        info!("generated installation salt");
        Ok(salt)
    }
}
