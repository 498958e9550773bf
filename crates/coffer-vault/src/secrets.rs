// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encrypted-at-rest storage of the secret settings sub-object.
//!
//! The ciphertext lives at [`DATA_KEY`] and its nonce at [`NONCE_KEY`]. A
//! fresh nonce is drawn on every save, so two saves of identical secrets
//! never produce the same ciphertext.

use std::sync::Arc;

use coffer_core::{BlobStore, CofferError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::codec;
use crate::crypto::{self, Nonce};
use crate::kdf::DerivedKey;

/// Blob store key holding the ciphertext (with tag).
pub const DATA_KEY: &str = "auth_data";

/// Blob store key holding the nonce for [`DATA_KEY`].
pub const NONCE_KEY: &str = "auth_nonce";

/// Saves and loads one encrypted secret value.
pub struct SecretsStore {
    blobs: Arc<dyn BlobStore>,
}

impl SecretsStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Encrypt `secret` under `key` and persist ciphertext and nonce together.
    pub async fn save<T: Serialize>(&self, secret: &T, key: &DerivedKey) -> Result<(), CofferError> {
        let plaintext = codec::encode_json(secret)?;
        let (ciphertext, nonce) = crypto::encrypt(&plaintext, key)?;

        self.blobs
            .set_many(&[
                (DATA_KEY, ciphertext.as_slice()),
                (NONCE_KEY, nonce.as_bytes().as_slice()),
            ])
            .await?;
        debug!(bytes = ciphertext.len(), "secrets saved");
        Ok(())
    }

    /// Load and decrypt the stored secret.
    ///
    /// Returns `Ok(None)` when nothing is stored, and also when the stored
    /// data cannot be decrypted or decoded under `key` (logged at warn).
    /// Only storage failures are errors.
    pub async fn load<T: DeserializeOwned>(&self, key: &DerivedKey) -> Result<Option<T>, CofferError> {
        let Some(ciphertext) = self.blobs.get(DATA_KEY).await? else {
            debug!("no stored secrets");
            return Ok(None);
        };
        let Some(nonce) = self.blobs.get(NONCE_KEY).await? else {
            warn!("stored secrets have no nonce; ignoring them");
            return Ok(None);
        };

        let nonce = match Nonce::try_from(nonce.as_slice()) {
            Ok(nonce) => nonce,
            Err(_) => {
                warn!(len = nonce.len(), "stored nonce has the wrong length; ignoring secrets");
                return Ok(None);
            }
        };

        let plaintext = match crypto::decrypt(&ciphertext, key, &nonce) {
            Ok(plaintext) => plaintext,
            Err(e) => {
                warn!(error = %e, "could not decrypt stored secrets");
                return Ok(None);
            }
        };

        match codec::decode_json(&plaintext) {
            Ok(secret) => Ok(Some(secret)),
            Err(e) => {
                warn!(error = %e, "decrypted secrets did not decode");
                Ok(None)
            }
        }
    }

    /// Remove the ciphertext and nonce entries.
    pub async fn clear(&self) -> Result<(), CofferError> {
        self.blobs.remove(DATA_KEY).await?;
        self.blobs.remove(NONCE_KEY).await?;
        Ok(())
    }
}
