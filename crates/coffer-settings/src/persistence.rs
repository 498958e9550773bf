// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Split persistence: plaintext fields to the settings store, secrets
//! encrypted to the blob store.

use std::sync::Arc;

use coffer_core::{BlobStore, CofferError, SettingsStore};
use coffer_vault::{DerivedKey, SecretsStore};
use tracing::{debug, info};

use crate::model::{SecretSettings, Settings};

/// Settings store key holding the plaintext JSON.
pub const SETTINGS_KEY: &str = "settings";

/// Saves and loads [`Settings`] across both stores.
pub struct SettingsPersistence {
    plain: Arc<dyn SettingsStore>,
    blobs: Arc<dyn BlobStore>,
    secrets: SecretsStore,
}

impl SettingsPersistence {
    pub fn new(plain: Arc<dyn SettingsStore>, blobs: Arc<dyn BlobStore>) -> Self {
        let secrets = SecretsStore::new(Arc::clone(&blobs));
        Self {
            plain,
            blobs,
            secrets,
        }
    }

    /// Persist `settings`.
    ///
    /// With a key, the secret sub-object is encrypted and stored first.
    /// Without one, stored secrets are left as they are. The plaintext entry
    /// is written in both cases and never includes secrets.
    pub async fn save(&self, settings: &Settings, key: Option<&DerivedKey>) -> Result<(), CofferError> {
        if let Some(key) = key {
            self.secrets.save(&settings.secrets, key).await?;
        }

        let json = serde_json::to_string(settings)?;
        self.plain.set(SETTINGS_KEY, &json)?;
        debug!(with_secrets = key.is_some(), "settings saved");
        Ok(())
    }

    /// Load settings, merging in secrets when a key is given.
    ///
    /// Returns [`Settings::default`] when nothing has been saved. Secrets are
    /// empty without a key, and also when they cannot be decrypted.
    pub async fn load(&self, key: Option<&DerivedKey>) -> Result<Settings, CofferError> {
        let Some(json) = self.plain.get(SETTINGS_KEY)? else {
            debug!("no stored settings; using defaults");
            return Ok(Settings::default());
        };

        let mut settings: Settings = serde_json::from_str(&json)?;
        settings.secrets = match key {
            Some(key) => self
                .secrets
                .load::<SecretSettings>(key)
                .await?
                .unwrap_or_default(),
            None => SecretSettings::default(),
        };
        Ok(settings)
    }

    /// Erase every entry in both stores, including the salt.
    pub async fn clear_all(&self) -> Result<(), CofferError> {
        self.plain.clear()?;
        self.blobs.clear().await?;
        info!("all settings and secrets cleared");
        Ok(())
    }
}
