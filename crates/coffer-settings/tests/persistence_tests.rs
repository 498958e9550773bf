// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings persistence against a real SQLite database.

use std::sync::Arc;

use coffer_config::model::{StorageConfig, VaultConfig};
use coffer_core::{BlobStore, SettingsStore};
use coffer_settings::{
    apply_action, Repository, Settings, SettingsAction, SettingsPersistence, SETTINGS_KEY,
};
use coffer_storage::Database;
use coffer_vault::{unlock, DATA_KEY, NONCE_KEY, SALT_KEY};
use secrecy::SecretString;
use tempfile::tempdir;

struct Session {
    plain: Arc<dyn SettingsStore>,
    blobs: Arc<dyn BlobStore>,
    persistence: SettingsPersistence,
    _db: Database,
}

async fn open(dir: &tempfile::TempDir) -> Session {
    let config = StorageConfig {
        database_path: dir.path().join("coffer.db").display().to_string(),
        wal_mode: true,
    };
    let db = Database::open_with_config(&config).await.unwrap();
    let plain: Arc<dyn SettingsStore> = db.settings_store();
    let blobs: Arc<dyn BlobStore> = db.blob_store();
    let persistence = SettingsPersistence::new(plain.clone(), blobs.clone());
    Session {
        plain,
        blobs,
        persistence,
        _db: db,
    }
}

fn passphrase(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

#[tokio::test]
async fn settings_and_secrets_survive_a_restart() {
    let dir = tempdir().unwrap();
    let vault = VaultConfig::default();

    {
        let session = open(&dir).await;
        let key = unlock(session.blobs.clone(), &passphrase("pw"), &vault)
            .await
            .unwrap();

        let mut settings = apply_action(
            Settings::default(),
            SettingsAction {
                font_size: Some(12),
                repositories: Some(vec![Repository {
                    path: "/src/coffer".to_string(),
                    name: "coffer".to_string(),
                }]),
                ..SettingsAction::default()
            },
        );
        settings.secrets.set_token("github.com", "ghp_persisted");
        session.persistence.save(&settings, Some(&key)).await.unwrap();
    }

    let session = open(&dir).await;

    let without_key = session.persistence.load(None).await.unwrap();
    assert_eq!(without_key.font_size, 12);
    assert_eq!(without_key.repositories.len(), 1);
    assert!(without_key.secrets.is_empty());

    let key = unlock(session.blobs.clone(), &passphrase("pw"), &vault)
        .await
        .unwrap();
    let with_key = session.persistence.load(Some(&key)).await.unwrap();
    assert_eq!(with_key.secrets.token_for("github.com"), Some("ghp_persisted"));

    let stored = session.plain.get(SETTINGS_KEY).unwrap().unwrap();
    assert!(!stored.contains("ghp_persisted"));
}

#[tokio::test]
async fn wrong_passphrase_after_restart_yields_empty_secrets() {
    let dir = tempdir().unwrap();
    let vault = VaultConfig::default();

    {
        let session = open(&dir).await;
        let key = unlock(session.blobs.clone(), &passphrase("right"), &vault)
            .await
            .unwrap();
        let mut settings = Settings::default();
        settings.secrets.set_token("gitlab.com", "glpat");
        session.persistence.save(&settings, Some(&key)).await.unwrap();
    }

    let session = open(&dir).await;
    let wrong = unlock(session.blobs.clone(), &passphrase("wrong"), &vault)
        .await
        .unwrap();
    let loaded = session.persistence.load(Some(&wrong)).await.unwrap();
    assert!(loaded.secrets.is_empty());
    assert_eq!(loaded.theme, Settings::default().theme);
}

#[tokio::test]
async fn clear_all_resets_the_installation() {
    let dir = tempdir().unwrap();
    let session = open(&dir).await;
    let key = unlock(session.blobs.clone(), &passphrase("pw"), &VaultConfig::default())
        .await
        .unwrap();

    let mut settings = Settings::default();
    settings.word_wrap = true;
    settings.secrets.set_token("github.com", "t");
    session.persistence.save(&settings, Some(&key)).await.unwrap();

    session.persistence.clear_all().await.unwrap();

    for entry in [SALT_KEY, DATA_KEY, NONCE_KEY] {
        assert!(session.blobs.get(entry).await.unwrap().is_none());
    }
    assert!(session.plain.get(SETTINGS_KEY).unwrap().is_none());
    assert_eq!(
        session.persistence.load(Some(&key)).await.unwrap(),
        Settings::default()
    );
}
