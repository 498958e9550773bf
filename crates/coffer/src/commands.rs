// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Every command opens the configured database, works through
//! [`SettingsPersistence`], and only asks for the passphrase when it has to
//! read or write credentials.

use std::path::Path;
use std::sync::Arc;

use coffer_config::model::VaultConfig;
use coffer_config::CofferConfig;
use coffer_core::{BlobStore, CofferError};
use coffer_settings::{
    apply_action, Repository, SecretSettings, Settings, SettingsAction, SettingsPersistence,
};
use coffer_storage::Database;
use coffer_vault::{DerivedKey, SecretsStore, DATA_KEY, SALT_KEY};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{Commands, RepoCommands, SetArgs, TokenCommands};

/// Dispatch one parsed subcommand.
///
/// With `discard_unreadable`, credentials that no passphrase can decrypt are
/// treated as lost and replaced on the next save.
pub async fn run(
    command: Commands,
    config: &CofferConfig,
    discard_unreadable: bool,
) -> Result<(), CofferError> {
    let mut session = Session::open(config).await?;
    session.discard_unreadable = discard_unreadable;

    match command {
        Commands::Show { unlock } => {
            let key = if unlock { Some(session.unlock().await?) } else { None };
            let settings = session.persistence.load(key.as_ref()).await?;
            println!("{}", render_settings(&settings, key.is_some())?);
        }
        Commands::Set(args) => session.set(args).await?,
        Commands::Repo { action } => match action {
            RepoCommands::Add { path, name } => session.add_repo(path, name).await?,
            RepoCommands::Remove { path } => session.remove_repo(&path).await?,
        },
        Commands::Token { action } => {
            let key = session.unlock().await?;
            match action {
                TokenCommands::Set { host, token } => session.set_token(&key, &host, &token).await?,
                TokenCommands::Remove { host } => session.remove_token(&key, &host).await?,
            }
        }
        Commands::Reset { yes } => {
            if !yes {
                eprintln!("refusing to erase all settings and credentials without --yes");
                return Ok(());
            }
            session.persistence.clear_all().await?;
            println!("all settings and credentials erased");
        }
    }
    Ok(())
}

/// Open stores plus the vault parameters for one command.
struct Session {
    blobs: Arc<dyn BlobStore>,
    persistence: SettingsPersistence,
    vault: VaultConfig,
    discard_unreadable: bool,
}

impl Session {
    async fn open(config: &CofferConfig) -> Result<Self, CofferError> {
        let db = Database::open_with_config(&config.storage).await?;
        let blobs: Arc<dyn BlobStore> = db.blob_store();
        let persistence = SettingsPersistence::new(db.settings_store(), Arc::clone(&blobs));
        Ok(Self {
            blobs,
            persistence,
            vault: config.vault.clone(),
            discard_unreadable: false,
        })
    }

    /// Ask for the passphrase and derive the session key.
    ///
    /// The first unlock of an installation asks twice. A passphrase that does
    /// not open already-stored credentials is rejected here, so a typo can
    /// never overwrite them with an empty set. The stored pair may instead be
    /// torn or corrupt, in which case no passphrase opens it; the user can
    /// then pass `--discard-unreadable` to continue with empty credentials.
    async fn unlock(&self) -> Result<DerivedKey, CofferError> {
        let first_use = self.blobs.get(SALT_KEY).await?.is_none();
        let passphrase = if first_use {
            coffer_vault::get_passphrase_with_confirm()?
        } else {
            coffer_vault::get_passphrase()?
        };

        let key = coffer_vault::unlock(Arc::clone(&self.blobs), &passphrase, &self.vault).await?;
        self.check_key(&key).await?;
        Ok(key)
    }

    async fn check_key(&self, key: &DerivedKey) -> Result<(), CofferError> {
        if self.blobs.get(DATA_KEY).await?.is_none() {
            return Ok(());
        }
        let stored: Option<SecretSettings> = SecretsStore::new(Arc::clone(&self.blobs))
            .load(key)
            .await?;
        match stored {
            Some(_) => Ok(()),
            None if self.discard_unreadable => {
                warn!("stored credentials are unreadable; continuing with an empty set");
                Ok(())
            }
            None => Err(CofferError::Vault(
                "passphrase does not unlock the stored credentials (wrong passphrase, or the \
                 stored data is corrupt); rerun with --discard-unreadable to replace them"
                    .to_string(),
            )),
        }
    }

    async fn set(&self, args: SetArgs) -> Result<(), CofferError> {
        let action = SettingsAction {
            font_size: args.font_size,
            theme: args.theme,
            tab_size: args.tab_size,
            line_numbers: args.line_numbers,
            word_wrap: args.word_wrap,
            ..SettingsAction::default()
        };
        if action.is_empty() {
            println!("nothing to change");
            return Ok(());
        }

        let current = self.persistence.load(None).await?;
        let next = apply_action(current, action);
        self.persistence.save(&next, None).await?;
        debug!("preferences updated");
        Ok(())
    }

    async fn add_repo(&self, path: String, name: Option<String>) -> Result<(), CofferError> {
        let current = self.persistence.load(None).await?;
        if current.repositories.iter().any(|r| r.path == path) {
            println!("{path} is already registered");
            return Ok(());
        }

        let name = name.unwrap_or_else(|| default_repo_name(&path));
        let mut repositories = current.repositories.clone();
        repositories.push(Repository { path, name });

        let next = apply_action(
            current,
            SettingsAction {
                repositories: Some(repositories),
                ..SettingsAction::default()
            },
        );
        self.persistence.save(&next, None).await?;
        info!(count = next.repositories.len(), "repository added");
        Ok(())
    }

    async fn remove_repo(&self, path: &str) -> Result<(), CofferError> {
        let current = self.persistence.load(None).await?;
        let repositories: Vec<Repository> = current
            .repositories
            .iter()
            .filter(|r| r.path != path)
            .cloned()
            .collect();
        if repositories.len() == current.repositories.len() {
            println!("no repository registered at {path}");
            return Ok(());
        }

        let next = apply_action(
            current,
            SettingsAction {
                repositories: Some(repositories),
                ..SettingsAction::default()
            },
        );
        self.persistence.save(&next, None).await?;
        info!(count = next.repositories.len(), "repository removed");
        Ok(())
    }

    async fn set_token(&self, key: &DerivedKey, host: &str, token: &str) -> Result<(), CofferError> {
        let mut settings = self.persistence.load(Some(key)).await?;
        settings.secrets.set_token(host, token);
        self.persistence.save(&settings, Some(key)).await?;
        info!(host, "token stored");
        Ok(())
    }

    async fn remove_token(&self, key: &DerivedKey, host: &str) -> Result<(), CofferError> {
        let mut settings = self.persistence.load(Some(key)).await?;
        if !settings.secrets.remove_token(host) {
            println!("no token stored for {host}");
            return Ok(());
        }
        self.persistence.save(&settings, Some(key)).await?;
        info!(host, "token removed");
        Ok(())
    }
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    #[serde(flatten)]
    settings: &'a Settings,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<MaskedToken<'a>>>,
}

#[derive(Serialize)]
struct MaskedToken<'a> {
    host: &'a str,
    token: String,
}

/// Pretty JSON of `settings`, with masked tokens when `unlocked`.
fn render_settings(settings: &Settings, unlocked: bool) -> Result<String, CofferError> {
    let tokens = unlocked.then(|| {
        settings
            .secrets
            .tokens
            .iter()
            .map(|t| MaskedToken {
                host: &t.host,
                token: mask_secret(&t.token),
            })
            .collect::<Vec<_>>()
    });
    Ok(serde_json::to_string_pretty(&ShowOutput { settings, tokens })?)
}

/// Mask a secret for display, keeping four characters at each end of long
/// values (e.g. "ghp_...f3a9").
fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < 10 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}

fn default_repo_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
