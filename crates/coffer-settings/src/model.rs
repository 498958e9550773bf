// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The settings aggregate and its defaults.
//!
//! [`Settings`] holds plaintext preferences plus a [`SecretSettings`]
//! sub-object. The secret part is skipped by serde, so serializing a
//! `Settings` can never emit a credential.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A source repository the user has registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Filesystem path to the repository root.
    pub path: String,
    /// Display name. Defaults to the last path component when added via the CLI.
    pub name: String,
}

/// Full application settings.
///
/// Fields missing from a stored entry take their default, so entries written
/// by older versions still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub repositories: Vec<Repository>,
    pub font_size: u32,
    pub theme: String,
    pub tab_size: u32,
    pub line_numbers: bool,
    pub word_wrap: bool,

    /// Credentials. Persisted only through the encrypted path.
    #[serde(skip)]
    pub secrets: SecretSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repositories: Vec::new(),
            font_size: 14,
            theme: "dark".to_string(),
            tab_size: 4,
            line_numbers: true,
            word_wrap: false,
            secrets: SecretSettings::default(),
        }
    }
}

/// A credential for one remote host.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct AuthToken {
    pub host: String,
    pub token: String,
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthToken")
            .field("host", &self.host)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// The secret sub-object of [`Settings`].
///
/// Zeroized on drop. Empty whenever the session has no key or the stored
/// secrets could not be decrypted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct SecretSettings {
    pub tokens: Vec<AuthToken>,
}

impl SecretSettings {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token stored for `host`, if any.
    pub fn token_for(&self, host: &str) -> Option<&str> {
        self.tokens
            .iter()
            .find(|t| t.host == host)
            .map(|t| t.token.as_str())
    }

    /// Insert or replace the token for `host`.
    pub fn set_token(&mut self, host: &str, token: &str) {
        match self.tokens.iter_mut().find(|t| t.host == host) {
            Some(existing) => {
                existing.token.zeroize();
                existing.token = token.to_string();
            }
            None => self.tokens.push(AuthToken {
                host: host.to_string(),
                token: token.to_string(),
            }),
        }
    }

    /// Remove the token for `host`. Returns whether one was present.
    pub fn remove_token(&mut self, host: &str) -> bool {
        let before = self.tokens.len();
        self.tokens.retain(|t| t.host != host);
        self.tokens.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_settings_never_contain_secrets() {
        let mut settings = Settings::default();
        settings.secrets.set_token("github.com", "ghp_topsecret");

        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("ghp_topsecret"));
        assert!(!json.contains("secrets"));
        assert!(!json.contains("github.com"));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(settings.theme, "light");
        assert_eq!(settings.font_size, Settings::default().font_size);
        assert!(settings.secrets.is_empty());
    }

    #[test]
    fn set_token_replaces_existing_host() {
        let mut secrets = SecretSettings::default();
        secrets.set_token("github.com", "old");
        secrets.set_token("gitlab.com", "other");
        secrets.set_token("github.com", "new");

        assert_eq!(secrets.tokens.len(), 2);
        assert_eq!(secrets.token_for("github.com"), Some("new"));
    }

    #[test]
    fn remove_token_reports_presence() {
        let mut secrets = SecretSettings::default();
        secrets.set_token("github.com", "t");
        assert!(secrets.remove_token("github.com"));
        assert!(!secrets.remove_token("github.com"));
        assert!(secrets.is_empty());
    }

    #[test]
    fn token_debug_is_redacted() {
        let mut secrets = SecretSettings::default();
        secrets.set_token("github.com", "ghp_topsecret");
        let rendered = format!("{secrets:?}");
        assert!(rendered.contains("github.com"));
        assert!(!rendered.contains("ghp_topsecret"));
    }
}
