// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase acquisition via TTY prompt or the COFFER_PASSPHRASE environment variable.

use std::io::IsTerminal;

use coffer_config::PASSPHRASE_ENV_VAR;
use coffer_core::CofferError;
use secrecy::SecretString;

/// Get the passphrase from the environment or an interactive TTY prompt.
///
/// Priority:
/// 1. `COFFER_PASSPHRASE` environment variable (scripts, CI)
/// 2. Interactive TTY prompt via `rpassword`
pub fn get_passphrase() -> Result<SecretString, CofferError> {
    if let Some(passphrase) = from_env() {
        return Ok(passphrase);
    }

    if std::io::stdin().is_terminal() {
        let passphrase = read("Passphrase: ")?;
        return non_empty(passphrase);
    }

    Err(no_passphrase())
}

/// Get a new passphrase, prompting twice and requiring both entries to match.
///
/// Used the first time secrets are written. The environment variable needs
/// no confirmation.
pub fn get_passphrase_with_confirm() -> Result<SecretString, CofferError> {
    if let Some(passphrase) = from_env() {
        return Ok(passphrase);
    }

    if std::io::stdin().is_terminal() {
        let first = read("New passphrase: ")?;
        let second = read("Confirm passphrase: ")?;
        if first != second {
            return Err(CofferError::Vault("passphrases do not match".to_string()));
        }
        return non_empty(first);
    }

    Err(no_passphrase())
}

fn from_env() -> Option<SecretString> {
    std::env::var(PASSPHRASE_ENV_VAR)
        .ok()
        .filter(|value| !value.is_empty())
        .map(SecretString::from)
}

fn read(prompt: &str) -> Result<String, CofferError> {
    rpassword::prompt_password(prompt)
        .map_err(|e| CofferError::Vault(format!("failed to read passphrase: {e}")))
}

fn non_empty(passphrase: String) -> Result<SecretString, CofferError> {
    if passphrase.is_empty() {
        return Err(CofferError::Vault("empty passphrase not allowed".to_string()));
    }
    Ok(SecretString::from(passphrase))
}

fn no_passphrase() -> CofferError {
    CofferError::Vault(format!(
        "no passphrase provided; set {PASSPHRASE_ENV_VAR} or run interactively"
    ))
}
