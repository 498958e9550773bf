// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every Coffer crate.

use thiserror::Error;

/// The primary error type used across the store contracts, the vault, and
/// settings persistence.
///
/// Authenticated-decryption failures are not represented here. The cipher
/// reports them as `coffer_vault::AuthenticationFailure`.
#[derive(Debug, Error)]
pub enum CofferError {
    /// Configuration errors (invalid values, unreadable files).
    #[error("configuration error: {0}")]
    Config(String),

    /// Backing store errors (database open, query failure, poisoned handle).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Key derivation, randomness, or corrupted vault metadata.
    #[error("vault error: {0}")]
    Vault(String),

    /// JSON encoding or decoding of a settings payload failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Bytes that were expected to hold UTF-8 text did not.
    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CofferError {
    /// Wrap any backend error as [`CofferError::Storage`].
    pub fn storage<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        CofferError::Storage {
            source: Box::new(source),
        }
    }
}
