// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Synchronous key-value store for plaintext settings.

use crate::error::CofferError;

/// A small synchronous store mapping string keys to UTF-8 text.
///
/// Holds only non-secret data. Implementations must be safe to share across
/// tasks; calls block the current thread until the write is durable.
pub trait SettingsStore: Send + Sync {
    /// Returns the text stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, CofferError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), CofferError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), CofferError>;

    /// Removes every entry in the store.
    fn clear(&self) -> Result<(), CofferError>;
}
