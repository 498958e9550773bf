// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asynchronous key-value store for binary blobs.

use async_trait::async_trait;

use crate::error::CofferError;

/// A store mapping string keys to raw byte sequences.
///
/// Backs the salt, the encrypted secrets blob, and its nonce. Every method
/// is a suspension point; callers await each step before starting the next.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Returns the bytes stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CofferError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), CofferError>;

    /// Stores several entries as one logical write.
    ///
    /// The default writes each entry in order, so a failure part-way leaves
    /// earlier entries in place. Transactional backends override this to
    /// commit all entries or none.
    async fn set_many(&self, entries: &[(&str, &[u8])]) -> Result<(), CofferError> {
        for (key, value) in entries {
            self.set(key, value).await?;
        }
        Ok(())
    }

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), CofferError>;

    /// Removes every entry in the store.
    async fn clear(&self) -> Result<(), CofferError>;
}
