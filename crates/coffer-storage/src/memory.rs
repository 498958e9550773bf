// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory stores for tests and sessions that must not touch disk.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use coffer_core::{BlobStore, CofferError, SettingsStore};

/// A [`SettingsStore`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, CofferError> {
        self.entries
            .lock()
            .map_err(|_| CofferError::Internal("memory settings store poisoned".to_string()))
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, CofferError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CofferError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CofferError> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), CofferError> {
        self.entries()?.clear();
        Ok(())
    }
}

/// A [`BlobStore`] backed by a `HashMap`.
///
/// Counts every entry written so tests can assert that a read path never
/// writes.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: tokio::sync::Mutex<HashMap<String, Vec<u8>>>,
    writes: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of entries written since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of entries currently held.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CofferError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), CofferError> {
        self.set_many(&[(key, value)]).await
    }

    async fn set_many(&self, entries: &[(&str, &[u8])]) -> Result<(), CofferError> {
        let mut guard = self.entries.lock().await;
        for (key, value) in entries {
            guard.insert(key.to_string(), value.to_vec());
        }
        self.writes.fetch_add(entries.len(), Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CofferError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), CofferError> {
        self.entries.lock().await.clear();
        Ok(())
    }
}
