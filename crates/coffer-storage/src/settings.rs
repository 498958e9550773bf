// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the synchronous plaintext settings store.

use std::sync::{Mutex, MutexGuard};

use coffer_core::{CofferError, SettingsStore};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

/// Plaintext settings stored in the `settings` table.
pub struct SqliteSettingsStore {
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteSettingsStore {
    /// Wrap an open connection whose schema is already migrated.
    pub fn new(conn: rusqlite::Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, rusqlite::Connection>, CofferError> {
        self.conn
            .lock()
            .map_err(|_| CofferError::Internal("settings connection lock poisoned".to_string()))
    }
}

impl SettingsStore for SqliteSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>, CofferError> {
        self.conn()?
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(CofferError::storage)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CofferError> {
        self.conn()?
            .execute(
                "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(CofferError::storage)?;
        debug!(key = %key, len = value.len(), "settings entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CofferError> {
        self.conn()?
            .execute("DELETE FROM settings WHERE key = ?1", params![key])
            .map_err(CofferError::storage)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CofferError> {
        let removed = self
            .conn()?
            .execute("DELETE FROM settings", [])
            .map_err(CofferError::storage)?;
        debug!(removed, "settings store cleared");
        Ok(())
    }
}
