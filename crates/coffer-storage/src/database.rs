// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database file management: PRAGMA setup, WAL mode, migrations, and the
//! two store handles that share one SQLite file.
//!
//! Plaintext settings go through a synchronous `rusqlite` connection. Blobs go
//! through `tokio-rusqlite`, whose single background thread serializes every
//! blob write.

use std::path::Path;
use std::sync::Arc;

use coffer_config::model::StorageConfig;
use coffer_core::CofferError;
use tracing::info;

use crate::blob::SqliteBlobStore;
use crate::migrations;
use crate::settings::SqliteSettingsStore;

/// An open Coffer database.
///
/// Clone the store handles out with [`Database::settings_store`] and
/// [`Database::blob_store`] and inject them where needed.
pub struct Database {
    settings: Arc<SqliteSettingsStore>,
    blobs: Arc<SqliteBlobStore>,
}

impl Database {
    /// Open (or create) the database at `path` and run pending migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, CofferError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(CofferError::storage)?;
        }

        let mut conn = rusqlite::Connection::open(path).map_err(CofferError::storage)?;
        conn.execute_batch(&pragmas(wal_mode))
            .map_err(CofferError::storage)?;
        migrations::run_migrations(&mut conn)?;

        let async_conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(CofferError::storage)?;
        async_conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;

        info!(path = %path, wal_mode, "database opened");
        Ok(Self {
            settings: Arc::new(SqliteSettingsStore::new(conn)),
            blobs: Arc::new(SqliteBlobStore::new(async_conn)),
        })
    }

    /// Open the database described by the storage section of the config.
    pub async fn open_with_config(config: &StorageConfig) -> Result<Self, CofferError> {
        Self::open(&config.database_path, config.wal_mode).await
    }

    /// Handle to the synchronous plaintext settings store.
    pub fn settings_store(&self) -> Arc<SqliteSettingsStore> {
        Arc::clone(&self.settings)
    }

    /// Handle to the asynchronous blob store.
    pub fn blob_store(&self) -> Arc<SqliteBlobStore> {
        Arc::clone(&self.blobs)
    }
}

fn pragmas(wal_mode: bool) -> String {
    let journal = if wal_mode { "WAL" } else { "DELETE" };
    format!(
        "PRAGMA journal_mode = {journal};\n\
         PRAGMA synchronous = NORMAL;\n\
         PRAGMA busy_timeout = 5000;"
    )
}

/// Convert tokio-rusqlite errors to [`CofferError::Storage`].
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> CofferError {
    CofferError::storage(e)
}
