// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the asynchronous blob store.

use async_trait::async_trait;
use coffer_core::{BlobStore, CofferError};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use crate::database::map_tr_err;

/// Binary entries stored in the `blobs` table.
///
/// All calls go through one `tokio-rusqlite` connection, so writes are
/// serialized on its background thread.
pub struct SqliteBlobStore {
    conn: tokio_rusqlite::Connection,
}

impl SqliteBlobStore {
    /// Wrap an open connection whose schema is already migrated.
    pub fn new(conn: tokio_rusqlite::Connection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl BlobStore for SqliteBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CofferError> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<Option<Vec<u8>>, rusqlite::Error> {
                conn.query_row(
                    "SELECT value FROM blobs WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()
            })
            .await
            .map_err(map_tr_err)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), CofferError> {
        self.set_many(&[(key, value)]).await
    }

    /// Writes every entry inside one transaction: either all land or none do.
    async fn set_many(&self, entries: &[(&str, &[u8])]) -> Result<(), CofferError> {
        let owned: Vec<(String, Vec<u8>)> = entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_vec()))
            .collect();
        let count = owned.len();

        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                let tx = conn.transaction()?;
                for (key, value) in &owned {
                    tx.execute(
                        "INSERT OR REPLACE INTO blobs (key, value) VALUES (?1, ?2)",
                        params![key, value],
                    )?;
                }
                tx.commit()
            })
            .await
            .map_err(map_tr_err)?;

        debug!(count, "blob entries written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), CofferError> {
        let key = key.to_string();
        self.conn
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute("DELETE FROM blobs WHERE key = ?1", params![key])?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn clear(&self) -> Result<(), CofferError> {
        let removed = self
            .conn
            .call(|conn| -> Result<usize, rusqlite::Error> {
                conn.execute("DELETE FROM blobs", [])
            })
            .await
            .map_err(map_tr_err)?;
        debug!(removed, "blob store cleared");
        Ok(())
    }
}
