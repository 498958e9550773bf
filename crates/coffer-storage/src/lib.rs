// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backing stores for the Coffer settings vault.
//!
//! Provides a WAL-mode SQLite database with embedded migrations that hands
//! out a synchronous plaintext [`SettingsStore`](coffer_core::SettingsStore)
//! and an asynchronous [`BlobStore`](coffer_core::BlobStore), plus in-memory
//! equivalents for tests.

pub mod blob;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod settings;

pub use blob::SqliteBlobStore;
pub use database::Database;
pub use memory::{MemoryBlobStore, MemorySettingsStore};
pub use settings::SqliteSettingsStore;
