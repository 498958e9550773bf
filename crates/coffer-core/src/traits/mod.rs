// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store contracts consumed by the vault and settings persistence.
//!
//! Two stores back every installation: a small synchronous text store for
//! plaintext settings and a larger asynchronous byte store for salts and
//! encrypted blobs. Both are injected as trait objects so callers can swap
//! SQLite for in-memory fakes.

pub mod blob;
pub mod settings;

pub use blob::BlobStore;
pub use settings::SettingsStore;
