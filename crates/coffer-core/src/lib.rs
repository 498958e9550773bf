// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Coffer settings vault.
//!
//! This crate provides the store contracts and the shared error type used
//! throughout the Coffer workspace. Storage backends implement the traits
//! defined here; the vault and settings crates only ever see trait objects.

pub mod error;
pub mod traits;

pub use error::CofferError;
pub use traits::{BlobStore, SettingsStore};
