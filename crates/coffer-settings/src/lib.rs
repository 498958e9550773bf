// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings model, reducer, and persistence for Coffer.
//!
//! Plaintext preferences are stored as one JSON entry; the secret
//! sub-object goes through `coffer-vault` and is only ever written encrypted.

pub mod action;
pub mod model;
pub mod persistence;

pub use action::{apply_action, SettingsAction};
pub use model::{AuthToken, Repository, SecretSettings, Settings};
pub use persistence::{SettingsPersistence, SETTINGS_KEY};
