// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password-derived encryption of Coffer's secret settings.
//!
//! A per-installation salt and the user's passphrase feed PBKDF2-HMAC-SHA256
//! to produce a session key. The key encrypts the secret settings with
//! AES-256-GCM under a fresh 128-bit nonce on every save. The key is held in
//! memory only; nothing derived from the passphrase is ever persisted.

pub mod codec;
pub mod crypto;
pub mod kdf;
pub mod prompt;
pub mod salt;
pub mod secrets;

pub use crypto::{decrypt, encrypt, AuthenticationFailure, Nonce};
pub use kdf::{derive_key, unlock, DerivedKey};
pub use prompt::{get_passphrase, get_passphrase_with_confirm};
pub use salt::{Salt, SaltStore, SALT_KEY};
pub use secrets::{SecretsStore, DATA_KEY, NONCE_KEY};
