// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Coffer.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Lowest PBKDF2 iteration count accepted by validation.
///
/// Blobs written by earlier installations were derived with exactly this
/// count, so it is also the default.
pub const MIN_KDF_ITERATIONS: u32 = 1000;

/// Top-level Coffer configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CofferConfig {
    /// Where the plaintext settings and encrypted blobs live.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Key derivation settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database holding both stores.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable SQLite write-ahead logging.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|d| d.join("coffer").join("coffer.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("coffer.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Key derivation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// PBKDF2-HMAC-SHA256 iteration count.
    ///
    /// Changing this makes previously stored secrets undecryptable.
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

fn default_kdf_iterations() -> u32 {
    MIN_KDF_ITERATIONS
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
