// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 key derivation from a password.
//!
//! Derivation is deterministic: the same password, salt, and iteration count
//! always produce the same key, which is what lets a later session decrypt
//! blobs written by an earlier one.

use std::num::NonZeroU32;
use std::sync::Arc;

use coffer_config::model::VaultConfig;
use coffer_core::{BlobStore, CofferError};
use ring::pbkdf2;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use zeroize::Zeroizing;

use crate::codec;
use crate::salt::{Salt, SaltStore};

/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// A 256-bit key derived from a password and salt.
///
/// Lives only for the session that derived it, is never persisted, and is
/// zeroed on drop. Debug output omits the key bytes.
#[derive(Clone)]
pub struct DerivedKey(Zeroizing<[u8; KEY_LEN]>);

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub(crate) fn expose(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

// Slice comparison short-circuits, so equality exists for tests only.
#[cfg(test)]
impl PartialEq for DerivedKey {
    fn eq(&self, other: &Self) -> bool {
        self.0[..] == other.0[..]
    }
}

#[cfg(test)]
impl Eq for DerivedKey {}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DerivedKey").field(&"[REDACTED]").finish()
    }
}

/// Derive a key from `password` and `salt` with PBKDF2-HMAC-SHA256.
///
/// Any password is accepted, including the empty string.
pub fn derive_key(password: &str, salt: &Salt, iterations: u32) -> Result<DerivedKey, CofferError> {
    let iterations = NonZeroU32::new(iterations)
        .ok_or_else(|| CofferError::Vault("PBKDF2 iteration count must be non-zero".to_string()))?;

    let secret = Zeroizing::new(codec::encode_text(password));
    Ok(DerivedKey(stretch(&secret, salt.as_bytes(), iterations)))
}

fn stretch(secret: &[u8], salt: &[u8], iterations: NonZeroU32) -> Zeroizing<[u8; KEY_LEN]> {
    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        secret,
        &mut output[..],
    );
    output
}

/// Obtain the session key: fetch (or create) the installation salt, then
/// derive from the passphrase with the configured iteration count.
pub async fn unlock(
    blobs: Arc<dyn BlobStore>,
    passphrase: &SecretString,
    config: &VaultConfig,
) -> Result<DerivedKey, CofferError> {
    let salt = SaltStore::new(blobs).get_or_create_salt().await?;
    let key = derive_key(passphrase.expose_secret(), &salt, config.kdf_iterations)?;
    debug!(iterations = config.kdf_iterations, "session key derived");
    Ok(key)
}

#[cfg(test)]
mod tests {
    use coffer_storage::MemoryBlobStore;

    use super::*;

    const SALT: Salt = Salt::from_bytes([1, 2, 3, 4, 5, 6, 7, 8]);

    fn iterations(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn stretch_matches_published_vectors() {
        let one = stretch(b"password", b"salt", iterations(1));
        assert_eq!(
            hex::encode(*one),
            "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
        );

        let many = stretch(b"password", b"salt", iterations(4096));
        assert_eq!(
            hex::encode(*many),
            "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a"
        );
    }

    #[test]
    fn derive_key_is_deterministic() {
        let key1 = derive_key("correct horse", &SALT, 1000).unwrap();
        let key2 = derive_key("correct horse", &SALT, 1000).unwrap();
        assert_eq!(key1, key2);
    }

    #[test]
    fn different_password_produces_different_key() {
        let key1 = derive_key("password one", &SALT, 1000).unwrap();
        let key2 = derive_key("password two", &SALT, 1000).unwrap();
        assert_ne!(key1, key2);
    }

    #[test]
    fn different_salt_produces_different_key() {
        let other = Salt::from_bytes([8, 7, 6, 5, 4, 3, 2, 1]);
        let key1 = derive_key("same", &SALT, 1000).unwrap();
        let key2 = derive_key("same", &other, 1000).unwrap();
        assert_ne!(key1, key2);
    }

    #[test]
    fn empty_password_is_accepted() {
        assert!(derive_key("", &SALT, 1000).is_ok());
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let err = derive_key("pw", &SALT, 0).unwrap_err();
        assert!(matches!(err, CofferError::Vault(_)));
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = DerivedKey::from_bytes([0xab; KEY_LEN]);
        let rendered = format!("{key:?}");
        assert_eq!(rendered, "DerivedKey(\"[REDACTED]\")");
    }

    #[tokio::test]
    async fn unlock_reuses_salt_across_sessions() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let passphrase = SecretString::from("hunter2".to_string());
        let config = VaultConfig::default();

        let first = unlock(blobs.clone(), &passphrase, &config).await.unwrap();
        let second = unlock(blobs.clone(), &passphrase, &config).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(blobs.write_count(), 1);
    }
}
