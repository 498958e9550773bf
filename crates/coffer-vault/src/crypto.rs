// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM encrypt/decrypt with a 128-bit nonce.
//!
//! Every call to [`encrypt`] draws a fresh random nonce from the system
//! CSPRNG and returns it next to the ciphertext. Callers cannot supply a
//! nonce, so they cannot reuse one.

use aes_gcm::aead::consts::U16;
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;
use coffer_core::CofferError;
use ring::rand::{SecureRandom, SystemRandom};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::kdf::DerivedKey;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 16;

/// GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// AES-256-GCM with a 16-byte IV.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// A single-use encryption nonce, persisted next to its ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    pub fn from_bytes(bytes: [u8; NONCE_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }

    fn generate() -> Result<Self, CofferError> {
        let rng = SystemRandom::new();
        let mut bytes = [0u8; NONCE_LEN];
        rng.fill(&mut bytes)
            .map_err(|_| CofferError::Vault("failed to generate random nonce".to_string()))?;
        Ok(Self(bytes))
    }
}

impl TryFrom<&[u8]> for Nonce {
    type Error = AuthenticationFailure;

    /// A stored nonce of the wrong length can never authenticate anything.
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let bytes: [u8; NONCE_LEN] = bytes.try_into().map_err(|_| AuthenticationFailure)?;
        Ok(Self(bytes))
    }
}

/// Decryption did not authenticate.
///
/// Covers a wrong key, a wrong nonce, and tampered or truncated ciphertext
/// alike; the cases are indistinguishable on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("authenticated decryption failed -- wrong key or corrupted data")]
pub struct AuthenticationFailure;

/// Encrypt `plaintext` under `key` with a fresh random nonce.
///
/// Returns `(ciphertext_with_tag, nonce)`; the tag is appended to the
/// ciphertext. Both must be stored to decrypt later.
pub fn encrypt(plaintext: &[u8], key: &DerivedKey) -> Result<(Vec<u8>, Nonce), CofferError> {
    let cipher = Aes256Gcm16::new(key.expose().into());
    let nonce = Nonce::generate()?;

    let ciphertext = cipher
        .encrypt(aes_gcm::Nonce::<U16>::from_slice(nonce.as_bytes()), plaintext)
        .map_err(|_| CofferError::Vault("AES-256-GCM encryption failed".to_string()))?;

    Ok((ciphertext, nonce))
}

/// Decrypt `ciphertext` (with its appended tag) under `key` and `nonce`.
///
/// The tag is verified in constant time before any plaintext is released.
pub fn decrypt(
    ciphertext: &[u8],
    key: &DerivedKey,
    nonce: &Nonce,
) -> Result<Zeroizing<Vec<u8>>, AuthenticationFailure> {
    if ciphertext.len() < TAG_LEN {
        return Err(AuthenticationFailure);
    }
    let cipher = Aes256Gcm16::new(key.expose().into());
    cipher
        .decrypt(aes_gcm::Nonce::<U16>::from_slice(nonce.as_bytes()), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| AuthenticationFailure)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn key(byte: u8) -> DerivedKey {
        DerivedKey::from_bytes([byte; 32])
    }

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let k = key(1);
        let plaintext = b"{\"tokens\":[]}";

        let (ciphertext, nonce) = encrypt(plaintext, &k).unwrap();
        let decrypted = decrypt(&ciphertext, &k, &nonce).unwrap();

        assert_eq!(decrypted.as_slice(), plaintext);
    }

    #[test]
    fn ciphertext_carries_sixteen_byte_tag() {
        let (ciphertext, _) = encrypt(b"hello", &key(1)).unwrap();
        assert_eq!(ciphertext.len(), 5 + TAG_LEN);
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let k = key(2);
        let (ciphertext, nonce) = encrypt(b"", &k).unwrap();
        assert_eq!(ciphertext.len(), TAG_LEN);
        assert!(decrypt(&ciphertext, &k, &nonce).unwrap().is_empty());
    }

    #[test]
    fn same_plaintext_encrypts_differently() {
        let k = key(3);
        let (ct1, nonce1) = encrypt(b"same input twice", &k).unwrap();
        let (ct2, nonce2) = encrypt(b"same input twice", &k).unwrap();
        assert_ne!(nonce1, nonce2);
        assert_ne!(ct1, ct2);
    }

    #[test]
    fn nonces_never_repeat_over_many_calls() {
        let k = key(4);
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let (_, nonce) = encrypt(b"x", &k).unwrap();
            assert!(seen.insert(nonce), "nonce reused");
        }
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let (ciphertext, nonce) = encrypt(b"secret data", &key(5)).unwrap();
        assert_eq!(
            decrypt(&ciphertext, &key(6), &nonce).unwrap_err(),
            AuthenticationFailure
        );
    }

    #[test]
    fn wrong_nonce_fails_authentication() {
        let k = key(7);
        let (ciphertext, _) = encrypt(b"secret data", &k).unwrap();
        let other = Nonce::from_bytes([0u8; NONCE_LEN]);
        assert!(decrypt(&ciphertext, &k, &other).is_err());
    }

    #[test]
    fn every_flipped_bit_is_detected() {
        let k = key(8);
        let (ciphertext, nonce) = encrypt(b"do not tamper", &k).unwrap();

        for byte in 0..ciphertext.len() {
            for bit in 0..8 {
                let mut tampered = ciphertext.clone();
                tampered[byte] ^= 1 << bit;
                assert!(
                    decrypt(&tampered, &k, &nonce).is_err(),
                    "flip at byte {byte} bit {bit} went undetected"
                );
            }
        }
    }

    #[test]
    fn truncated_input_fails_authentication() {
        let k = key(9);
        let (ciphertext, nonce) = encrypt(b"abc", &k).unwrap();
        assert!(decrypt(&ciphertext[..TAG_LEN - 1], &k, &nonce).is_err());
        assert!(decrypt(&[], &k, &nonce).is_err());
    }

    #[test]
    fn nonce_from_wrong_length_slice_is_rejected() {
        assert!(Nonce::try_from([0u8; 12].as_slice()).is_err());
        assert!(Nonce::try_from([0u8; NONCE_LEN].as_slice()).is_ok());
    }
}
