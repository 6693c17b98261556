// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM cipher adapter.
//!
//! Ciphertext layout is `nonce (12 bytes) || ciphertext || tag (16 bytes)`, hex
//! encoded when stored in the environment. Keys are 32 bytes, supplied as 64 hex
//! characters.

use crate::domain::CipherError;
use crate::ports::{Decryptor, Encryptor};
use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::Aes256Gcm;
use std::fmt;
use zeroize::Zeroizing;

/// Key length in bytes.
pub const KEY_LEN: usize = 32;

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Authenticated symmetric cipher keyed by a single shared secret.
///
/// # Examples
///
/// ```rust
/// use cfgref::adapters::{generate_key_hex, Aes256GcmCipher};
/// use cfgref::ports::{Decryptor, Encryptor};
///
/// let key = generate_key_hex();
/// let cipher = Aes256GcmCipher::from_hex_key(&key).unwrap();
///
/// let sealed = cipher.encrypt_str_to_hex("hello").unwrap();
/// assert_eq!(cipher.decrypt_hex_to_string(&sealed).unwrap(), "hello");
/// ```
pub struct Aes256GcmCipher {
    cipher: Aes256Gcm,
}

impl Aes256GcmCipher {
    /// Creates a cipher from a hex-encoded 32-byte key.
    ///
    /// # Errors
    ///
    /// * `CipherError::EmptyKey` - `hex_key` is empty
    /// * `CipherError::InvalidKeyHex` - `hex_key` is not valid hex
    /// * `CipherError::InvalidKeyLength` - the key does not decode to 32 bytes
    pub fn from_hex_key(hex_key: &str) -> Result<Self, CipherError> {
        if hex_key.is_empty() {
            return Err(CipherError::EmptyKey);
        }

        let key = Zeroizing::new(hex::decode(hex_key).map_err(CipherError::InvalidKeyHex)?);
        Self::from_key(&key)
    }

    /// Creates a cipher from raw key bytes.
    pub fn from_key(key: &[u8]) -> Result<Self, CipherError> {
        if key.len() != KEY_LEN {
            return Err(CipherError::InvalidKeyLength {
                actual: key.len(),
                expected: KEY_LEN,
            });
        }

        let cipher =
            Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength {
                actual: key.len(),
                expected: KEY_LEN,
            })?;
        Ok(Self { cipher })
    }
}

impl fmt::Debug for Aes256GcmCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aes256GcmCipher")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Encryptor for Aes256GcmCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        if plaintext.is_empty() {
            return Err(CipherError::EmptyData);
        }

        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let sealed = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| CipherError::EncryptionFailed)?;

        let mut out = Vec::with_capacity(NONCE_LEN + sealed.len());
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        Ok(out)
    }
}

impl Decryptor for Aes256GcmCipher {
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CipherError> {
        if data.is_empty() {
            return Err(CipherError::EmptyData);
        }
        if data.len() < NONCE_LEN {
            return Err(CipherError::DataTooShort {
                len: data.len(),
                min: NONCE_LEN,
            });
        }

        let (nonce, sealed) = data.split_at(NONCE_LEN);
        let nonce = aes_gcm::Nonce::from_slice(nonce);
        self.cipher
            .decrypt(nonce, sealed)
            .map_err(|_| CipherError::DecryptionFailed)
    }
}

/// Generates a fresh random key, hex encoded.
///
/// The raw key bytes are wiped once they have been encoded.
pub fn generate_key_hex() -> String {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    OsRng.fill_bytes(key.as_mut_slice());
    hex::encode(key.as_slice())
}

/// Decrypts hex ciphertext with a hex key in one call.
///
/// Key errors are reported before the ciphertext is looked at.
pub fn decrypt_hex_with_key(hex_key: &str, hex_data: &str) -> Result<String, CipherError> {
    Aes256GcmCipher::from_hex_key(hex_key)?.decrypt_hex_to_string(hex_data)
}

/// Encrypts a string with a hex key and returns hex ciphertext.
pub fn encrypt_str_with_key(hex_key: &str, plaintext: &str) -> Result<String, CipherError> {
    Aes256GcmCipher::from_hex_key(hex_key)?.encrypt_str_to_hex(plaintext)
}
