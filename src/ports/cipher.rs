// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cipher service trait definitions.
//!
//! Encrypted indirections hold hex-encoded ciphertext. These traits describe the
//! authenticated encryption primitive the resolver relies on; the hex helpers are
//! provided methods so every implementation agrees on the text encoding.

use crate::domain::CipherError;

/// Encrypts data.
pub trait Encryptor {
    /// Encrypts `plaintext`, returning nonce and ciphertext in one buffer.
    ///
    /// Every call must use a fresh nonce, so encrypting the same plaintext twice
    /// yields different output.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Encrypts `plaintext` and hex-encodes the result.
    fn encrypt_to_hex(&self, plaintext: &[u8]) -> Result<String, CipherError> {
        self.encrypt(plaintext).map(hex::encode)
    }

    /// Encrypts a string and hex-encodes the result.
    fn encrypt_str_to_hex(&self, plaintext: &str) -> Result<String, CipherError> {
        self.encrypt_to_hex(plaintext.as_bytes())
    }
}

/// Decrypts data produced by an [`Encryptor`].
pub trait Decryptor {
    /// Decrypts `data`, failing if it was tampered with or sealed under another key.
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Decrypts `data` into a UTF-8 string.
    fn decrypt_to_string(&self, data: &[u8]) -> Result<String, CipherError> {
        Ok(String::from_utf8(self.decrypt(data)?)?)
    }

    /// Hex-decodes and decrypts `hex_data`.
    fn decrypt_hex(&self, hex_data: &str) -> Result<Vec<u8>, CipherError> {
        self.decrypt(&decode_hex(hex_data)?)
    }

    /// Hex-decodes and decrypts `hex_data` into a UTF-8 string.
    fn decrypt_hex_to_string(&self, hex_data: &str) -> Result<String, CipherError> {
        self.decrypt_to_string(&decode_hex(hex_data)?)
    }
}

/// Decodes hex ciphertext, rejecting empty input.
pub fn decode_hex(hex_data: &str) -> Result<Vec<u8>, CipherError> {
    if hex_data.is_empty() {
        return Err(CipherError::EmptyData);
    }
    hex::decode(hex_data).map_err(CipherError::InvalidHex)
}
