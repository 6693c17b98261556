// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing concrete implementations of ports.
//!
//! This module contains the implementations of the port traits: environment
//! lookups, the AES-256-GCM cipher, and the document parsers.

pub mod aes_gcm;
pub mod env_var;
pub mod json_file;

#[cfg(feature = "yaml")]
pub mod yaml_file;

// Re-export commonly used types
pub use aes_gcm::{
    decrypt_hex_with_key, encrypt_str_with_key, generate_key_hex, Aes256GcmCipher, KEY_LEN,
    NONCE_LEN,
};
pub use env_var::{MapEnv, ProcessEnv};
pub use json_file::JsonParser;

#[cfg(feature = "yaml")]
pub use yaml_file::YamlParser;
