// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration crate.
//!
//! This module defines the error types that can occur while loading a configuration
//! document and resolving the indirections inside it. All errors use `thiserror`
//! for proper error handling and conversion.
//!
//! Errors fall into four groups that callers can tell apart:
//!
//! - usage errors ([`ConfigError::InvalidRoot`])
//! - missing data ([`ConfigError::EnvVarNotFound`], [`ConfigError::EnvVarUnreadable`])
//! - cryptographic failures ([`ConfigError::DecryptionError`], wrapping a [`CipherError`])
//! - document loading failures (file, I/O and parse errors)

use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;

/// The main error type for configuration operations.
///
/// This enum represents all possible errors that can occur when reading, parsing,
/// or resolving configuration values. It is marked as `#[non_exhaustive]` to allow
/// for future additions without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use cfgref::domain::errors::ConfigError;
///
/// fn lookup() -> Result<String, ConfigError> {
///     Err(ConfigError::EnvVarNotFound {
///         key: "DATABASE_PASSWORD".to_string(),
///     })
/// }
///
/// let err = lookup().unwrap_err();
/// assert!(err.is_missing_data());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The value handed to the resolver cannot act as a configuration root.
    #[error("Invalid configuration root: expected a record, got {found}")]
    InvalidRoot {
        /// A short description of what was found instead
        found: String,
    },

    /// An indirection referenced an environment variable that is not set.
    #[error("Environment variable not found: {key}")]
    EnvVarNotFound {
        /// The name of the missing variable
        key: String,
    },

    /// An indirection referenced an environment variable that is set but cannot be used.
    #[error("Environment variable '{key}' is set but unusable: {reason}")]
    EnvVarUnreadable {
        /// The name of the variable
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// An encrypted indirection could not be decrypted.
    #[error("Failed to decrypt environment variable '{key}': {source}")]
    DecryptionError {
        /// The name of the variable holding the ciphertext
        key: String,
        /// The underlying cipher error
        #[source]
        source: CipherError,
    },

    /// The configuration file does not exist.
    #[error("Configuration file not found: {}", .path.display())]
    FileNotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// The configuration file exceeds the maximum accepted size.
    #[error("Configuration file too large: {size} bytes (max {max} bytes)")]
    FileTooLarge {
        /// Actual size in bytes
        size: u64,
        /// Maximum accepted size in bytes
        max: u64,
    },

    /// The document format is not available in this build.
    #[error("Unsupported configuration format: {format}")]
    UnsupportedFormat {
        /// The requested format or file extension
        format: String,
    },

    /// Failed to parse a configuration document.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Returns `true` for errors caused by the resolver being handed the wrong kind of value.
    pub fn is_usage(&self) -> bool {
        matches!(self, ConfigError::InvalidRoot { .. })
    }

    /// Returns `true` when a referenced environment variable was missing or unusable.
    pub fn is_missing_data(&self) -> bool {
        matches!(
            self,
            ConfigError::EnvVarNotFound { .. } | ConfigError::EnvVarUnreadable { .. }
        )
    }

    /// Returns `true` for failures of the cipher service.
    pub fn is_cryptographic(&self) -> bool {
        matches!(self, ConfigError::DecryptionError { .. })
    }

    /// Returns the underlying cipher error, if any.
    pub fn cipher_error(&self) -> Option<&CipherError> {
        match self {
            ConfigError::DecryptionError { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors produced by the cipher service.
///
/// Key errors (`EmptyKey`, `InvalidKeyHex`, `InvalidKeyLength`) describe a
/// misconfigured secret; the remaining variants describe bad ciphertext.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CipherError {
    /// No key was supplied.
    #[error("cipher: empty key")]
    EmptyKey,

    /// The key is not valid hex.
    #[error("cipher: invalid hex key: {0}")]
    InvalidKeyHex(#[source] hex::FromHexError),

    /// The key does not decode to the required number of bytes.
    #[error("cipher: invalid key length {actual}, must be {expected} bytes ({} hex chars)", .expected * 2)]
    InvalidKeyLength {
        /// Decoded key length in bytes
        actual: usize,
        /// Required key length in bytes
        expected: usize,
    },

    /// Empty plaintext or ciphertext.
    #[error("cipher: empty data")]
    EmptyData,

    /// The ciphertext is not valid hex.
    #[error("cipher: invalid hex data: {0}")]
    InvalidHex(#[source] hex::FromHexError),

    /// The ciphertext is shorter than the nonce.
    #[error("cipher: encrypted data too short ({len} bytes, need at least {min})")]
    DataTooShort {
        /// Length of the supplied data
        len: usize,
        /// Minimum accepted length
        min: usize,
    },

    /// The AEAD seal operation failed.
    #[error("cipher: encryption failed")]
    EncryptionFailed,

    /// Authentication failed: wrong key or tampered ciphertext.
    #[error("cipher: decryption failed")]
    DecryptionFailed,

    /// The plaintext is not valid UTF-8.
    #[error("cipher: plaintext is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] FromUtf8Error),
}

impl CipherError {
    /// Returns `true` if the error describes a misconfigured key rather than bad data.
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            CipherError::EmptyKey
                | CipherError::InvalidKeyHex(_)
                | CipherError::InvalidKeyLength { .. }
        )
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_env_var_not_found_error() {
        let error = ConfigError::EnvVarNotFound {
            key: "DB_PASSWORD".to_string(),
        };
        assert_eq!(error.to_string(), "Environment variable not found: DB_PASSWORD");
        assert!(error.is_missing_data());
        assert!(!error.is_cryptographic());
    }

    #[test]
    fn test_env_var_unreadable_error() {
        let error = ConfigError::EnvVarUnreadable {
            key: "DB_PASSWORD".to_string(),
            reason: "value is not valid Unicode".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Environment variable 'DB_PASSWORD' is set but unusable: value is not valid Unicode"
        );
        assert!(error.is_missing_data());
        assert!(!matches!(error, ConfigError::EnvVarNotFound { .. }));
    }

    #[test]
    fn test_invalid_root_error() {
        let error = ConfigError::InvalidRoot {
            found: "string".to_string(),
        };
        assert!(error.is_usage());
        assert!(error.to_string().contains("expected a record"));
    }

    #[test]
    fn test_decryption_error_keeps_source() {
        let error = ConfigError::DecryptionError {
            key: "API_TOKEN".to_string(),
            source: CipherError::DecryptionFailed,
        };
        assert!(error.is_cryptographic());
        assert!(!error.is_missing_data());
        assert!(error.to_string().contains("API_TOKEN"));
        assert!(matches!(
            error.cipher_error(),
            Some(CipherError::DecryptionFailed)
        ));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_file_not_found_error() {
        let error = ConfigError::FileNotFound {
            path: PathBuf::from("/etc/app/config.json"),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /etc/app/config.json"
        );
    }

    #[test]
    fn test_parse_error() {
        let error = ConfigError::ParseError {
            message: "Invalid JSON".to_string(),
            source: None,
        };
        assert_eq!(error.to_string(), "Failed to parse configuration: Invalid JSON");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = ConfigError::from(io_error);
        assert!(matches!(error, ConfigError::IoError(_)));
    }

    #[test]
    fn test_invalid_key_length_message() {
        let error = CipherError::InvalidKeyLength {
            actual: 16,
            expected: 32,
        };
        assert_eq!(
            error.to_string(),
            "cipher: invalid key length 16, must be 32 bytes (64 hex chars)"
        );
    }

    #[test]
    fn test_key_errors_are_distinguished() {
        assert!(CipherError::EmptyKey.is_key_error());
        assert!(CipherError::InvalidKeyLength {
            actual: 8,
            expected: 32
        }
        .is_key_error());
        assert!(!CipherError::DecryptionFailed.is_key_error());
        assert!(!CipherError::EmptyData.is_key_error());
        assert!(!CipherError::DataTooShort { len: 3, min: 12 }.is_key_error());
    }
}
