// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment and encrypted-environment references for configuration documents.
//!
//! Configuration files often need values that must not be committed: passwords,
//! API tokens, connection strings. This crate lets a document name an environment
//! variable in place of such a value, and resolves every reference after the
//! document has been deserialized.
//!
//! Two kinds of reference are recognized anywhere a string can appear:
//!
//! - `#ENV:<name>` is replaced by the value of environment variable `<name>`
//! - `#EncryptedENV:<name>` is replaced by the value of `<name>`, decrypted with
//!   AES-256-GCM under a shared hex-encoded secret
//!
//! Any other string is left exactly as it is. A resolved value is never scanned
//! again, so references cannot chain.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Error types and the reference syntax (`ConfigError`, `Indirection`)
//! - **Ports**: Trait definitions (`Resolve`, `Record`, `EnvLookup`, `Decryptor`, `ConfigParser`)
//! - **Adapters**: Process and in-memory environments, the AES-256-GCM cipher, JSON and YAML
//! - **Service**: The resolver and the document loader
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML document support (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use cfgref::prelude::*;
//! use cfgref::resolvable;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Database {
//!     url: String,
//!     pool_size: u32,
//! }
//!
//! #[derive(Deserialize)]
//! struct Config {
//!     name: String,
//!     database: Database,
//! }
//!
//! resolvable!(
//!     Database { url, pool_size }
//!     Config { name, database }
//! );
//!
//! # fn main() -> Result<()> {
//! let document = r##"{"name": "api", "database": {"url": "#ENV:DATABASE_URL", "pool_size": 8}}"##;
//!
//! let config: Config = ConfigLoader::new()
//!     .with_env(MapEnv::new().with_var("DATABASE_URL", "postgres://db/api"))
//!     .load_from_str(document)?;
//!
//! assert_eq!(config.name, "api");
//! assert_eq!(config.database.url, "postgres://db/api");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{generate_key_hex, Aes256GcmCipher, JsonParser, MapEnv, ProcessEnv};
    pub use crate::domain::{CipherError, ConfigError, Indirection, IndirectionKind, Result};
    pub use crate::ports::{ConfigParser, Decryptor, Encryptor, EnvLookup, Record, Resolve};
    pub use crate::service::{
        load_from_file, resolve, resolve_with_env, ConfigLoader, DocumentFormat, Resolver,
    };

    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
