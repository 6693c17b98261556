// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which provides an interface for
//! deserializing configuration documents in different formats (JSON, YAML, ...)
//! into caller-defined types.

use crate::domain::Result;
use serde::de::DeserializeOwned;

/// A trait for parsing configuration documents.
///
/// Parsers only deserialize. Indirections inside the document are left as-is and
/// are resolved afterwards by the [`Resolver`](crate::service::Resolver).
///
/// # Examples
///
/// ```rust
/// use cfgref::ports::ConfigParser;
/// use cfgref::domain::{ConfigError, Result};
/// use serde::de::DeserializeOwned;
///
/// struct NullParser;
///
/// impl ConfigParser for NullParser {
///     fn parse<T: DeserializeOwned>(&self, _content: &str) -> Result<T> {
///         Err(ConfigError::ParseError {
///             message: "nothing to parse".to_string(),
///             source: None,
///         })
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["null"]
///     }
/// }
///
/// assert!(NullParser.parse::<String>("").is_err());
/// ```
pub trait ConfigParser {
    /// Deserializes `content` into `T`.
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - The deserialized document
    /// * `Err(ConfigError::ParseError)` - The content is malformed or does not match `T`
    fn parse<T: DeserializeOwned>(&self, content: &str) -> Result<T>;

    /// Returns the file extensions supported by this parser.
    ///
    /// Extensions are given without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Returns `true` if `extension` is one of [`supported_extensions`](Self::supported_extensions).
    ///
    /// The comparison ignores ASCII case.
    fn supports_extension(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
