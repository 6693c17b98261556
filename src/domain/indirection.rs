// SPDX-License-Identifier: MIT OR Apache-2.0

//! Indirection markers and parsing.
//!
//! An indirection is a string value in a configuration document that names an
//! environment variable instead of carrying the value itself. The markers below are
//! part of the configuration file format and must never change.

use std::fmt;

/// Marker for a plain environment lookup: `#ENV:<name>`.
pub const ENV_MARKER: &str = "#ENV:";

/// Marker for an environment lookup followed by decryption: `#EncryptedENV:<name>`.
pub const ENCRYPTED_ENV_MARKER: &str = "#EncryptedENV:";

/// All markers in the order they are tested.
///
/// No entry may be a prefix of another entry.
pub const MARKERS: [(&str, IndirectionKind); 2] = [
    (ENV_MARKER, IndirectionKind::Env),
    (ENCRYPTED_ENV_MARKER, IndirectionKind::EncryptedEnv),
];

/// The kind of an indirection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndirectionKind {
    /// Resolves to the value of an environment variable.
    Env,
    /// Resolves to the decrypted value of an environment variable.
    EncryptedEnv,
}

impl IndirectionKind {
    /// Returns the marker that introduces this kind.
    pub fn marker(self) -> &'static str {
        match self {
            IndirectionKind::Env => ENV_MARKER,
            IndirectionKind::EncryptedEnv => ENCRYPTED_ENV_MARKER,
        }
    }
}

impl fmt::Display for IndirectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndirectionKind::Env => write!(f, "env"),
            IndirectionKind::EncryptedEnv => write!(f, "encrypted-env"),
        }
    }
}

/// A parsed indirection borrowed from the string it was found in.
///
/// # Examples
///
/// ```
/// use cfgref::domain::{Indirection, IndirectionKind};
///
/// let ind = Indirection::parse("#ENV:DATABASE_URL").unwrap();
/// assert_eq!(ind.kind(), IndirectionKind::Env);
/// assert_eq!(ind.key(), "DATABASE_URL");
///
/// assert!(Indirection::parse("postgres://localhost").is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Indirection<'a> {
    kind: IndirectionKind,
    key: &'a str,
}

impl<'a> Indirection<'a> {
    /// Parses `value` as an indirection.
    ///
    /// Returns `None` when `value` does not start with a known marker. Matching is a
    /// literal, case-sensitive prefix test. The key may be empty; an empty key will
    /// simply never be found in the environment.
    pub fn parse(value: &'a str) -> Option<Self> {
        MARKERS.iter().find_map(|(marker, kind)| {
            value
                .strip_prefix(marker)
                .map(|key| Indirection { kind: *kind, key })
        })
    }

    /// Returns the kind of this indirection.
    pub fn kind(&self) -> IndirectionKind {
        self.kind
    }

    /// Returns the environment variable name this indirection refers to.
    pub fn key(&self) -> &'a str {
        self.key
    }
}

impl fmt::Display for Indirection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.marker(), self.key)
    }
}
