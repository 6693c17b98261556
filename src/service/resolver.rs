// SPDX-License-Identifier: MIT OR Apache-2.0

//! The configuration resolver.
//!
//! A [`Resolver`] carries everything one resolution call needs: where to look up
//! environment variables and how to decrypt encrypted ones. It is created per call
//! and dropped afterwards; it never keeps a reference to the value it resolved.

use crate::adapters::{Aes256GcmCipher, ProcessEnv};
use crate::domain::{CipherError, ConfigError, Indirection, IndirectionKind, Result};
use crate::ports::{Decryptor, EnvLookup, Record};
use once_cell::unsync::OnceCell;
use std::fmt;

/// Resolves indirections against an environment and a shared secret.
///
/// The cipher is built from the secret the first time an encrypted indirection is
/// met and reused for the rest of the call. A document without encrypted
/// indirections never needs a valid secret.
///
/// # Examples
///
/// ```rust
/// use cfgref::adapters::MapEnv;
/// use cfgref::service::Resolver;
///
/// let env = MapEnv::from_iter([("TestKey", "2")]);
/// let resolver = Resolver::new(&env, "");
///
/// assert_eq!(resolver.resolve_str("#ENV:TestKey").unwrap(), "2");
/// assert_eq!(resolver.resolve_str("plain").unwrap(), "plain");
/// ```
pub struct Resolver<'a> {
    env: &'a dyn EnvLookup,
    secret: &'a str,
    decryptor: OnceCell<Box<dyn Decryptor + 'a>>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver that decrypts with the hex-encoded `secret`.
    pub fn new(env: &'a dyn EnvLookup, secret: &'a str) -> Self {
        Self {
            env,
            secret,
            decryptor: OnceCell::new(),
        }
    }

    /// Creates a resolver that decrypts with an already-built decryptor.
    pub fn with_decryptor(env: &'a dyn EnvLookup, decryptor: Box<dyn Decryptor + 'a>) -> Self {
        Self {
            env,
            secret: "",
            decryptor: OnceCell::with_value(decryptor),
        }
    }

    /// Resolves every indirection reachable from `root`, in place.
    ///
    /// The root's shape is checked before anything is touched. After that the first
    /// error aborts the walk and is returned as-is; parts of the value visited
    /// before the error stay resolved.
    pub fn resolve_root<T: Record + ?Sized>(&self, root: &mut T) -> Result<()> {
        root.ensure_record()?;
        root.resolve_with(self)
    }

    /// Resolves a single string.
    ///
    /// Returns `Ok(None)` when `value` is not an indirection. The resolved value is
    /// returned verbatim and is never itself treated as an indirection.
    pub fn resolve_indirection(&self, value: &str) -> Result<Option<String>> {
        let Some(indirection) = Indirection::parse(value) else {
            return Ok(None);
        };

        tracing::debug!(
            kind = %indirection.kind(),
            key = indirection.key(),
            source = self.env.name(),
            "Resolving configuration indirection"
        );

        let raw = self.lookup(indirection.key())?;
        match indirection.kind() {
            IndirectionKind::Env => Ok(Some(raw)),
            IndirectionKind::EncryptedEnv => self
                .decryptor()
                .and_then(|decryptor| decryptor.decrypt_hex_to_string(&raw))
                .map(Some)
                .map_err(|source| ConfigError::DecryptionError {
                    key: indirection.key().to_string(),
                    source,
                }),
        }
    }

    /// Resolves a single string, returning it unchanged if it is not an indirection.
    pub fn resolve_str(&self, value: &str) -> Result<String> {
        Ok(self
            .resolve_indirection(value)?
            .unwrap_or_else(|| value.to_string()))
    }

    /// Looks up `key`, treating a set-but-empty variable as missing.
    fn lookup(&self, key: &str) -> Result<String> {
        match self.env.lookup(key)? {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ConfigError::EnvVarNotFound {
                key: key.to_string(),
            }),
        }
    }

    fn decryptor(&self) -> std::result::Result<&dyn Decryptor, CipherError> {
        self.decryptor
            .get_or_try_init(|| {
                Aes256GcmCipher::from_hex_key(self.secret)
                    .map(|cipher| Box::new(cipher) as Box<dyn Decryptor + 'a>)
            })
            .map(|decryptor| decryptor.as_ref())
    }
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("env", &self.env.name())
            .field("secret", &"<redacted>")
            .field("cipher_ready", &self.decryptor.get().is_some())
            .finish()
    }
}

/// Resolves `root` in place against the process environment.
///
/// `secret` is the hex-encoded AES-256 key for `#EncryptedENV:` indirections and
/// may be empty if the document has none.
///
/// # Examples
///
/// ```rust
/// use cfgref::resolvable;
/// use cfgref::service::resolve;
///
/// struct Config {
///     greeting: String,
/// }
/// resolvable!(Config { greeting });
///
/// let mut config = Config { greeting: "hello".to_string() };
/// resolve("", &mut config).unwrap();
/// assert_eq!(config.greeting, "hello");
/// ```
pub fn resolve<T: Record + ?Sized>(secret: &str, root: &mut T) -> Result<()> {
    resolve_with_env(&ProcessEnv::new(), secret, root)
}

/// Resolves `root` in place against the given environment.
pub fn resolve_with_env<T: Record + ?Sized>(
    env: &dyn EnvLookup,
    secret: &str,
    root: &mut T,
) -> Result<()> {
    Resolver::new(env, secret).resolve_root(root)
}
