// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable adapters.
//!
//! This module provides two [`EnvLookup`] implementations: [`ProcessEnv`], which
//! reads the process environment at lookup time, and [`MapEnv`], which serves a
//! fixed set of variables from memory.

use crate::domain::{ConfigError, Result};
use crate::ports::EnvLookup;
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable keys (prevents DoS)
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values (prevents DoS)
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Environment lookup backed by the process environment.
///
/// Every lookup reads the live environment; nothing is cached. Names that cannot
/// be environment variables (empty, oversized, or containing `=` or NUL) are
/// reported as not set. A variable that is set but holds a non-Unicode or
/// oversized value is reported as `ConfigError::EnvVarUnreadable`.
///
/// # Examples
///
/// ```rust
/// use cfgref::adapters::ProcessEnv;
/// use cfgref::ports::EnvLookup;
///
/// let env = ProcessEnv::new();
/// assert!(env.lookup("CFGREF_SURELY_UNSET_VARIABLE").unwrap().is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Creates a new process environment adapter.
    pub fn new() -> Self {
        ProcessEnv
    }
}

impl EnvLookup for ProcessEnv {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        if key.is_empty() || key.len() > MAX_ENV_KEY_LEN || key.contains(['=', '\0']) {
            return Ok(None);
        }

        let Some(raw) = env::var_os(key) else {
            return Ok(None);
        };

        let value = raw.into_string().map_err(|_| {
            tracing::warn!("Environment variable {} is set but not valid Unicode", key);
            ConfigError::EnvVarUnreadable {
                key: key.to_string(),
                reason: "value is not valid Unicode".to_string(),
            }
        })?;

        if value.len() > MAX_ENV_VALUE_LEN {
            tracing::warn!(
                "Environment variable {} is oversized: value_len={} (max {})",
                key,
                value.len(),
                MAX_ENV_VALUE_LEN
            );
            return Err(ConfigError::EnvVarUnreadable {
                key: key.to_string(),
                reason: format!(
                    "value is {} bytes, larger than the {} byte limit",
                    value.len(),
                    MAX_ENV_VALUE_LEN
                ),
            });
        }

        Ok(Some(value))
    }

    fn name(&self) -> &str {
        "process-env"
    }
}

/// Environment lookup backed by an in-memory map.
///
/// Useful for tests and for resolving against a captured snapshot of variables
/// without touching process-wide state.
///
/// # Examples
///
/// ```rust
/// use cfgref::adapters::MapEnv;
/// use cfgref::ports::EnvLookup;
///
/// let env = MapEnv::new().with_var("DB_HOST", "localhost");
/// assert_eq!(env.lookup("DB_HOST").unwrap().as_deref(), Some("localhost"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    values: HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty map environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map environment from existing values.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Captures the current process environment.
    ///
    /// Variables with non-Unicode names or values are skipped.
    pub fn snapshot() -> Self {
        let values: HashMap<String, String> = env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        tracing::debug!("Captured {} environment variables", values.len());
        Self { values }
    }

    /// Adds or replaces a variable.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Adds or replaces a variable in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Removes a variable.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Returns the number of variables.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no variables are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvLookup for MapEnv {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn name(&self) -> &str {
        "map-env"
    }
}
