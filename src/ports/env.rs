// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment lookup trait definition.
//!
//! The resolver never touches the process environment directly. It asks an
//! [`EnvLookup`] implementation, which lets tests supply a fixed set of variables
//! without mutating process-wide state.

use crate::domain::Result;

/// A read-only source of environment variables.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a loader holding one can be shared
/// across threads.
///
/// # Examples
///
/// ```rust
/// use cfgref::domain::Result;
/// use cfgref::ports::EnvLookup;
///
/// struct Fixed;
///
/// impl EnvLookup for Fixed {
///     fn lookup(&self, key: &str) -> Result<Option<String>> {
///         Ok((key == "PORT").then(|| "8080".to_string()))
///     }
/// }
///
/// assert_eq!(Fixed.lookup("PORT").unwrap().as_deref(), Some("8080"));
/// assert_eq!(Fixed.lookup("HOST").unwrap(), None);
/// ```
pub trait EnvLookup: Send + Sync {
    /// Returns the value of `key`, or `None` if it is not set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::EnvVarUnreadable` if the variable is set but its value
    /// cannot be used.
    fn lookup(&self, key: &str) -> Result<Option<String>>;

    /// Returns a short name for this source, used in log output.
    fn name(&self) -> &str {
        "env"
    }
}
