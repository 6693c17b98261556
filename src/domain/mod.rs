// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types.
//!
//! This module contains the error types and the indirection syntax shared by every
//! other layer. It is independent of any external concerns.

pub mod errors;
pub mod indirection;

// Re-export commonly used types
pub use errors::{CipherError, ConfigError, Result};
pub use indirection::{
    Indirection, IndirectionKind, ENCRYPTED_ENV_MARKER, ENV_MARKER, MARKERS,
};
