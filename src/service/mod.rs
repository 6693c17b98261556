// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the resolver and the document loader.
//!
//! The resolver walks a configuration value and substitutes its indirections. The
//! loader sits in front of it, turning a file on disk into a resolved value.

pub mod loader;
pub mod resolver;

// Re-export commonly used types
pub use loader::{load_from_file, ConfigLoader, DocumentFormat};
pub use resolver::{resolve, resolve_with_env, Resolver};
