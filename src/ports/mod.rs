// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the trait definitions (ports) that define the interfaces
//! for the components of the resolution pipeline. These traits are implemented
//! by adapters in the adapters layer and by caller-defined configuration types.

pub mod cipher;
pub mod env;
pub mod parser;
pub mod resolve;

// Re-export commonly used types
pub use cipher::{Decryptor, Encryptor};
pub use env::EnvLookup;
pub use parser::ConfigParser;
pub use resolve::{Record, Resolve};
