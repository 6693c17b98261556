// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON document adapter.
//!
//! This module provides the JSON parser and lets a dynamic [`serde_json::Value`]
//! tree be resolved like any typed configuration record.

use crate::domain::{ConfigError, Result};
use crate::ports::resolve::resolve_copy_on_write;
use crate::ports::{ConfigParser, Record, Resolve};
use crate::service::Resolver;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON parser implementation.
///
/// # Examples
///
/// ```rust
/// use cfgref::adapters::JsonParser;
/// use cfgref::ports::ConfigParser;
/// use std::collections::HashMap;
///
/// let parser = JsonParser::new();
/// let parsed: HashMap<String, String> = parser.parse(r#"{"host": "localhost"}"#).unwrap();
/// assert_eq!(parsed["host"], "localhost");
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }
}

impl ConfigParser for JsonParser {
    fn parse<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Invalid JSON at line {} column {}", e.line(), e.column()),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

/// Short description of a JSON value's kind for error messages.
fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Resolve for Value {
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()> {
        match self {
            Value::String(s) => s.resolve_with(resolver),
            Value::Array(items) => items.resolve_with(resolver),
            Value::Object(map) => map
                .values_mut()
                .try_for_each(|value| resolve_copy_on_write(value, resolver)),
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(()),
        }
    }
}

impl Record for Value {
    fn ensure_record(&self) -> Result<()> {
        match self {
            Value::Object(_) => Ok(()),
            other => Err(ConfigError::InvalidRoot {
                found: kind_name(other).to_string(),
            }),
        }
    }
}
