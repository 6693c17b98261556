// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML document adapter.
//!
//! This module provides the YAML parser and lets a dynamic [`serde_yaml::Value`]
//! tree be resolved like any typed configuration record.

use crate::domain::{ConfigError, Result};
use crate::ports::resolve::resolve_copy_on_write;
use crate::ports::{ConfigParser, Record, Resolve};
use crate::service::Resolver;
use serde::de::DeserializeOwned;
use serde_yaml::Value;

/// YAML parser implementation.
///
/// # Examples
///
/// ```rust
/// use cfgref::adapters::YamlParser;
/// use cfgref::ports::ConfigParser;
/// use std::collections::HashMap;
///
/// let parser = YamlParser::new();
/// let yaml_content = "host: localhost\nport: \"5432\"";
/// let result: HashMap<String, String> = parser.parse(yaml_content).unwrap();
/// assert_eq!(result.get("host"), Some(&"localhost".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for YamlParser {
    fn parse<T: DeserializeOwned>(&self, content: &str) -> Result<T> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

impl Resolve for Value {
    fn resolve_with(&mut self, resolver: &Resolver<'_>) -> Result<()> {
        match self {
            Value::String(s) => s.resolve_with(resolver),
            Value::Sequence(items) => items.resolve_with(resolver),
            Value::Mapping(map) => map
                .values_mut()
                .try_for_each(|value| resolve_copy_on_write(value, resolver)),
            Value::Tagged(tagged) => tagged.value.resolve_with(resolver),
            Value::Null | Value::Bool(_) | Value::Number(_) => Ok(()),
        }
    }
}

impl Record for Value {
    fn ensure_record(&self) -> Result<()> {
        match self {
            Value::Mapping(_) => Ok(()),
            other => Err(ConfigError::InvalidRoot {
                found: kind_name(other).to_string(),
            }),
        }
    }
}
