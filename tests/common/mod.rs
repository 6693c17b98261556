// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use cfgref::resolvable;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::env;

/// Sets process environment variables and removes them again on drop.
///
/// Tests run in parallel, so every test must use variable names of its own.
pub struct EnvGuard {
    keys: Vec<String>,
}

impl EnvGuard {
    pub fn new() -> Self {
        EnvGuard { keys: Vec::new() }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Inner {
    pub inner_foo: String,
    pub inner_bar: String,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct SimpleConfig {
    pub foo: String,
    pub bar: Inner,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Credentials {
    pub user: String,
    pub password: String,
    #[serde(default)]
    pub port: u16,
}

/// A configuration exercising every supported shape.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub database: Credentials,
    pub replica: Option<Box<Credentials>>,
    pub backends: HashMap<String, Credentials>,
    pub headers: BTreeMap<String, String>,
    pub hosts: Vec<String>,
    pub optional_token: Option<String>,
    pub retries: u32,
    pub debug: bool,
}

resolvable!(
    Inner { inner_foo, inner_bar }
    SimpleConfig { foo, bar }
    Credentials { user, password, port }
    ServiceConfig {
        name,
        database,
        replica,
        backends,
        headers,
        hosts,
        optional_token,
        retries,
        debug,
    }
);
