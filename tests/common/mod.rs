//! Shared fixtures for integration tests.

#![allow(dead_code)]

use configr::config::Config;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Foo {
    pub bar: String,
}

/// A YAML-hosted config that knows about `Foo`.
pub fn foo_config() -> Config {
    let mut config = Config::new();
    config.register_type::<Foo>("Foo");
    config
}

/// Write a script into `dir` and return its path.
pub fn write_script(dir: &Path, file_name: &str, source: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, source).expect("Failed to write script");
    path
}
