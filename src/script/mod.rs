//! Script hosts: the seam between configuration scripts and the registry.
//!
//! A host executes a script and reports every registration it performs to a
//! [`Registrar`], in execution order. The loader decides what to do with the
//! reported registrations; hosts never touch a registry directly.

mod catalog;
mod yaml;

pub use catalog::{Decoder, TypeCatalog};
pub use yaml::YamlHost;

use crate::error::ScriptFault;
use crate::registry::ErasedValue;

/// A script to execute, identified for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct Script<'a> {
    /// File path or caller-supplied identifier.
    pub id: &'a str,
    /// Full source text.
    pub source: &'a str,
}

impl<'a> Script<'a> {
    pub fn new(id: &'a str, source: &'a str) -> Self {
        Self { id, source }
    }
}

/// Receives the registration calls a script makes.
pub trait Registrar {
    /// `Add(value)`.
    fn add(&mut self, value: ErasedValue);

    /// `Add(name, value)`.
    fn add_named(&mut self, name: String, value: ErasedValue);
}

/// Executes configuration scripts.
pub trait ScriptHost: Send + Sync {
    /// Run `script` to completion, reporting registrations to `registrar`.
    fn execute(&self, script: &Script<'_>, registrar: &mut dyn Registrar)
    -> Result<(), ScriptFault>;
}
