//! Configuration composition root.
//!
//! [`Config`] binds one [`Registry`] to one [`CascadingLoader`]. Applications
//! build a `Config`, load scripts into it, and pass it to whatever needs
//! configuration. The [`global`](crate::global) handle wraps a process-wide
//! instance for call sites that cannot receive one.

mod loader;
pub mod paths;
mod types;

pub use loader::{CascadingLoader, LoadReport};
pub use paths::{ConfigPaths, ConfigTier};
pub use types::*;

use crate::error::{LoadError, LookupError};
use crate::registry::{EntryInfo, Registry};
use crate::script::{ScriptHost, TypeCatalog, YamlHost};
use serde::de::DeserializeOwned;
use std::any::Any;
use std::path::Path;
use tracing::info;

/// A registry together with the loader that fills it.
#[derive(Debug, Clone, Default)]
pub struct Config<H = YamlHost> {
    registry: Registry,
    loader: CascadingLoader<H>,
}

impl Config<YamlHost> {
    /// Empty configuration using the YAML host and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty configuration using the YAML host with `catalog`.
    pub fn with_catalog(catalog: TypeCatalog) -> Self {
        Self::with_host(YamlHost::with_catalog(catalog))
    }

    /// Make `T` constructible from scripts as `name`.
    pub fn register_type<T: DeserializeOwned + Any + Send + Sync>(
        &mut self,
        name: impl Into<String>,
    ) -> &mut Self {
        self.loader.host_mut().register_type::<T>(name);
        self
    }
}

impl<H: ScriptHost> Config<H> {
    /// Empty configuration using a custom script host.
    pub fn with_host(host: H) -> Self {
        Self {
            registry: Registry::new(),
            loader: CascadingLoader::new(host),
        }
    }

    /// Replace the registry options, keeping entries.
    pub fn with_options(mut self, options: RegistryOptions) -> Self {
        self.registry.set_options(options);
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn loader(&self) -> &CascadingLoader<H> {
        &self.loader
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.loader.host_mut()
    }

    /// Load a script from source text. `script_id` identifies it in errors.
    pub fn load(&mut self, script_id: &str, source: &str) -> Result<LoadReport, LoadError> {
        self.loader.load_str(&mut self.registry, script_id, source)
    }

    /// Load the script at `path`.
    pub fn load_script_file(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
        self.loader.load_file(&mut self.registry, path)
    }

    /// Load several scripts in order, stopping at the first failure.
    ///
    /// Scripts loaded before the failure stay applied.
    pub fn load_script_files<P: AsRef<Path>>(
        &mut self,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<Vec<LoadReport>, LoadError> {
        paths
            .into_iter()
            .map(|path| self.load_script_file(path))
            .collect()
    }

    /// Cascade the discovered default scripts, lowest tier first.
    pub fn load_defaults(&mut self, paths: &ConfigPaths) -> Result<Vec<LoadReport>, LoadError> {
        let mut reports = Vec::new();
        for (tier, path) in paths.scripts() {
            info!(tier = %tier, path = %path.display(), "Loading default config script");
            reports.push(self.load_script_file(&path)?);
        }
        Ok(reports)
    }

    /// Clear every entry. Registered types and options are kept.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    pub fn add<T: Any + Send + Sync>(&mut self, value: T) {
        self.registry.add(value);
    }

    pub fn add_named<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.registry.add_named(name, value);
    }

    pub fn get<T: Any>(&self) -> Result<&T, LookupError> {
        self.registry.get::<T>()
    }

    pub fn get_named<T: Any>(&self, name: &str) -> Result<&T, LookupError> {
        self.registry.get_named::<T>(name)
    }

    pub fn try_get<T: Any>(&self) -> Option<&T> {
        self.registry.try_get::<T>()
    }

    pub fn try_get_named<T: Any>(&self, name: &str) -> Option<&T> {
        self.registry.try_get_named::<T>(name)
    }

    pub fn get_or_default<T: Any + Clone + Default>(&self) -> T {
        self.registry.get_or_default::<T>()
    }

    pub fn get_or_default_named<T: Any + Clone + Default>(&self, name: &str) -> T {
        self.registry.get_or_default_named::<T>(name)
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = EntryInfo<'_>> {
        self.registry.entries()
    }
}
