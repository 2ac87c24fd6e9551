//! Process-wide configuration handle.
//!
//! A convenience wrapper over one [`Config`] for call sites that cannot be
//! handed an instance. Every function delegates to that instance.
//!
//! Reads take a snapshot, so lookups return owned clones. Writes copy the
//! current configuration (values are shared, not duplicated), apply the change
//! and publish the result. A failed load publishes nothing.
//!
//! Writers are not ordered against each other: load configuration from one
//! thread before concurrent readers start. State persists until [`reset`];
//! tests sharing the process must reset between scenarios.

use crate::config::{Config, LoadReport, RegistryOptions};
use crate::error::{LoadError, LookupError};
use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use std::any::Any;
use std::path::Path;
use std::sync::{Arc, LazyLock};

static GLOBAL: LazyLock<ArcSwap<Config>> = LazyLock::new(|| {
    ArcSwap::from_pointee(Config::new().with_options(RegistryOptions::from_env()))
});

/// Apply `f` to a copy of the global configuration and publish it on success.
fn update<R, E>(f: impl FnOnce(&mut Config) -> Result<R, E>) -> Result<R, E> {
    let mut next = Config::clone(&GLOBAL.load());
    let out = f(&mut next)?;
    GLOBAL.store(Arc::new(next));
    Ok(out)
}

/// Apply `f` to a copy of the global configuration and publish it.
fn modify(f: impl FnOnce(&mut Config)) {
    let mut next = Config::clone(&GLOBAL.load());
    f(&mut next);
    GLOBAL.store(Arc::new(next));
}

/// Current global configuration.
pub fn snapshot() -> Arc<Config> {
    GLOBAL.load_full()
}

/// Remove every entry. Registered types and options are kept.
pub fn reset() {
    modify(|config| {
        config.reset();
    });
}

/// Make `T` constructible from scripts loaded through the global handle.
pub fn register_type<T: DeserializeOwned + Any + Send + Sync>(name: impl Into<String>) {
    let name = name.into();
    modify(|config| {
        config.register_type::<T>(name);
    });
}

/// Replace the registry options.
pub fn set_options(options: RegistryOptions) {
    modify(|config| {
        config.registry_mut().set_options(options);
    });
}

/// Load a script from source text.
pub fn load(script_id: &str, source: &str) -> Result<LoadReport, LoadError> {
    update(|config| config.load(script_id, source))
}

/// Load the script at `path`.
pub fn load_script_file(path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
    update(|config| config.load_script_file(path))
}

pub fn add<T: Any + Send + Sync>(value: T) {
    modify(|config| {
        config.add(value);
    });
}

pub fn add_named<T: Any + Send + Sync>(name: impl Into<String>, value: T) {
    let name = name.into();
    modify(|config| {
        config.add_named(name, value);
    });
}

pub fn get<T: Any + Clone>() -> Result<T, LookupError> {
    GLOBAL.load().get::<T>().cloned()
}

pub fn get_named<T: Any + Clone>(name: &str) -> Result<T, LookupError> {
    GLOBAL.load().get_named::<T>(name).cloned()
}

pub fn try_get<T: Any + Clone>() -> Option<T> {
    GLOBAL.load().try_get::<T>().cloned()
}

pub fn try_get_named<T: Any + Clone>(name: &str) -> Option<T> {
    GLOBAL.load().try_get_named::<T>(name).cloned()
}

pub fn get_or_default<T: Any + Clone + Default>() -> T {
    GLOBAL.load().get_or_default::<T>()
}

pub fn get_or_default_named<T: Any + Clone + Default>(name: &str) -> T {
    GLOBAL.load().get_or_default_named::<T>(name)
}
