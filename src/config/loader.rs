//! Cascading loader.
//!
//! Runs scripts through a [`ScriptHost`] and applies the registrations they
//! make to a registry. Loads are cumulative: a later script overrides entries
//! written by earlier ones.
//!
//! A load is all-or-nothing. Registrations are staged while the script runs
//! and applied only once it has finished without a fault, so a failing script
//! leaves the registry untouched.

use crate::error::LoadError;
use crate::registry::{ErasedValue, Registry};
use crate::script::{Registrar, Script, ScriptHost, YamlHost};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of one successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Script identity (file path or caller-supplied id).
    pub script: String,
    /// Registrations the script made, including repeats of the same key.
    pub registrations: usize,
    /// Registrations that replaced an existing entry.
    pub replaced: usize,
}

/// Registrations captured from a running script, in call order.
#[derive(Default)]
struct Staged {
    registrations: Vec<(Option<String>, ErasedValue)>,
}

impl Registrar for Staged {
    fn add(&mut self, value: ErasedValue) {
        self.registrations.push((None, value));
    }

    fn add_named(&mut self, name: String, value: ErasedValue) {
        self.registrations.push((Some(name), value));
    }
}

/// Feeds scripts to a host and applies the results to a registry.
#[derive(Debug, Clone, Default)]
pub struct CascadingLoader<H = YamlHost> {
    host: H,
}

impl<H: ScriptHost> CascadingLoader<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Execute `source` and apply its registrations to `registry`.
    pub fn load_str(
        &self,
        registry: &mut Registry,
        script_id: &str,
        source: &str,
    ) -> Result<LoadReport, LoadError> {
        let mut staged = Staged::default();
        self.host
            .execute(&Script::new(script_id, source), &mut staged)
            .map_err(|fault| LoadError::Script {
                script: script_id.to_string(),
                fault,
            })?;

        let origin: Arc<str> = Arc::from(script_id);
        let registrations = staged.registrations.len();
        let mut replaced = 0;
        for (name, value) in staged.registrations {
            if registry.insert(name, value, Some(Arc::clone(&origin))) {
                replaced += 1;
            }
        }

        info!(
            script = script_id,
            registrations, replaced, "Loaded config script"
        );
        Ok(LoadReport {
            script: script_id.to_string(),
            registrations,
            replaced,
        })
    }

    /// Read the script at `path` and load it. The path is the script identity.
    pub fn load_file(
        &self,
        registry: &mut Registry,
        path: impl AsRef<Path>,
    ) -> Result<LoadReport, LoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Reading config script");
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_str(registry, &path.display().to_string(), &source)
    }
}
