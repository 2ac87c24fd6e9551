//! Configuration types for the registry itself.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment variable overriding the anonymous lookup policy.
pub const ANONYMOUS_LOOKUP_ENV: &str = "CONFIGR_ANONYMOUS_LOOKUP";

/// How an anonymous lookup resolves several named values of the same type
/// when none was registered anonymously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnonymousLookup {
    /// Fail with an ambiguity error (default)
    #[default]
    Strict,
    /// Return the value that was registered first
    FirstRegistered,
}

impl AnonymousLookup {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnonymousLookup::Strict => "strict",
            AnonymousLookup::FirstRegistered => "first-registered",
        }
    }
}

impl FromStr for AnonymousLookup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(AnonymousLookup::Strict),
            "first-registered" | "first_registered" | "first" => {
                Ok(AnonymousLookup::FirstRegistered)
            }
            other => Err(format!(
                "unknown anonymous lookup policy '{}' (expected strict or first-registered)",
                other
            )),
        }
    }
}

impl std::fmt::Display for AnonymousLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registry behaviour options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistryOptions {
    /// Policy for ambiguous anonymous lookups.
    #[serde(default)]
    pub anonymous_lookup: AnonymousLookup,
}

impl RegistryOptions {
    pub fn with_anonymous_lookup(mut self, policy: AnonymousLookup) -> Self {
        self.anonymous_lookup = policy;
        self
    }

    /// Defaults with environment overrides applied.
    ///
    /// An unparseable value is ignored with a warning.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(value) = std::env::var(ANONYMOUS_LOOKUP_ENV) {
            match value.parse() {
                Ok(policy) => options.anonymous_lookup = policy,
                Err(err) => tracing::warn!("Ignoring {}: {}", ANONYMOUS_LOOKUP_ENV, err),
            }
        }
        options
    }
}
