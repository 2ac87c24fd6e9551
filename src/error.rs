//! Structured error types for lookups and loads.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to resolve a value from the registry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// No entry matches the requested type (and name, if given).
    #[error("{}", not_found_message(.type_name, .name))]
    NotFound {
        type_name: String,
        name: Option<String>,
    },

    /// An anonymous lookup found several named candidates and no anonymous entry.
    #[error("{}", ambiguous_message(.type_name, .candidates))]
    Ambiguous {
        type_name: String,
        candidates: Vec<String>,
    },
}

fn not_found_message(type_name: &str, name: &Option<String>) -> String {
    match name {
        Some(name) => format!("no {} registered under name \"{}\"", type_name, name),
        None => format!("no {} registered", type_name),
    }
}

fn ambiguous_message(type_name: &str, candidates: &[String]) -> String {
    format!(
        "ambiguous lookup: {} values of type {} are registered ({}) and none is anonymous",
        candidates.len(),
        type_name,
        candidates.join(", ")
    )
}

impl LookupError {
    pub fn not_found(type_name: impl Into<String>, name: Option<&str>) -> Self {
        Self::NotFound {
            type_name: type_name.into(),
            name: name.map(str::to_string),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }
}

/// A script host could not execute a script.
#[derive(Debug, Error)]
pub enum ScriptFault {
    #[error("syntax error: {0}")]
    Syntax(#[from] serde_yaml::Error),

    #[error("script must be a sequence of statements, found {found}")]
    NotASequence { found: &'static str },

    #[error("statement {index}: {message}")]
    Statement { index: usize, message: String },

    #[error("statement {index}: unknown type '{type_name}'")]
    UnknownType { index: usize, type_name: String },

    #[error("statement {index}: invalid {type_name} value: {source}")]
    Decode {
        index: usize,
        type_name: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl ScriptFault {
    pub fn statement(index: usize, message: impl Into<String>) -> Self {
        Self::Statement {
            index,
            message: message.into(),
        }
    }

    /// Zero-based index of the failing statement, where known.
    pub fn statement_index(&self) -> Option<usize> {
        match self {
            Self::Statement { index, .. }
            | Self::UnknownType { index, .. }
            | Self::Decode { index, .. } => Some(*index),
            Self::Syntax(_) | Self::NotASequence { .. } => None,
        }
    }
}

/// Failure while loading a configuration script.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The script file could not be read.
    #[error("failed to read config script '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The script host could not execute the script.
    #[error("failed to execute config script '{script}': {fault}")]
    Script {
        script: String,
        #[source]
        fault: ScriptFault,
    },
}

impl LoadError {
    /// Identity of the script that failed (file path or caller-supplied id).
    pub fn script(&self) -> String {
        match self {
            Self::Io { path, .. } => path.display().to_string(),
            Self::Script { script, .. } => script.clone(),
        }
    }
}

/// Umbrella error for the crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;
