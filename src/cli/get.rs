//! Get subcommand for configr CLI
//!
//! Resolves one value with the registry's lookup rules. Only built-in types
//! can be printed; application types are opaque to the tool.

use crate::config::Config;
use crate::error::LookupError;
use clap::{Args, ValueEnum};
use serde_json::Value;

/// Arguments for the get subcommand
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Type of the value
    #[arg(value_enum)]
    pub value_type: ScalarType,

    /// Name of the value (anonymous lookup if omitted)
    pub name: Option<String>,
}

/// Built-in types the CLI can look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScalarType {
    String,
    Int,
    Long,
    Double,
    Bool,
}

fn lookup_as<T: std::any::Any + serde::Serialize>(
    config: &Config,
    name: Option<&str>,
) -> Result<Value, LookupError> {
    let value = match name {
        Some(name) => config.get_named::<T>(name)?,
        None => config.get::<T>()?,
    };
    Ok(serde_json::to_value(value).unwrap_or(Value::Null))
}

/// Look up `name` (or the anonymous value) as `value_type`.
pub fn lookup(
    config: &Config,
    value_type: ScalarType,
    name: Option<&str>,
) -> Result<Value, LookupError> {
    match value_type {
        ScalarType::String => lookup_as::<String>(config, name),
        ScalarType::Int => lookup_as::<i32>(config, name),
        ScalarType::Long => lookup_as::<i64>(config, name),
        ScalarType::Double => lookup_as::<f64>(config, name),
        ScalarType::Bool => lookup_as::<bool>(config, name),
    }
}

/// Render a looked-up value for printing; strings are printed bare.
pub fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
