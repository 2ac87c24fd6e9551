//! Output formatting for registry listings.

use crate::registry::{EntryInfo, ErasedValue};
use serde::Serialize;
use serde_json::{Value, json};

/// Output format for the command-line tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Serializable summary of one entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntrySummary {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Present for built-in scalar types only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl From<EntryInfo<'_>> for EntrySummary {
    fn from(entry: EntryInfo<'_>) -> Self {
        Self {
            type_name: entry.key.tag.short_name(),
            name: entry.key.name.clone(),
            value: scalar_value(entry.value),
            origin: entry.origin.map(str::to_string),
        }
    }
}

/// JSON form of a value whose type is one of the built-in scalars.
pub fn scalar_value(value: &ErasedValue) -> Option<Value> {
    if let Some(v) = value.downcast_ref::<String>() {
        return Some(json!(v));
    }
    if let Some(v) = value.downcast_ref::<i32>() {
        return Some(json!(v));
    }
    if let Some(v) = value.downcast_ref::<i64>() {
        return Some(json!(v));
    }
    if let Some(v) = value.downcast_ref::<f64>() {
        return Some(json!(v));
    }
    if let Some(v) = value.downcast_ref::<bool>() {
        return Some(json!(v));
    }
    if let Some(v) = value.downcast_ref::<Vec<String>>() {
        return Some(json!(v));
    }
    None
}

/// Format entries as aligned text lines.
pub fn format_entries_text(entries: &[EntrySummary]) -> String {
    let mut out = String::new();
    if entries.is_empty() {
        out.push_str("(no entries)\n");
        return out;
    }

    for entry in entries {
        let name = entry
            .name
            .as_deref()
            .map(|n| format!("\"{}\"", n))
            .unwrap_or_else(|| "(anonymous)".to_string());
        out.push_str(&format!("{:<12} {:<20}", entry.type_name, name));
        if let Some(ref value) = entry.value {
            out.push_str(&format!(" = {}", value));
        }
        if let Some(ref origin) = entry.origin {
            out.push_str(&format!("  [{}]", origin));
        }
        out.push('\n');
    }
    out
}

/// Format entries in the requested format.
pub fn format_entries(
    entries: &[EntrySummary],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(format_entries_text(entries)),
        OutputFormat::Json => serde_json::to_string_pretty(entries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    struct Opaque;

    fn summaries(registry: &Registry) -> Vec<EntrySummary> {
        registry.entries().map(EntrySummary::from).collect()
    }

    #[test]
    fn test_summary_of_scalars_and_opaque_values() {
        let mut registry = Registry::new();
        registry.add_named("id", 12i32);
        registry.add(Opaque);

        let entries = summaries(&registry);
        assert_eq!(entries[0].type_name, "i32");
        assert_eq!(entries[0].value, Some(json!(12)));
        assert_eq!(entries[1].type_name, "Opaque");
        assert_eq!(entries[1].value, None);
        assert_eq!(entries[1].name, None);
    }

    #[test]
    fn test_text_format() {
        let mut registry = Registry::new();
        registry.add_named("stringId", "34".to_string());
        let text = format_entries_text(&summaries(&registry));
        assert!(text.starts_with("String"));
        assert!(text.contains("\"stringId\""));
        assert!(text.contains("= \"34\""));

        assert_eq!(format_entries_text(&[]), "(no entries)\n");
    }

    #[test]
    fn test_json_format() {
        let mut registry = Registry::new();
        registry.add_named("flag", true);
        let out = format_entries(&summaries(&registry), OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, json!([{"type": "bool", "name": "flag", "value": true}]));

        assert_eq!(format_entries(&[], OutputFormat::Json).unwrap(), "[]");
        assert_eq!(
            format_entries(&[], OutputFormat::Text).unwrap(),
            "(no entries)\n"
        );
    }
}
