//! Declarative YAML script host.
//!
//! A script is a YAML sequence of statements run top to bottom:
//!
//! ```yaml
//! - add: { type: Foo, value: { bar: baz } }       # anonymous Foo
//! - add: { name: foo, type: Foo, value: { bar: baz } }
//! - add: { name: id, value: 12 }                  # int, inferred
//! - add: { name: stringId, value: "34" }          # string, inferred
//! ```
//!
//! When `type` is omitted it is inferred from scalar values: strings become
//! `string`, integers `int` (or `long` past 32 bits), floats `double`, and
//! booleans `bool`. Mappings, sequences and null need an explicit `type`.
//! Values keep their YAML form until decoded, so `.nan` and `.inf` are
//! ordinary doubles.

use super::catalog::TypeCatalog;
use super::{Registrar, Script, ScriptHost};
use crate::error::ScriptFault;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::any::Any;
use tracing::trace;

/// One script statement. `add` is the only statement kind.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Statement {
    add: AddStatement,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AddStatement {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    type_name: Option<String>,
    value: Value,
}

/// Script host for the declarative YAML format.
#[derive(Debug, Clone, Default)]
pub struct YamlHost {
    catalog: TypeCatalog,
}

impl YamlHost {
    /// Host with the built-in scalar types only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host using an explicit catalog.
    pub fn with_catalog(catalog: TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Make `T` constructible from scripts as `name`.
    pub fn register_type<T: DeserializeOwned + Any + Send + Sync>(
        &mut self,
        name: impl Into<String>,
    ) {
        self.catalog.register::<T>(name);
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    fn run_statement(
        &self,
        index: usize,
        item: Value,
        registrar: &mut dyn Registrar,
    ) -> Result<(), ScriptFault> {
        let Statement { add } = serde_yaml::from_value::<Statement>(item)
            .map_err(|err| ScriptFault::statement(index, err.to_string()))?;

        let type_name = match add.type_name {
            Some(type_name) => type_name,
            None => infer_type(&add.value)
                .ok_or_else(|| {
                    ScriptFault::statement(
                        index,
                        format!(
                            "cannot infer a type for {} value; add an explicit 'type'",
                            value_kind(&add.value)
                        ),
                    )
                })?
                .to_string(),
        };

        let decoder = self
            .catalog
            .decoder(&type_name)
            .ok_or_else(|| ScriptFault::UnknownType {
                index,
                type_name: type_name.clone(),
            })?;
        let value = decoder(add.value).map_err(|source| ScriptFault::Decode {
            index,
            type_name: type_name.clone(),
            source,
        })?;

        trace!(index, type_name = %type_name, name = ?add.name, "add");
        match add.name {
            Some(name) => registrar.add_named(name, value),
            None => registrar.add(value),
        }
        Ok(())
    }
}

impl ScriptHost for YamlHost {
    fn execute(
        &self,
        script: &Script<'_>,
        registrar: &mut dyn Registrar,
    ) -> Result<(), ScriptFault> {
        if is_blank(script.source) {
            return Ok(());
        }

        let document: Value = serde_yaml::from_str(script.source)?;
        let statements = match document {
            Value::Null => return Ok(()),
            Value::Sequence(statements) => statements,
            other => {
                return Err(ScriptFault::NotASequence {
                    found: value_kind(&other),
                });
            }
        };

        for (index, item) in statements.into_iter().enumerate() {
            self.run_statement(index, item, registrar)?;
        }
        Ok(())
    }
}

/// Type name implied by a scalar value.
fn infer_type(value: &Value) -> Option<&'static str> {
    match value {
        Value::String(_) => Some("string"),
        Value::Bool(_) => Some("bool"),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if i32::try_from(i).is_ok() {
                    Some("int")
                } else {
                    Some("long")
                }
            } else if n.is_u64() {
                Some("long")
            } else {
                Some("double")
            }
        }
        Value::Null | Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// True for sources holding only whitespace, comments and document markers.
fn is_blank(source: &str) -> bool {
    source.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ErasedValue, TypeTag};

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<(Option<String>, ErasedValue)>,
    }

    impl Registrar for Recorder {
        fn add(&mut self, value: ErasedValue) {
            self.calls.push((None, value));
        }

        fn add_named(&mut self, name: String, value: ErasedValue) {
            self.calls.push((Some(name), value));
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Foo {
        bar: String,
    }

    fn run(host: &YamlHost, source: &str) -> Result<Recorder, ScriptFault> {
        let mut recorder = Recorder::default();
        host.execute(&Script::new("test", source), &mut recorder)?;
        Ok(recorder)
    }

    fn foo_host() -> YamlHost {
        let mut host = YamlHost::new();
        host.register_type::<Foo>("Foo");
        host
    }

    #[test]
    fn test_empty_scripts_register_nothing() {
        let host = YamlHost::new();
        for source in ["", "   \n", "# nothing here\n", "---\n", "[]", "~"] {
            let recorder = run(&host, source).unwrap();
            assert!(recorder.calls.is_empty(), "source {:?}", source);
        }
    }

    #[test]
    fn test_registrations_reported_in_order() {
        let source = r#"
- add: { name: foo, type: Foo, value: { bar: baz } }
- add: { name: stringId, value: "34" }
- add: { name: id, value: 12 }
- add: { type: Foo, value: { bar: anon } }
"#;
        let recorder = run(&foo_host(), source).unwrap();
        let names: Vec<_> = recorder.calls.iter().map(|(n, _)| n.clone()).collect();
        assert_eq!(
            names,
            vec![
                Some("foo".to_string()),
                Some("stringId".to_string()),
                Some("id".to_string()),
                None
            ]
        );
        assert_eq!(recorder.calls[1].1.downcast_ref::<String>().unwrap(), "34");
        assert_eq!(recorder.calls[2].1.downcast_ref::<i32>(), Some(&12));
        assert_eq!(
            recorder.calls[3].1.downcast_ref::<Foo>(),
            Some(&Foo {
                bar: "anon".to_string()
            })
        );
    }

    #[test]
    fn test_scalar_type_inference() {
        let source = r#"
- add: { name: small, value: 7 }
- add: { name: big, value: 10000000000 }
- add: { name: ratio, value: 0.5 }
- add: { name: flag, value: true }
"#;
        let recorder = run(&YamlHost::new(), source).unwrap();
        let tags: Vec<_> = recorder.calls.iter().map(|(_, v)| v.tag()).collect();
        assert_eq!(
            tags,
            vec![
                TypeTag::of::<i32>(),
                TypeTag::of::<i64>(),
                TypeTag::of::<f64>(),
                TypeTag::of::<bool>()
            ]
        );
    }

    #[test]
    fn test_non_finite_doubles() {
        let source = r#"
- add: { name: x, type: double, value: .nan }
- add: { name: y, value: .inf }
- add: { name: z, value: -.inf }
"#;
        let recorder = run(&YamlHost::new(), source).unwrap();
        assert!(recorder.calls[0].1.downcast_ref::<f64>().unwrap().is_nan());
        assert_eq!(recorder.calls[1].1.downcast_ref::<f64>(), Some(&f64::INFINITY));
        assert_eq!(
            recorder.calls[2].1.downcast_ref::<f64>(),
            Some(&f64::NEG_INFINITY)
        );
    }

    #[test]
    fn test_explicit_type_overrides_inference() {
        let recorder = run(
            &YamlHost::new(),
            "- add: { name: id, type: long, value: 12 }",
        )
        .unwrap();
        assert_eq!(recorder.calls[0].1.downcast_ref::<i64>(), Some(&12));
    }

    #[test]
    fn test_mapping_without_type_is_rejected() {
        let err = run(&foo_host(), "- add: { name: foo, value: { bar: baz } }").unwrap_err();
        assert_eq!(err.statement_index(), Some(0));
        assert!(err.to_string().contains("cannot infer a type for mapping"));
    }

    #[test]
    fn test_unknown_type() {
        let source = "- add: { name: id, value: 1 }\n- add: { name: foo, type: Foo, value: {} }";
        let err = run(&YamlHost::new(), source).unwrap_err();
        assert!(matches!(
            err,
            ScriptFault::UnknownType { index: 1, ref type_name } if type_name == "Foo"
        ));
    }

    #[test]
    fn test_decode_failure() {
        let err = run(&foo_host(), "- add: { type: Foo, value: { baz: 1 } }").unwrap_err();
        assert!(matches!(err, ScriptFault::Decode { index: 0, .. }));
    }

    #[test]
    fn test_unknown_statement() {
        let err = run(&YamlHost::new(), "- set: { name: id, value: 1 }").unwrap_err();
        assert!(matches!(err, ScriptFault::Statement { index: 0, .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = run(&YamlHost::new(), "- add: { name: id, value: [1, 2").unwrap_err();
        assert!(matches!(err, ScriptFault::Syntax(_)));
    }

    #[test]
    fn test_document_must_be_sequence() {
        let err = run(&YamlHost::new(), "foo: bar").unwrap_err();
        assert!(matches!(err, ScriptFault::NotASequence { found: "mapping" }));
    }
}
