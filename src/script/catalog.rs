//! Named types that scripts may construct.

use crate::registry::{ErasedValue, TypeTag};
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::any::Any;
use std::collections::HashMap;

/// Decodes a script value into a typed, erased registry value.
pub type Decoder = fn(Value) -> Result<ErasedValue, serde_yaml::Error>;

fn decode<T: DeserializeOwned + Any + Send + Sync>(
    value: Value,
) -> Result<ErasedValue, serde_yaml::Error> {
    serde_yaml::from_value::<T>(value).map(ErasedValue::new)
}

#[derive(Debug, Clone, Copy)]
struct CatalogEntry {
    tag: TypeTag,
    decoder: Decoder,
}

/// Maps script type names to Rust types.
///
/// Built-in names:
///
/// | name       | Rust type     |
/// |------------|---------------|
/// | `string`   | `String`      |
/// | `int`      | `i32`         |
/// | `long`     | `i64`         |
/// | `double`   | `f64`         |
/// | `bool`     | `bool`        |
/// | `string[]` | `Vec<String>` |
#[derive(Debug, Clone)]
pub struct TypeCatalog {
    types: HashMap<String, CatalogEntry>,
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl TypeCatalog {
    /// A catalog with no types at all.
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// A catalog holding the built-in scalar types.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::empty();
        catalog.register::<String>("string");
        catalog.register::<i32>("int");
        catalog.register::<i64>("long");
        catalog.register::<f64>("double");
        catalog.register::<bool>("bool");
        catalog.register::<Vec<String>>("string[]");
        catalog
    }

    /// Make `T` constructible from scripts as `name`.
    ///
    /// Registering an existing name replaces its type.
    pub fn register<T: DeserializeOwned + Any + Send + Sync>(&mut self, name: impl Into<String>) {
        self.types.insert(
            name.into(),
            CatalogEntry {
                tag: TypeTag::of::<T>(),
                decoder: decode::<T>,
            },
        );
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_type<T: DeserializeOwned + Any + Send + Sync>(mut self, name: impl Into<String>) -> Self {
        self.register::<T>(name);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Tag of the Rust type registered as `name`.
    pub fn tag(&self, name: &str) -> Option<TypeTag> {
        self.types.get(name).map(|entry| entry.tag)
    }

    /// Decoder for `name`, if registered.
    pub fn decoder(&self, name: &str) -> Option<Decoder> {
        self.types.get(name).map(|entry| entry.decoder)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
