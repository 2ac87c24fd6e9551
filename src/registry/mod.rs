//! Type-indexed configuration registry.
//!
//! Values are keyed by their type and an optional name. Registering a key that
//! already exists replaces the value in place (last write wins) and keeps the
//! key's original registration position.
//!
//! ## Lookup rules
//! - Named lookups match `(type, name)` exactly.
//! - Anonymous lookups prefer the entry registered without a name. Failing
//!   that, a single entry of the requested type is returned whatever its name.
//!   Several named candidates are resolved by [`AnonymousLookup`].

mod key;

pub use key::{EntryKey, TypeTag};

use crate::config::{AnonymousLookup, RegistryOptions};
use crate::error::LookupError;
use indexmap::IndexMap;
use std::any::Any;
use std::sync::Arc;
use tracing::debug;

/// A type-erased value that always carries the tag of its concrete type.
#[derive(Clone)]
pub struct ErasedValue {
    tag: TypeTag,
    value: Arc<dyn Any + Send + Sync>,
}

impl ErasedValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            tag: TypeTag::of::<T>(),
            value: Arc::new(value),
        }
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErasedValue")
            .field("tag", &self.tag.short_name())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
struct Slot {
    value: ErasedValue,
    /// Script that last wrote this entry; `None` for direct API calls.
    origin: Option<Arc<str>>,
}

/// Read-only view of one registry entry.
#[derive(Debug, Clone, Copy)]
pub struct EntryInfo<'a> {
    pub key: &'a EntryKey,
    pub value: &'a ErasedValue,
    pub origin: Option<&'a str>,
}

/// In-memory store of configuration values.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: IndexMap<EntryKey, Slot>,
    options: RegistryOptions,
}

impl Registry {
    /// Create an empty registry with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with explicit options.
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            entries: IndexMap::new(),
            options,
        }
    }

    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    pub fn set_options(&mut self, options: RegistryOptions) {
        self.options = options;
    }

    /// Register an anonymous value, replacing any anonymous value of the same type.
    pub fn add<T: Any + Send + Sync>(&mut self, value: T) {
        self.insert(None, ErasedValue::new(value), None);
    }

    /// Register a named value, replacing any value with the same type and name.
    pub fn add_named<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.insert(Some(name.into()), ErasedValue::new(value), None);
    }

    /// Insert an erased value. Returns `true` if an existing entry was replaced.
    pub(crate) fn insert(
        &mut self,
        name: Option<String>,
        value: ErasedValue,
        origin: Option<Arc<str>>,
    ) -> bool {
        let key = EntryKey {
            tag: value.tag(),
            name,
        };
        debug!(key = %key, origin = origin.as_deref().unwrap_or("-"), "Registering value");
        let replaced = self.entries.insert(key, Slot { value, origin });
        if let Some(previous) = replaced {
            debug!(
                previous_origin = previous.origin.as_deref().unwrap_or("-"),
                "Replaced existing value"
            );
            true
        } else {
            false
        }
    }

    /// Anonymous lookup by type.
    pub fn get<T: Any>(&self) -> Result<&T, LookupError> {
        let slot = self.resolve_anonymous(TypeTag::of::<T>())?;
        Self::downcast(slot, None)
    }

    /// Named lookup by type and name.
    pub fn get_named<T: Any>(&self, name: &str) -> Result<&T, LookupError> {
        let tag = TypeTag::of::<T>();
        let slot = self
            .entries
            .get(&EntryKey::named(tag, name))
            .ok_or_else(|| LookupError::not_found(tag.short_name(), Some(name)))?;
        Self::downcast(slot, Some(name))
    }

    /// Like [`get`](Self::get), but `None` when the value is missing or ambiguous.
    pub fn try_get<T: Any>(&self) -> Option<&T> {
        self.get::<T>().ok()
    }

    /// Like [`get_named`](Self::get_named), but `None` when the value is missing.
    pub fn try_get_named<T: Any>(&self, name: &str) -> Option<&T> {
        self.get_named::<T>(name).ok()
    }

    /// Like [`get`](Self::get), falling back to `T::default()`.
    pub fn get_or_default<T: Any + Clone + Default>(&self) -> T {
        self.try_get::<T>().cloned().unwrap_or_default()
    }

    /// Like [`get_named`](Self::get_named), falling back to `T::default()`.
    pub fn get_or_default_named<T: Any + Clone + Default>(&self, name: &str) -> T {
        self.try_get_named::<T>(name).cloned().unwrap_or_default()
    }

    /// Whether an entry exists for `T` under exactly this name (or anonymously).
    pub fn contains<T: Any>(&self, name: Option<&str>) -> bool {
        let tag = TypeTag::of::<T>();
        let key = match name {
            Some(name) => EntryKey::named(tag, name),
            None => EntryKey::anonymous(tag),
        };
        self.entries.contains_key(&key)
    }

    /// Remove every entry. Options are kept.
    pub fn reset(&mut self) {
        debug!(count = self.entries.len(), "Resetting registry");
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = EntryInfo<'_>> {
        self.entries.iter().map(|(key, slot)| EntryInfo {
            key,
            value: &slot.value,
            origin: slot.origin.as_deref(),
        })
    }

    fn resolve_anonymous(&self, tag: TypeTag) -> Result<&Slot, LookupError> {
        if let Some(slot) = self.entries.get(&EntryKey::anonymous(tag)) {
            return Ok(slot);
        }

        let mut candidates = self.entries.iter().filter(|(key, _)| key.tag == tag);
        let Some((_, first)) = candidates.next() else {
            return Err(LookupError::not_found(tag.short_name(), None));
        };
        if candidates.next().is_none() {
            return Ok(first);
        }

        match self.options.anonymous_lookup {
            AnonymousLookup::FirstRegistered => Ok(first),
            AnonymousLookup::Strict => Err(LookupError::Ambiguous {
                type_name: tag.short_name(),
                candidates: self
                    .entries
                    .keys()
                    .filter(|key| key.tag == tag)
                    .filter_map(|key| key.name.as_ref().map(|name| format!("\"{}\"", name)))
                    .collect(),
            }),
        }
    }

    fn downcast<'a, T: Any>(slot: &'a Slot, name: Option<&str>) -> Result<&'a T, LookupError> {
        // Keys are derived from the value's own tag, so this only fails if
        // the tag and payload were built from different types.
        slot.value
            .downcast_ref::<T>()
            .ok_or_else(|| LookupError::not_found(TypeTag::of::<T>().short_name(), name))
    }
}
