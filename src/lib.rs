//! Cascading, type-indexed configuration registry.
//!
//! Configuration scripts register values by type and optional name; later
//! scripts override earlier ones key by key. Application code looks values up
//! by type, optionally qualified by name.
//!
//! ```
//! use configr::config::Config;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! struct Foo {
//!     bar: String,
//! }
//!
//! let mut config = Config::new();
//! config.register_type::<Foo>("Foo");
//! config
//!     .load("base", "- add: { name: foo, type: Foo, value: { bar: baz } }")
//!     .unwrap();
//! config
//!     .load("production", "- add: { name: foo, type: Foo, value: { bar: bazzzzz } }")
//!     .unwrap();
//!
//! assert_eq!(config.get_named::<Foo>("foo").unwrap().bar, "bazzzzz");
//! assert_eq!(config.get::<Foo>().unwrap().bar, "bazzzzz");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod global;
pub mod logging;
pub mod registry;
pub mod script;

pub use config::Config;
pub use error::{Error, LoadError, LookupError, Result, ScriptFault};
pub use registry::Registry;
