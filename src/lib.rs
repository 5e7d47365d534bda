//! cfgplate - `#{...}` placeholder resolution
//!
//! Substitutes placeholders such as `#{db.host:localhost}` in strings and
//! property files. Placeholders may nest in both the key and the fallback
//! (`#{#{env}.url:#{default.url}}`), resolved values are expanded again,
//! and reference cycles are reported instead of recursing forever.
//!
//! # Core Modules
//!
//! - [`placeholder`] - Delimiters, scanning into segments, resolution and
//!   the system property/environment resolver
//! - [`properties`] - Flattened property maps loaded from JSON, YAML or TOML
//! - [`config`] - Placeholder settings in `~/.cfgplate/config.toml`
//! - [`core`] - Crate error type and terminal error formatting
//! - [`cli`] - The `cfgplate` command line
//!
//! # Example
//!
//! ```rust
//! use cfgplate::placeholder::{Delimiters, PlaceholderEngine};
//! use cfgplate::properties::PropertyMap;
//!
//! let props: PropertyMap = [("env", "prod"), ("prod.host", "db.example.org")]
//!     .into_iter()
//!     .collect();
//!
//! let engine = PlaceholderEngine::from_delimiters(Delimiters::system(false));
//! let value = engine.resolve("jdbc://#{#{env}.host}:#{port:5432}", &props).unwrap();
//! assert_eq!(value, "jdbc://db.example.org:5432");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod placeholder;
pub mod properties;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
