//! System properties and environment variables as a placeholder source.
//!
//! The system-property convention uses fixed delimiters (`#{`, `}`, `:`, `\`)
//! and is strict by default. Values are looked up in a process-wide property
//! store first and then in the process environment.
//!
//! ```
//! use cfgplate::placeholder::system::{SystemPlaceholders, set_system_property};
//!
//! set_system_property("app.name", "billing");
//! let resolved = SystemPlaceholders::new().resolve("#{app.name}-#{app.region:eu-west-1}")?;
//! assert_eq!(resolved, "billing-eu-west-1");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use super::delimiters::Delimiters;
use super::engine::PlaceholderEngine;
use super::error::ResolutionError;
use super::resolver::PlaceholderResolver;

static SYSTEM_PROPERTIES: LazyLock<RwLock<HashMap<String, String>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Set a process-wide property, returning the previous value.
pub fn set_system_property(key: impl Into<String>, value: impl Into<String>) -> Option<String> {
    SYSTEM_PROPERTIES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(key.into(), value.into())
}

/// Read a process-wide property.
pub fn system_property(key: &str) -> Option<String> {
    SYSTEM_PROPERTIES.read().unwrap_or_else(PoisonError::into_inner).get(key).cloned()
}

/// Remove a process-wide property, returning its value.
pub fn clear_system_property(key: &str) -> Option<String> {
    SYSTEM_PROPERTIES.write().unwrap_or_else(PoisonError::into_inner).remove(key)
}

/// Looks keys up in the property store, then in the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemPropertyResolver;

impl PlaceholderResolver for SystemPropertyResolver {
    fn resolve_placeholder(&self, key: &str) -> Option<String> {
        if let Some(value) = system_property(key) {
            return Some(value);
        }
        match std::env::var(key) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::debug!(
                    "No system property or environment variable '{}': {}",
                    key,
                    error
                );
                None
            }
        }
    }
}

/// Resolves text against system properties with the fixed convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPlaceholders {
    engine: PlaceholderEngine,
}

impl Default for SystemPlaceholders {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemPlaceholders {
    /// Strict resolution: unresolvable placeholders are errors.
    pub fn new() -> Self {
        Self::with_ignore_unresolvable(false)
    }

    /// Lenient resolution: unresolvable placeholders are left in place.
    pub fn lenient() -> Self {
        Self::with_ignore_unresolvable(true)
    }

    pub fn with_ignore_unresolvable(ignore_unresolvable: bool) -> Self {
        Self {
            engine: PlaceholderEngine::from_delimiters(Delimiters::system(ignore_unresolvable)),
        }
    }

    pub const fn engine(&self) -> &PlaceholderEngine {
        &self.engine
    }

    /// Substitute system properties and environment variables in `text`.
    ///
    /// # Errors
    ///
    /// See [`PlaceholderEngine::resolve`].
    pub fn resolve(&self, text: &str) -> Result<String, ResolutionError> {
        self.engine.resolve(text, &SystemPropertyResolver)
    }
}
