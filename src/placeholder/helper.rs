//! Convenience wrapper with lenient defaults.

use std::collections::HashMap;
use std::hash::BuildHasher;

use super::engine::PlaceholderEngine;
use super::error::{DelimiterError, ResolutionError};

/// A [`PlaceholderEngine`] with a map-friendly surface.
///
/// [`PlaceholderHelper::new`] mirrors the common two-argument form: no
/// separator, no escape, and unresolvable placeholders are left in place.
///
/// ```
/// use cfgplate::placeholder::PlaceholderHelper;
/// use std::collections::HashMap;
///
/// let helper = PlaceholderHelper::new("${", "}")?;
/// let values = HashMap::from([("user".to_string(), "alice".to_string())]);
///
/// assert_eq!(helper.replace_placeholders("${user} on ${host}", &values)?, "alice on ${host}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderHelper {
    engine: PlaceholderEngine,
}

impl PlaceholderHelper {
    /// Lenient helper without fallback or escape syntax.
    ///
    /// # Errors
    ///
    /// Returns a [`DelimiterError`] for an invalid prefix or suffix.
    pub fn new(prefix: &str, suffix: &str) -> Result<Self, DelimiterError> {
        Self::with_options(prefix, suffix, None, None, true)
    }

    /// Fully configured helper.
    ///
    /// # Errors
    ///
    /// Returns a [`DelimiterError`] for an invalid configuration.
    pub fn with_options(
        prefix: &str,
        suffix: &str,
        separator: Option<&str>,
        escape: Option<char>,
        ignore_unresolvable: bool,
    ) -> Result<Self, DelimiterError> {
        PlaceholderEngine::new(prefix, suffix, separator, escape, ignore_unresolvable).map(|engine| Self {
            engine,
        })
    }

    pub const fn engine(&self) -> &PlaceholderEngine {
        &self.engine
    }

    /// Replace placeholders with values from `values`; missing keys have no value.
    ///
    /// # Errors
    ///
    /// See [`PlaceholderEngine::resolve`].
    pub fn replace_placeholders<S: BuildHasher>(
        &self,
        text: &str,
        values: &HashMap<String, String, S>,
    ) -> Result<String, ResolutionError> {
        self.engine.resolve_with(text, |key| values.get(key).cloned())
    }

    /// Replace placeholders using a resolver function.
    ///
    /// # Errors
    ///
    /// See [`PlaceholderEngine::resolve`].
    pub fn replace_placeholders_with_resolver<F>(&self, text: &str, resolver: F) -> Result<String, ResolutionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.engine.resolve_with(text, resolver)
    }
}
