//! The primary entry point: scan, then resolve.

use super::context::ResolutionContext;
use super::delimiters::Delimiters;
use super::error::{DelimiterError, ResolutionError};
use super::resolver::PlaceholderResolver;
use super::scanner::Scanner;
use super::segment::ParsedValue;

/// Resolves placeholder expressions against a [`PlaceholderResolver`].
///
/// The engine holds only its delimiter configuration. Every call scans the
/// input from scratch and builds its own [`ResolutionContext`], so one engine
/// can be shared freely between threads.
///
/// # Examples
///
/// ```
/// use cfgplate::placeholder::PlaceholderEngine;
/// use std::collections::HashMap;
///
/// let engine = PlaceholderEngine::new("#{", "}", Some(":"), Some('\\'), false)?;
/// let values = HashMap::from([
///     ("env".to_string(), "production".to_string()),
///     ("production.db.host".to_string(), "db.prod.internal".to_string()),
///     ("db.port".to_string(), "5432".to_string()),
/// ]);
///
/// let resolved = engine.resolve_with("Connecting to #{#{env}.db.host}:#{db.port}", |key| {
///     values.get(key).cloned()
/// })?;
/// assert_eq!(resolved, "Connecting to db.prod.internal:5432");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderEngine {
    delimiters: Delimiters,
}

impl PlaceholderEngine {
    /// Build an engine from raw delimiter settings.
    ///
    /// # Errors
    ///
    /// Returns a [`DelimiterError`] for an invalid configuration.
    pub fn new(
        prefix: &str,
        suffix: &str,
        separator: Option<&str>,
        escape: Option<char>,
        ignore_unresolvable: bool,
    ) -> Result<Self, DelimiterError> {
        Delimiters::new(prefix, suffix, separator, escape, ignore_unresolvable).map(Self::from_delimiters)
    }

    pub const fn from_delimiters(delimiters: Delimiters) -> Self {
        Self {
            delimiters,
        }
    }

    pub const fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Scan `text` without resolving anything.
    pub fn parse(&self, text: &str) -> ParsedValue {
        ParsedValue::new(text, Scanner::new(&self.delimiters).scan(text, false))
    }

    /// Substitute every placeholder in `text`.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolutionError`] when a placeholder has no value and no
    /// fallback (unless unresolvable placeholders are ignored), or when values
    /// reference each other in a cycle. The error's value chain ends with
    /// `text`.
    pub fn resolve(&self, text: &str, resolver: &dyn PlaceholderResolver) -> Result<String, ResolutionError> {
        tracing::trace!("Resolving placeholders in '{}'", text);
        let parsed = self.parse(text);
        if parsed.is_literal_only() {
            return Ok(parsed.segments().iter().map(|segment| segment.text()).collect());
        }
        let mut context = ResolutionContext::new(&self.delimiters, resolver);
        parsed.resolve_in(&mut context)
    }

    /// [`resolve`](Self::resolve) with a closure as the resolver.
    ///
    /// # Errors
    ///
    /// See [`resolve`](Self::resolve).
    pub fn resolve_with<F>(&self, text: &str, resolver: F) -> Result<String, ResolutionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.resolve(text, &resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_delimiters() {
        assert_eq!(PlaceholderEngine::new("", "}", None, None, false), Err(DelimiterError::EmptyPrefix));
    }

    #[test]
    fn test_literal_only_fast_path() {
        let engine = PlaceholderEngine::new("#{", "}", Some(":"), Some('\\'), false).unwrap();
        let resolved = engine.resolve_with(r"no placeholders, just \#{escaped}", |_| None).unwrap();
        assert_eq!(resolved, "no placeholders, just #{escaped}");
    }
}
