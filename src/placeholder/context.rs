//! Per-call resolution state.

use std::collections::HashSet;

use super::delimiters::Delimiters;
use super::error::ResolutionError;
use super::resolver::PlaceholderResolver;
use super::scanner::Scanner;
use super::segment::Segment;

/// Deepest combined chain of expanded values and nested placeholders.
pub const MAX_RESOLUTION_DEPTH: usize = 128;

/// State for one top-level resolution.
///
/// Owns the set of keys on the active resolution path. A key is marked when
/// its resolved value starts being expanded and unmarked once that expansion
/// succeeds; on failure the set is simply dropped with the context. A context
/// is never shared between calls, so concurrent resolutions stay independent.
///
/// Separately it counts how many values and nested placeholders are being
/// expanded at once, bounded by [`MAX_RESOLUTION_DEPTH`].
pub struct ResolutionContext<'a> {
    delimiters: &'a Delimiters,
    resolver: &'a dyn PlaceholderResolver,
    visited: HashSet<String>,
    nesting: usize,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(delimiters: &'a Delimiters, resolver: &'a dyn PlaceholderResolver) -> Self {
        Self {
            delimiters,
            resolver,
            visited: HashSet::new(),
            nesting: 0,
        }
    }

    pub const fn delimiters(&self) -> &Delimiters {
        self.delimiters
    }

    /// Ask the resolver for `key`. The empty key never has a value.
    pub fn resolve(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return None;
        }
        self.resolver.resolve_placeholder(key)
    }

    /// Put `key` on the active path.
    ///
    /// # Errors
    ///
    /// Returns a circular-reference error when `key` is already on the path.
    pub fn mark_visited(&mut self, key: &str) -> Result<(), ResolutionError> {
        if !self.visited.insert(key.to_owned()) {
            tracing::debug!("Circular placeholder reference detected at '{}'", key);
            return Err(ResolutionError::circular(key));
        }
        Ok(())
    }

    pub fn unmark(&mut self, key: &str) {
        self.visited.remove(key);
    }

    pub fn is_visited(&self, key: &str) -> bool {
        self.visited.contains(key)
    }

    /// Number of keys on the active path.
    pub fn depth(&self) -> usize {
        self.visited.len()
    }

    /// Start expanding one more level below `key`.
    ///
    /// # Errors
    ///
    /// Returns a depth error once [`MAX_RESOLUTION_DEPTH`] levels are open.
    pub fn descend(&mut self, key: &str) -> Result<(), ResolutionError> {
        if self.nesting >= MAX_RESOLUTION_DEPTH {
            tracing::debug!("Resolution depth limit reached at '{}'", key);
            return Err(ResolutionError::depth_exceeded(key, MAX_RESOLUTION_DEPTH));
        }
        self.nesting += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Number of levels currently being expanded.
    pub const fn nesting(&self) -> usize {
        self.nesting
    }

    /// Scan a resolved value with the same delimiters.
    pub fn reparse(&self, text: &str) -> Vec<Segment> {
        Scanner::new(self.delimiters).scan(text, false)
    }

    pub fn placeholder_text(&self, key: &str) -> String {
        self.delimiters.placeholder_text(key)
    }

    /// Apply the unresolvable policy to `key`.
    ///
    /// In lenient mode the placeholder is rebuilt from the (possibly resolved)
    /// key. In strict mode an error is returned; when the raw placeholder text
    /// differs from the key it is recorded as the innermost value.
    ///
    /// # Errors
    ///
    /// Returns an unresolvable-placeholder error unless unresolvable
    /// placeholders are ignored.
    pub fn handle_unresolvable(&self, key: &str, raw_text: &str) -> Result<String, ResolutionError> {
        if self.delimiters.ignore_unresolvable() {
            tracing::trace!("Leaving unresolvable placeholder '{}' in place", key);
            return Ok(self.placeholder_text(key));
        }
        let original = (key != raw_text).then(|| self.placeholder_text(raw_text));
        Err(ResolutionError::unresolvable(key, original))
    }
}

impl std::fmt::Debug for ResolutionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionContext")
            .field("delimiters", self.delimiters)
            .field("visited", &self.visited)
            .field("nesting", &self.nesting)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::error::ResolutionErrorKind;

    fn no_values(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_mark_and_unmark() {
        let delimiters = Delimiters::system(false);
        let mut context = ResolutionContext::new(&delimiters, &no_values);

        context.mark_visited("a").unwrap();
        assert!(context.is_visited("a"));
        assert_eq!(context.depth(), 1);

        let error = context.mark_visited("a").unwrap_err();
        assert_eq!(error.kind(), ResolutionErrorKind::CircularReference);

        context.unmark("a");
        assert!(!context.is_visited("a"));
        assert_eq!(context.depth(), 0);
    }

    #[test]
    fn test_descend_stops_at_limit() {
        let delimiters = Delimiters::system(false);
        let mut context = ResolutionContext::new(&delimiters, &no_values);

        for _ in 0..MAX_RESOLUTION_DEPTH {
            context.descend("k").unwrap();
        }
        let error = context.descend("k").unwrap_err();
        assert_eq!(error.kind(), ResolutionErrorKind::DepthExceeded);
        assert_eq!(context.nesting(), MAX_RESOLUTION_DEPTH);

        context.ascend();
        assert!(context.descend("k").is_ok());
    }

    #[test]
    fn test_empty_key_is_never_resolved() {
        let delimiters = Delimiters::system(false);
        let everything = |_: &str| Some("value".to_string());
        let context = ResolutionContext::new(&delimiters, &everything);

        assert_eq!(context.resolve(""), None);
        assert_eq!(context.resolve("x"), Some("value".to_string()));
    }

    #[test]
    fn test_handle_unresolvable_strict() {
        let delimiters = Delimiters::system(false);
        let context = ResolutionContext::new(&delimiters, &no_values);

        let error = context.handle_unresolvable("prod.host", "#{env}.host").unwrap_err();
        assert_eq!(error.key(), "prod.host");
        assert_eq!(error.values(), ["#{#{env}.host}".to_string()]);

        let error = context.handle_unresolvable("name", "name").unwrap_err();
        assert!(error.values().is_empty());
    }

    #[test]
    fn test_handle_unresolvable_lenient_uses_key() {
        let delimiters = Delimiters::system(true);
        let context = ResolutionContext::new(&delimiters, &no_values);

        assert_eq!(context.handle_unresolvable("prod.host", "#{env}.host").unwrap(), "#{prod.host}");
    }

    #[test]
    fn test_reparse_uses_same_delimiters() {
        let delimiters = Delimiters::system(false);
        let context = ResolutionContext::new(&delimiters, &no_values);

        let segments = context.reparse("x #{y}");
        assert_eq!(segments.len(), 2);
        assert!(segments[0].is_literal());
        assert!(!segments[1].is_literal());
    }
}
