//! The key-to-value lookup consulted during resolution.

/// Supplies replacement values for placeholder keys.
///
/// Implementations must be pure lookups from the engine's point of view: the
/// engine may call them many times per value and never caches the result.
/// Any `Fn(&str) -> Option<String>` closure is a resolver.
///
/// ```
/// use cfgplate::placeholder::{PlaceholderEngine, PlaceholderResolver};
///
/// struct Upper;
///
/// impl PlaceholderResolver for Upper {
///     fn resolve_placeholder(&self, key: &str) -> Option<String> {
///         Some(key.to_uppercase())
///     }
/// }
///
/// let engine = PlaceholderEngine::new("#{", "}", None, None, false)?;
/// assert_eq!(engine.resolve("#{abc}", &Upper)?, "ABC");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait PlaceholderResolver {
    /// The value for `key`, or `None` when the key is unknown.
    fn resolve_placeholder(&self, key: &str) -> Option<String>;
}

impl<F> PlaceholderResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve_placeholder(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// Consults several resolvers in order; the first value found wins.
#[derive(Default)]
pub struct ChainResolver<'a> {
    resolvers: Vec<&'a dyn PlaceholderResolver>,
}

impl<'a> ChainResolver<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lower-priority resolver.
    #[must_use]
    pub fn with(mut self, resolver: &'a dyn PlaceholderResolver) -> Self {
        self.resolvers.push(resolver);
        self
    }

    pub fn push(&mut self, resolver: &'a dyn PlaceholderResolver) {
        self.resolvers.push(resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }
}

impl PlaceholderResolver for ChainResolver<'_> {
    fn resolve_placeholder(&self, key: &str) -> Option<String> {
        self.resolvers.iter().find_map(|resolver| resolver.resolve_placeholder(key))
    }
}

impl std::fmt::Debug for ChainResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainResolver").field("resolvers", &self.resolvers.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_closure_resolver() {
        let map: HashMap<&str, &str> = HashMap::from([("name", "Alice")]);
        let resolver = |key: &str| map.get(key).map(|value| (*value).to_string());

        assert_eq!(resolver.resolve_placeholder("name"), Some("Alice".to_string()));
        assert_eq!(resolver.resolve_placeholder("missing"), None);
    }

    #[test]
    fn test_chain_resolver_priority() {
        let first = |key: &str| (key == "a").then(|| "first".to_string());
        let second = |key: &str| match key {
            "a" | "b" => Some("second".to_string()),
            _ => None,
        };

        let chain = ChainResolver::new().with(&first).with(&second);
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.resolve_placeholder("a"), Some("first".to_string()));
        assert_eq!(chain.resolve_placeholder("b"), Some("second".to_string()));
        assert_eq!(chain.resolve_placeholder("c"), None);
    }

    #[test]
    fn test_empty_chain() {
        let chain = ChainResolver::new();
        assert!(chain.is_empty());
        assert_eq!(chain.resolve_placeholder("anything"), None);
    }
}
