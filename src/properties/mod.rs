//! Flattened property maps.
//!
//! Structured configuration files (JSON, YAML or TOML) are flattened into a
//! sorted map of dot-notation keys so their values can be referenced from
//! placeholders:
//!
//! ```yaml
//! db:
//!   host: localhost
//!   replicas: [r1, r2]
//!   url: "postgres://#{db.host}/app"
//! ```
//!
//! becomes `db.host`, `db.replicas[0]`, `db.replicas[1]` and `db.url`.
//! [`PropertyMap::resolve_values`] then expands the placeholders in every value
//! against the map itself.

pub mod error;
pub mod format;


use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use strsim::levenshtein;

use crate::placeholder::{PlaceholderEngine, PlaceholderResolver};

pub use error::PropertiesError;
pub use format::SourceFormat;

/// Suggestions must be within this share of the target key's length.
const SIMILARITY_THRESHOLD_PERCENT: usize = 50;

/// Sorted map of flattened property keys to string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyMap {
    entries: BTreeMap<String, String>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a value tree.
    ///
    /// Object members are joined with `.`, array elements get an `[index]`
    /// suffix, `null` becomes the empty string and other scalars use their
    /// JSON rendering (strings without quotes). A scalar at the root has no
    /// key and is ignored.
    pub fn from_value(value: &Value) -> Self {
        let mut map = Self::new();
        flatten_into(&mut map.entries, "", value);
        map
    }

    /// Parse `content` in the given format and flatten it.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertiesError`] when the content does not parse.
    pub fn from_str_with_format(content: &str, format: SourceFormat) -> Result<Self, PropertiesError> {
        let value = format.parse(content, Path::new("<inline>"))?;
        Ok(Self::from_value(&value))
    }

    /// Load and flatten a property file, picking the format from its extension.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertiesError`] when the extension is unknown, the file
    /// cannot be read, or its content does not parse.
    pub async fn load(path: &Path) -> Result<Self, PropertiesError> {
        let format = SourceFormat::from_path(path).ok_or_else(|| PropertiesError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let content = tokio::fs::read_to_string(path).await.map_err(|source| PropertiesError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let map = Self::from_value(&format.parse(&content, path)?);
        tracing::debug!("Loaded {} properties from {} ({})", map.len(), path.display(), format);
        Ok(map)
    }

    /// Set a property, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Copy every entry of `other` into this map; `other` wins on conflicts.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Expand placeholders in every value against this map.
    ///
    /// # Errors
    ///
    /// Returns [`PropertiesError::Resolution`] for the first value (in key
    /// order) that cannot be resolved.
    pub fn resolve_values(&self, engine: &PlaceholderEngine) -> Result<Self, PropertiesError> {
        self.resolve_values_with(engine, self)
    }

    /// Expand placeholders in every value against `resolver`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertiesError::Resolution`] for the first value (in key
    /// order) that cannot be resolved.
    pub fn resolve_values_with(
        &self,
        engine: &PlaceholderEngine,
        resolver: &dyn PlaceholderResolver,
    ) -> Result<Self, PropertiesError> {
        let mut resolved = BTreeMap::new();
        for (key, value) in &self.entries {
            let value = engine.resolve(value, resolver).map_err(|source| PropertiesError::Resolution {
                key: key.clone(),
                source,
            })?;
            resolved.insert(key.clone(), value);
        }
        Ok(Self {
            entries: resolved,
        })
    }

    /// Up to `limit` keys close to `key`, nearest first.
    pub fn suggest_keys(&self, key: &str, limit: usize) -> Vec<String> {
        suggest_similar(key, self.keys(), limit)
    }
}

impl PlaceholderResolver for PropertyMap {
    fn resolve_placeholder(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Rank `candidates` by Levenshtein distance to `target`.
pub(crate) fn suggest_similar<'a>(
    target: &str,
    candidates: impl Iterator<Item = &'a str>,
    limit: usize,
) -> Vec<String> {
    let max_distance = target.chars().count() * SIMILARITY_THRESHOLD_PERCENT / 100;
    let mut scored: Vec<_> = candidates
        .map(|candidate| (candidate, levenshtein(target, candidate)))
        .filter(|(_, distance)| *distance <= max_distance)
        .collect();

    // Stable sort keeps key order between equal distances
    scored.sort_by_key(|(_, distance)| *distance);
    scored.into_iter().take(limit).map(|(candidate, _)| candidate.to_owned()).collect()
}

fn flatten_into(entries: &mut BTreeMap<String, String>, prefix: &str, value: &Value) {
    match value {
        Value::Object(members) => {
            for (name, member) in members {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                flatten_into(entries, &key, member);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(entries, &format!("{prefix}[{index}]"), item);
            }
        }
        scalar if prefix.is_empty() => {
            tracing::debug!("Ignoring scalar property document: {}", scalar);
        }
        Value::Null => {
            entries.insert(prefix.to_owned(), String::new());
        }
        Value::String(text) => {
            entries.insert(prefix.to_owned(), text.clone());
        }
        scalar => {
            entries.insert(prefix.to_owned(), scalar.to_string());
        }
    }
}
