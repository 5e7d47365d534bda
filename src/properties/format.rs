//! Property file formats and their conversion to a common value tree.

use std::path::Path;

use serde_json::Value;

use super::error::PropertiesError;

/// Supported property file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Json,
    Yaml,
    Toml,
}

impl SourceFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Parse `content` into a JSON value tree.
    ///
    /// `path` is only used for error reporting. Empty documents parse to an
    /// empty object.
    ///
    /// # Errors
    ///
    /// Returns the format-specific parse error.
    pub fn parse(self, content: &str, path: &Path) -> Result<Value, PropertiesError> {
        if content.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        match self {
            Self::Json => serde_json::from_str(content).map_err(|source| PropertiesError::Json {
                path: path.to_path_buf(),
                source,
            }),
            Self::Yaml => serde_yaml::from_str(content).map_err(|source| PropertiesError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
            Self::Toml => toml::from_str::<toml::Table>(content)
                .map(|table| toml_to_json(toml::Value::Table(table)))
                .map_err(|source| PropertiesError::Toml {
                    path: path.to_path_buf(),
                    source,
                }),
        }
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Toml => write!(f, "toml"),
        }
    }
}

/// TOML datetimes become strings; everything else maps one to one.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(text) => Value::String(text),
        toml::Value::Integer(number) => Value::from(number),
        toml::Value::Float(number) => serde_json::Number::from_f64(number)
            .map_or_else(|| Value::String(number.to_string()), Value::Number),
        toml::Value::Boolean(flag) => Value::Bool(flag),
        toml::Value::Datetime(datetime) => Value::String(datetime.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => {
            Value::Object(table.into_iter().map(|(key, value)| (key, toml_to_json(value))).collect())
        }
    }
}
