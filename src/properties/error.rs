//! Errors raised while loading or resolving property files.

use std::path::PathBuf;

use thiserror::Error;

use crate::placeholder::ResolutionError;

/// Failure while loading or resolving a [`PropertyMap`](super::PropertyMap).
#[derive(Debug, Error)]
pub enum PropertiesError {
    /// The property file could not be read.
    #[error("Failed to read property file: {}", path.display())]
    Read {
        /// The file that was being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not map to a known format.
    #[error("Unsupported property file format: {}", path.display())]
    UnsupportedFormat {
        /// The file with the unrecognized extension
        path: PathBuf,
    },

    /// The file is not valid JSON.
    #[error("Invalid JSON in property file: {}", path.display())]
    Json {
        /// The file that failed to parse
        path: PathBuf,
        /// The parser error
        #[source]
        source: serde_json::Error,
    },

    /// The file is not valid YAML.
    #[error("Invalid YAML in property file: {}", path.display())]
    Yaml {
        /// The file that failed to parse
        path: PathBuf,
        /// The parser error
        #[source]
        source: serde_yaml::Error,
    },

    /// The file is not valid TOML.
    #[error("Invalid TOML in property file: {}", path.display())]
    Toml {
        /// The file that failed to parse
        path: PathBuf,
        /// The parser error
        #[source]
        source: toml::de::Error,
    },

    /// A property value contains a placeholder that could not be resolved.
    #[error("Failed to resolve property '{key}'")]
    Resolution {
        /// The property whose value failed
        key: String,
        /// The resolution failure
        #[source]
        source: ResolutionError,
    },
}

impl PropertiesError {
    /// The resolution failure, when this error wraps one.
    pub const fn resolution_error(&self) -> Option<&ResolutionError> {
        match self {
            Self::Resolution {
                source,
                ..
            } => Some(source),
            _ => None,
        }
    }
}
