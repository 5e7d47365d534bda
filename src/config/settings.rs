//! Placeholder syntax settings loaded from TOML.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::placeholder::delimiters::{SYSTEM_ESCAPE, SYSTEM_PREFIX, SYSTEM_SEPARATOR, SYSTEM_SUFFIX};
use crate::placeholder::{DelimiterError, Delimiters, PlaceholderEngine};

/// Environment variable that overrides the settings file location.
pub const CONFIG_PATH_ENV: &str = "CFGPLATE_CONFIG_PATH";

/// Placeholder syntax and policy.
///
/// Missing fields take the system-property defaults. An empty `separator` or
/// `escape` disables that feature:
///
/// ```toml
/// prefix = "${"
/// suffix = "}"
/// separator = ":-"
/// escape = ""
/// ignore_unresolvable = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderSettings {
    /// Text opening a placeholder
    pub prefix: String,

    /// Text closing a placeholder
    pub suffix: String,

    /// Text separating a key from its fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,

    /// Single character escaping a prefix or separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escape: Option<String>,

    /// Leave unresolvable placeholders in place instead of failing
    pub ignore_unresolvable: bool,
}

impl Default for PlaceholderSettings {
    fn default() -> Self {
        Self {
            prefix: SYSTEM_PREFIX.to_string(),
            suffix: SYSTEM_SUFFIX.to_string(),
            separator: Some(SYSTEM_SEPARATOR.to_string()),
            escape: Some(SYSTEM_ESCAPE.to_string()),
            ignore_unresolvable: false,
        }
    }
}

impl PlaceholderSettings {
    /// Load from `CFGPLATE_CONFIG_PATH` or the default location.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the default path cannot be determined or the file
    /// exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` when given, otherwise as [`load`](Self::load) does.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match std::env::var_os(CONFIG_PATH_ENV) {
                Some(path) => PathBuf::from(path),
                None => Self::default_path()?,
            },
        };

        if fs::try_exists(&path).await.unwrap_or(false) {
            Self::load_from(&path).await
        } else {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid settings TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    /// Write as pretty TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }

    /// `~/.cfgplate/config.toml`, or `%LOCALAPPDATA%\cfgplate\config.toml` on Windows.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("cfgplate")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".cfgplate")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// The configured escape character; an empty setting means none.
    ///
    /// # Errors
    ///
    /// Returns [`DelimiterError::InvalidEscape`] when the setting is longer
    /// than one character.
    pub fn escape_char(&self) -> Result<Option<char>, DelimiterError> {
        let Some(escape) = self.escape.as_deref() else {
            return Ok(None);
        };
        let mut chars = escape.chars();
        match (chars.next(), chars.next()) {
            (None, _) => Ok(None),
            (Some(escape), None) => Ok(Some(escape)),
            (Some(_), Some(_)) => Err(DelimiterError::InvalidEscape {
                escape: escape.to_string(),
            }),
        }
    }

    /// Validated delimiters.
    ///
    /// # Errors
    ///
    /// Returns a [`DelimiterError`] for an invalid combination.
    pub fn delimiters(&self) -> Result<Delimiters, DelimiterError> {
        let separator = self.separator.as_deref().filter(|separator| !separator.is_empty());
        Delimiters::new(
            self.prefix.as_str(),
            self.suffix.as_str(),
            separator,
            self.escape_char()?,
            self.ignore_unresolvable,
        )
    }

    /// Build an engine from these settings.
    ///
    /// # Errors
    ///
    /// Returns a [`DelimiterError`] for an invalid combination.
    pub fn to_engine(&self) -> Result<PlaceholderEngine, DelimiterError> {
        self.delimiters().map(PlaceholderEngine::from_delimiters)
    }
}
