//! Options and helpers shared by the subcommands.

use anyhow::Result;
use clap::Args;

use crate::config::PlaceholderSettings;
use crate::core::{CfgplateError, create_error_context};
use crate::placeholder::{PlaceholderEngine, ResolutionErrorKind};
use crate::properties::PropertyMap;

/// Maximum number of "did you mean" suggestions.
const MAX_SUGGESTIONS: usize = 3;

/// Delimiter options layered over the settings file.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimiterArgs {
    /// Text opening a placeholder
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub prefix: Option<String>,

    /// Text closing a placeholder
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub suffix: Option<String>,

    /// Text separating a key from its fallback (empty disables fallbacks)
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub separator: Option<String>,

    /// Escape character (empty disables escaping)
    #[arg(long, value_name = "CHAR", allow_hyphen_values = true)]
    pub escape: Option<String>,
}

impl DelimiterArgs {
    /// Override `settings` with every option that was given.
    #[must_use]
    pub fn apply(&self, mut settings: PlaceholderSettings) -> PlaceholderSettings {
        if let Some(prefix) = &self.prefix {
            settings.prefix.clone_from(prefix);
        }
        if let Some(suffix) = &self.suffix {
            settings.suffix.clone_from(suffix);
        }
        if let Some(separator) = &self.separator {
            settings.separator = Some(separator.clone());
        }
        if let Some(escape) = &self.escape {
            settings.escape = Some(escape.clone());
        }
        settings
    }

    /// Build the engine from `settings` with these overrides.
    ///
    /// # Errors
    ///
    /// Returns [`CfgplateError::Delimiter`] for an invalid combination.
    pub fn engine(&self, settings: PlaceholderSettings, lenient: bool) -> Result<PlaceholderEngine> {
        let mut settings = self.apply(settings);
        if lenient {
            settings.ignore_unresolvable = true;
        }
        tracing::debug!(
            "Using delimiters prefix='{}' suffix='{}' separator={:?} escape={:?} lenient={}",
            settings.prefix,
            settings.suffix,
            settings.separator,
            settings.escape,
            settings.ignore_unresolvable
        );
        Ok(settings.to_engine().map_err(CfgplateError::from)?)
    }
}

/// Parse `KEY=VALUE`; the value may be empty and may contain `=`.
///
/// # Errors
///
/// Returns [`CfgplateError::InvalidAssignment`] when there is no `=` or the key is empty.
pub fn parse_assignment(assignment: &str) -> Result<(String, String), CfgplateError> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(CfgplateError::InvalidAssignment {
            assignment: assignment.to_string(),
        }),
    }
}

/// Wrap `error` in an [`ErrorContext`](crate::core::ErrorContext), suggesting
/// similar keys from `known` when a placeholder was unresolvable.
pub fn with_key_suggestions(error: CfgplateError, known: &PropertyMap) -> anyhow::Error {
    let unresolved = match &error {
        CfgplateError::Resolution(error) => Some(error),
        CfgplateError::Properties(error) => error.resolution_error(),
        _ => None,
    };
    let suggestions = unresolved
        .filter(|error| error.kind() == ResolutionErrorKind::Unresolvable)
        .map(|error| known.suggest_keys(error.key(), MAX_SUGGESTIONS))
        .unwrap_or_default();

    let context = create_error_context(error);
    if suggestions.is_empty() {
        return context.into();
    }

    let quoted = suggestions.iter().map(|key| format!("'{key}'")).collect::<Vec<_>>();
    context.with_suggestion(format!("Did you mean {}?", quoted.join(" or "))).into()
}
