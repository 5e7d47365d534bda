//! Error types for placeholder parsing and resolution.
//!
//! Two failure families exist:
//!
//! - [`DelimiterError`] is raised when an engine is constructed with an unusable
//!   delimiter configuration. It fails fast, before any text is scanned.
//! - [`ResolutionError`] is raised while resolving a value. It records the
//!   offending key and the chain of enclosing values that were being resolved,
//!   innermost first, so the rendered message reads like a stack:
//!
//! ```text
//! Could not resolve placeholder 'db.host' in value "#{db.host}" <- "Connecting to #{db.host}"
//! ```

use thiserror::Error;

/// Invalid delimiter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelimiterError {
    /// The placeholder prefix was empty.
    #[error("placeholder prefix must not be empty")]
    EmptyPrefix,

    /// The placeholder suffix was empty.
    #[error("placeholder suffix must not be empty")]
    EmptySuffix,

    /// A separator was configured but is the empty string.
    #[error("placeholder separator must not be empty when configured")]
    EmptySeparator,

    /// Prefix and suffix are identical, which makes nesting ambiguous.
    #[error("placeholder prefix and suffix must differ (both are '{delimiter}')")]
    PrefixEqualsSuffix {
        /// The shared delimiter text
        delimiter: String,
    },

    /// The escape setting is not exactly one character.
    #[error("escape must be a single character, got '{escape}'")]
    InvalidEscape {
        /// The rejected escape setting
        escape: String,
    },
}

/// Why a resolution failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionErrorKind {
    /// The resolver had no value for the key and no fallback was given.
    Unresolvable,
    /// The key was reached again while it was still being resolved.
    CircularReference,
    /// Values and nested placeholders went deeper than the resolution limit.
    DepthExceeded,
}

/// A placeholder could not be resolved.
///
/// The `values` chain grows as the error propagates outwards: every enclosing
/// value that was being resolved appends itself, so the outermost (the text
/// originally handed to the engine) is always last.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}{chain}", chain = format_value_chain(.values))]
pub struct ResolutionError {
    kind: ResolutionErrorKind,
    reason: String,
    key: String,
    values: Vec<String>,
}

impl ResolutionError {
    /// No value and no fallback for `key`.
    ///
    /// `original` is the full placeholder text when it differs from the key,
    /// for example when the key itself was assembled from nested placeholders.
    pub(crate) fn unresolvable(key: &str, original: Option<String>) -> Self {
        Self {
            kind: ResolutionErrorKind::Unresolvable,
            reason: format!("Could not resolve placeholder '{key}'"),
            key: key.to_owned(),
            values: original.into_iter().collect(),
        }
    }

    pub(crate) fn circular(key: &str) -> Self {
        Self {
            kind: ResolutionErrorKind::CircularReference,
            reason: format!("Circular placeholder reference '{key}'"),
            key: key.to_owned(),
            values: Vec::new(),
        }
    }

    pub(crate) fn depth_exceeded(key: &str, limit: usize) -> Self {
        Self {
            kind: ResolutionErrorKind::DepthExceeded,
            reason: format!("Placeholder resolution exceeded {limit} levels at '{key}'"),
            key: key.to_owned(),
            values: Vec::new(),
        }
    }

    /// Record an enclosing value that was being resolved when this error occurred.
    #[must_use]
    pub(crate) fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    /// The failure category.
    pub const fn kind(&self) -> ResolutionErrorKind {
        self.kind
    }

    /// The reason without the value chain.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The placeholder key that failed.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Enclosing values, innermost first.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Whether this error was caused by a reference cycle.
    pub fn is_circular(&self) -> bool {
        self.kind == ResolutionErrorKind::CircularReference
    }
}

fn format_value_chain(values: &[String]) -> String {
    if values.is_empty() {
        return String::new();
    }
    let chain = values.iter().map(|value| format!("\"{value}\"")).collect::<Vec<_>>().join(" <- ");
    format!(" in value {chain}")
}
