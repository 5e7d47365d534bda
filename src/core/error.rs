//! Error types for cfgplate.
//!
//! Library modules return their own typed errors ([`DelimiterError`],
//! [`ResolutionError`], [`PropertiesError`]). [`CfgplateError`] gathers them
//! for the command-line layer, and [`ErrorContext`] pairs an error with the
//! details and suggestion shown to the user.
//!
//! ```rust,no_run
//! use cfgplate::core::{CfgplateError, ErrorContext};
//!
//! let context = ErrorContext::new(CfgplateError::InvalidAssignment {
//!     assignment: "novalue".to_string(),
//! })
//! .with_suggestion("Use -D KEY=VALUE");
//!
//! context.display();
//! ```

use std::fmt;

use colored::Colorize;
use thiserror::Error;

use crate::placeholder::{DelimiterError, ResolutionError};
use crate::properties::PropertiesError;

/// Every failure the command-line tool reports.
#[derive(Error, Debug)]
pub enum CfgplateError {
    /// The configured delimiters are unusable.
    #[error("Invalid placeholder syntax: {0}")]
    Delimiter(#[from] DelimiterError),

    /// A placeholder could not be resolved.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A property file could not be loaded or resolved.
    #[error(transparent)]
    Properties(#[from] PropertiesError),

    /// A `KEY=VALUE` command-line assignment is malformed.
    #[error("Invalid property assignment '{assignment}': expected KEY=VALUE")]
    InvalidAssignment {
        /// The rejected argument
        assignment: String,
    },

    /// The settings file is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// What is wrong with the configuration
        message: String,
    },

    /// Any other failure.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// An error with user-facing details and a suggested fix.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CfgplateError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: CfgplateError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion, shown in green.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details, shown in yellow.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = CfgplateError::InvalidAssignment {
            assignment: "novalue".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid property assignment 'novalue': expected KEY=VALUE");

        let error = CfgplateError::from(DelimiterError::EmptyPrefix);
        assert_eq!(error.to_string(), "Invalid placeholder syntax: placeholder prefix must not be empty");
    }

    #[test]
    fn test_context_display_includes_details_and_suggestion() {
        let context = ErrorContext::new(CfgplateError::Other {
            message: "boom".to_string(),
        })
        .with_details("it broke")
        .with_suggestion("fix it");

        assert_eq!(context.to_string(), "boom\nDetails: it broke\nSuggestion: fix it");
    }

    #[test]
    fn test_context_is_an_anyhow_error() {
        let context = ErrorContext::new(CfgplateError::ConfigError {
            message: "bad".to_string(),
        });
        let error: anyhow::Error = context.into();
        assert!(error.downcast_ref::<ErrorContext>().is_some());
    }
}
