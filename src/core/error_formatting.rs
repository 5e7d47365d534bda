//! Turning errors into user-facing messages.

use super::error::{CfgplateError, ErrorContext};
use crate::placeholder::{DelimiterError, ResolutionError, ResolutionErrorKind};
use crate::properties::PropertiesError;

/// Convert any error into an [`ErrorContext`] with details and a suggestion.
///
/// An [`ErrorContext`] already carried by `error` is returned unchanged.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<ErrorContext>() {
        Ok(context) => return context,
        Err(error) => error,
    };
    let error = match error.downcast::<CfgplateError>() {
        Ok(error) => return create_error_context(error),
        Err(error) => error,
    };
    let error = match error.downcast::<PropertiesError>() {
        Ok(error) => return create_error_context(error.into()),
        Err(error) => error,
    };
    let error = match error.downcast::<ResolutionError>() {
        Ok(error) => return create_error_context(error.into()),
        Err(error) => error,
    };
    let error = match error.downcast::<DelimiterError>() {
        Ok(error) => return create_error_context(error.into()),
        Err(error) => error,
    };

    if error.chain().any(|cause| cause.downcast_ref::<toml::de::Error>().is_some()) {
        return ErrorContext::new(CfgplateError::ConfigError {
            message: error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of the settings file")
        .with_details(cause_chain(&error));
    }

    if let Some(io_error) = error.chain().find_map(|cause| cause.downcast_ref::<std::io::Error>()) {
        let suggestion = match io_error.kind() {
            std::io::ErrorKind::NotFound => "Check that the file exists and the path is correct",
            std::io::ErrorKind::PermissionDenied => "Check the file permissions",
            _ => "Check the file and try again",
        };
        return ErrorContext::new(CfgplateError::Other {
            message: error.to_string(),
        })
        .with_suggestion(suggestion)
        .with_details(cause_chain(&error));
    }

    let details = cause_chain(&error);
    let context = ErrorContext::new(CfgplateError::Other {
        message: error.to_string(),
    });
    if details.is_empty() {
        context
    } else {
        context.with_details(details)
    }
}

/// Attach details and a suggestion matching the error.
#[must_use]
pub fn create_error_context(error: CfgplateError) -> ErrorContext {
    let (details, suggestion) = describe(&error);
    let context = ErrorContext::new(error);
    let context = match details {
        Some(details) => context.with_details(details),
        None => context,
    };
    match suggestion {
        Some(suggestion) => context.with_suggestion(suggestion),
        None => context,
    }
}

fn describe(error: &CfgplateError) -> (Option<String>, Option<String>) {
    match error {
        CfgplateError::Delimiter(_) => (
            Some("Placeholders need a non-empty prefix and suffix that differ, and a single-character escape".to_string()),
            Some("Check --prefix, --suffix, --separator and --escape or the settings file".to_string()),
        ),
        CfgplateError::Resolution(error) => describe_resolution(error),
        CfgplateError::Properties(error) => describe_properties(error),
        CfgplateError::InvalidAssignment {
            ..
        } => (None, Some("Pass properties as -D KEY=VALUE".to_string())),
        CfgplateError::ConfigError {
            ..
        } => (None, Some("Check the settings file or the CFGPLATE_CONFIG_PATH variable".to_string())),
        CfgplateError::Other {
            ..
        } => (None, None),
    }
}

fn describe_resolution(error: &ResolutionError) -> (Option<String>, Option<String>) {
    match error.kind() {
        ResolutionErrorKind::CircularReference => (
            Some(format!("The value of '{}' ends up referencing itself", error.key())),
            Some("Break the cycle by giving one of the values a literal value".to_string()),
        ),
        ResolutionErrorKind::DepthExceeded => (
            Some("Values reference other values or nest placeholders too deeply".to_string()),
            Some("Flatten the chain of references by giving intermediate values literal values".to_string()),
        ),
        ResolutionErrorKind::Unresolvable => (
            Some("Unresolvable placeholders can be left in place with --lenient".to_string()),
            Some(format!("Define '{}' or add a fallback value after the separator", error.key())),
        ),
    }
}

fn describe_properties(error: &PropertiesError) -> (Option<String>, Option<String>) {
    match error {
        PropertiesError::Read {
            source,
            ..
        } => (Some(source.to_string()), Some("Check that the file exists and is readable".to_string())),
        PropertiesError::UnsupportedFormat {
            ..
        } => (None, Some("Use a .json, .yaml, .yml or .toml file".to_string())),
        PropertiesError::Json {
            source,
            ..
        } => (Some(source.to_string()), Some("Fix the JSON syntax".to_string())),
        PropertiesError::Yaml {
            source,
            ..
        } => (Some(source.to_string()), Some("Fix the YAML syntax".to_string())),
        PropertiesError::Toml {
            source,
            ..
        } => (Some(source.to_string()), Some("Fix the TOML syntax".to_string())),
        PropertiesError::Resolution {
            source,
            ..
        } => {
            let (_, suggestion) = describe_resolution(source);
            (Some(source.to_string()), suggestion)
        }
    }
}

/// Causes below the top-level message, one per line.
fn cause_chain(error: &anyhow::Error) -> String {
    error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>().join("\n")
}
