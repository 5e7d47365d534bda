//! Crate-level error handling.
//!
//! - [`CfgplateError`] collects the typed errors of the library modules
//! - [`ErrorContext`] adds details and a suggestion for terminal output
//! - [`user_friendly_error`] converts any [`anyhow::Error`] into an
//!   [`ErrorContext`], recognizing the library's own error types
//!
//! ```rust
//! use cfgplate::core::{CfgplateError, user_friendly_error};
//!
//! let error = CfgplateError::InvalidAssignment {
//!     assignment: "port".to_string(),
//! };
//! let context = user_friendly_error(error.into());
//! assert!(context.suggestion.is_some());
//! ```

pub mod error;
pub mod error_formatting;

pub use error::{CfgplateError, ErrorContext};
pub use error_formatting::{create_error_context, user_friendly_error};
