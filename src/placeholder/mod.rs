//! Placeholder parsing and resolution.
//!
//! This module turns strings such as `"Connecting to #{#{env}.db.host}:#{db.port}"`
//! into fully substituted values using a pluggable key/value lookup.
//!
//! # Syntax
//!
//! With the default `#{`, `}`, `:` and `\` delimiters:
//!
//! - `#{key}` is replaced by the value of `key`
//! - `#{key:fallback}` uses `fallback` when `key` has no value. Only the first
//!   unescaped separator splits, so `#{url:http://host:8080}` falls back to
//!   `http://host:8080`
//! - `#{#{env}.host}` resolves the inner placeholder first and uses the result
//!   as the key
//! - `\#{key}` is left as the literal text `#{key}`
//! - A prefix without a matching suffix is plain text
//!
//! Resolved values are scanned again with the same delimiters, so values may
//! reference other keys. A key that is reached again while its own value is
//! still being expanded is reported as a circular reference.
//!
//! # Architecture
//!
//! - [`delimiters`]: validated syntax and the unresolvable policy
//! - `scanner`: text to [`Segment`] tree
//! - [`context`]: per-call state (resolver, cycle detection)
//! - `resolve`: the segment tree walk
//! - [`engine`]: the [`PlaceholderEngine`] entry point
//! - [`helper`]: [`PlaceholderHelper`], a lenient map-oriented wrapper
//! - [`system`]: system properties and environment variables with fixed delimiters
//!
//! # Examples
//!
//! ```
//! use cfgplate::placeholder::PlaceholderEngine;
//!
//! let engine = PlaceholderEngine::new("#{", "}", Some(":"), Some('\\'), false)?;
//! let resolved = engine.resolve_with("Hello #{unknown:Guest}!", |_| None)?;
//! assert_eq!(resolved, "Hello Guest!");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod context;
pub mod delimiters;
pub mod engine;
pub mod error;
pub mod helper;
mod resolve;
pub mod resolver;
mod scanner;
pub mod segment;
pub mod system;


pub use context::ResolutionContext;
pub use delimiters::Delimiters;
pub use engine::PlaceholderEngine;
pub use error::{DelimiterError, ResolutionError, ResolutionErrorKind};
pub use helper::PlaceholderHelper;
pub use resolver::{ChainResolver, PlaceholderResolver};
pub use segment::{ParsedValue, Segment};
pub use system::{SystemPlaceholders, SystemPropertyResolver};
