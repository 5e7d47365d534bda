//! Configuration for cfgplate.
//!
//! A single optional TOML file selects the placeholder syntax used by the
//! command-line tool. It is looked up in this order:
//!
//! 1. The `--config` command-line option
//! 2. The `CFGPLATE_CONFIG_PATH` environment variable
//! 3. `~/.cfgplate/config.toml` (`%LOCALAPPDATA%\cfgplate\config.toml` on Windows)
//!
//! A missing file is not an error; the defaults are the system-property
//! convention (`#{`, `}`, `:`, `\`, strict).
//!
//! ```toml
//! prefix = "#{"
//! suffix = "}"
//! separator = ":"
//! escape = "\\"
//! ignore_unresolvable = false
//! ```
//!
//! Command-line delimiter options are layered over the loaded settings.

pub mod settings;

pub use settings::{CONFIG_PATH_ENV, PlaceholderSettings};
