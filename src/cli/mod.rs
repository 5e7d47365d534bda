//! Command-line interface for cfgplate.
//!
//! # Available Commands
//!
//! - `resolve` - Resolve placeholders in a string against property files,
//!   `-D` assignments and optionally the environment
//! - `parse` - Print the segment tree of a string as JSON
//! - `render` - Resolve every value of a property file against the file itself
//!
//! # Global Options
//!
//! - `-v/--verbose` - Debug logging on stderr
//! - `-q/--quiet` - No logging
//! - `-c/--config` - Settings file instead of `~/.cfgplate/config.toml`
//!
//! ```bash
//! cfgplate resolve 'Hello #{user:World}'
//! cfgplate -v render app.yaml --format json
//! cfgplate --config ./settings.toml parse '${a:-b}'
//! ```
//!
//! Every subcommand also accepts `--prefix`, `--suffix`, `--separator` and
//! `--escape`, which take precedence over the settings file.
//!
//! Results go to stdout; logs and errors go to stderr. Any failure exits with
//! status 1 after printing an [`ErrorContext`](crate::core::ErrorContext).

mod common;
pub mod parse;
pub mod render;
pub mod resolve;


use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::PlaceholderSettings;

pub use common::DelimiterArgs;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests can drive
/// [`Cli::execute_with_config`] without going through flag parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// `tracing` filter directive; `None` disables logging.
    pub log_level: Option<String>,

    /// Settings file overriding the default location.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a stderr subscriber for `log_level`.
    ///
    /// Does nothing when logging is disabled or a subscriber is already set.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };
        let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Top-level command line.
#[derive(Parser, Debug)]
#[command(
    name = "cfgplate",
    about = "Resolve #{...} placeholders in strings and property files",
    version,
    author,
    long_about = "cfgplate substitutes #{key:fallback} placeholders with values from property files, \
                  command-line assignments, system properties and environment variables."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the settings file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve placeholders in a string
    Resolve(resolve::ResolveCommand),

    /// Show how a string is split into placeholder segments
    Parse(parse::ParseCommand),

    /// Resolve every value of a property file
    Render(render::RenderCommand),
}

impl Cli {
    /// Run the selected subcommand with a configuration built from the flags.
    ///
    /// # Errors
    ///
    /// Returns whatever the subcommand or settings loading returns.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    ///
    /// `--verbose` maps to `debug` and `--quiet` disables logging; otherwise
    /// `RUST_LOG` is honored, falling back to `warn`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some(std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string()))
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Run the selected subcommand with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be loaded or the
    /// subcommand fails.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let settings = PlaceholderSettings::load_with_optional(config.config_path).await?;
        tracing::debug!("Loaded placeholder settings: {settings:?}");

        match self.command {
            Commands::Resolve(cmd) => cmd.execute(settings).await,
            Commands::Parse(cmd) => cmd.execute(settings),
            Commands::Render(cmd) => cmd.execute(settings).await,
        }
    }
}
