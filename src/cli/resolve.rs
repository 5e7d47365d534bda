//! Resolve placeholders in a string.
//!
//! Values come from, in order of precedence:
//!
//! 1. `-D/--set KEY=VALUE` assignments
//! 2. `-p/--properties FILE` files (later files win)
//! 3. System properties and environment variables, with `--env`
//!
//! ```bash
//! cfgplate resolve 'jdbc:#{db.url}' -p app.yaml -D db.host=localhost
//! cfgplate resolve 'home is #{HOME}' --env
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::common::{DelimiterArgs, parse_assignment, with_key_suggestions};
use crate::config::PlaceholderSettings;
use crate::core::CfgplateError;
use crate::placeholder::{ChainResolver, SystemPropertyResolver};
use crate::properties::PropertyMap;

/// Arguments for `cfgplate resolve`.
#[derive(Args, Debug, Clone)]
pub struct ResolveCommand {
    /// Text containing placeholders
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Property file (JSON, YAML or TOML); may be repeated
    #[arg(short = 'p', long = "properties", value_name = "FILE")]
    pub properties: Vec<PathBuf>,

    /// Property assignment; may be repeated
    #[arg(short = 'D', long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// Fall back to system properties and environment variables
    #[arg(long)]
    pub env: bool,

    /// Leave unresolvable placeholders in place
    #[arg(long)]
    pub lenient: bool,

    #[command(flatten)]
    pub delimiters: DelimiterArgs,
}

impl ResolveCommand {
    /// Resolve and print the result.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub async fn execute(self, settings: PlaceholderSettings) -> Result<()> {
        let resolved = self.run(settings).await?;
        println!("{resolved}");
        Ok(())
    }

    /// Resolve and return the result.
    ///
    /// # Errors
    ///
    /// Returns an error if an assignment is malformed, a property file cannot
    /// be loaded, the delimiters are invalid, or a placeholder cannot be
    /// resolved.
    pub async fn run(&self, settings: PlaceholderSettings) -> Result<String> {
        let engine = self.delimiters.engine(settings, self.lenient)?;
        let properties = self.load_properties().await?;

        let mut resolver = ChainResolver::new().with(&properties);
        if self.env {
            resolver.push(&SystemPropertyResolver);
        }
        tracing::debug!("Resolving with {} properties (environment: {})", properties.len(), self.env);

        engine
            .resolve(&self.text, &resolver)
            .map_err(|error| with_key_suggestions(CfgplateError::from(error), &properties))
    }

    /// Property files merged in order, then the assignments on top.
    async fn load_properties(&self) -> Result<PropertyMap> {
        let mut properties = PropertyMap::new();
        for path in &self.properties {
            properties.merge(PropertyMap::load(path).await.map_err(CfgplateError::from)?);
        }
        for assignment in &self.set {
            let (key, value) = parse_assignment(assignment)?;
            properties.insert(key, value);
        }
        Ok(properties)
    }
}
