//! Resolve every value of a property file against the file itself.
//!
//! ```bash
//! cfgplate render app.yaml
//! cfgplate render app.toml --env --format json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use super::common::{DelimiterArgs, with_key_suggestions};
use crate::config::PlaceholderSettings;
use crate::core::CfgplateError;
use crate::placeholder::{ChainResolver, SystemPropertyResolver};
use crate::properties::PropertyMap;

/// Output format for `cfgplate render`.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `key=value` lines sorted by key
    #[default]
    Properties,
    /// A flat JSON object
    Json,
}

/// Arguments for `cfgplate render`.
#[derive(Args, Debug, Clone)]
pub struct RenderCommand {
    /// Property file (JSON, YAML or TOML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Fall back to system properties and environment variables
    #[arg(long)]
    pub env: bool,

    /// Leave unresolvable placeholders in place
    #[arg(long)]
    pub lenient: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Properties)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub delimiters: DelimiterArgs,
}

impl RenderCommand {
    /// Render and print.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub async fn execute(self, settings: PlaceholderSettings) -> Result<()> {
        let rendered = self.run(settings).await?;
        println!("{rendered}");
        Ok(())
    }

    /// Render to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded, the delimiters are
    /// invalid, or a value cannot be resolved.
    pub async fn run(&self, settings: PlaceholderSettings) -> Result<String> {
        let engine = self.delimiters.engine(settings, self.lenient)?;
        let properties = PropertyMap::load(&self.file).await.map_err(CfgplateError::from)?;

        let mut resolver = ChainResolver::new().with(&properties);
        if self.env {
            resolver.push(&SystemPropertyResolver);
        }

        let resolved = properties
            .resolve_values_with(&engine, &resolver)
            .map_err(|error| with_key_suggestions(CfgplateError::from(error), &properties))?;

        match self.format {
            OutputFormat::Properties => Ok(resolved
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => {
                serde_json::to_string_pretty(&resolved).context("Failed to serialize rendered properties")
            }
        }
    }
}
