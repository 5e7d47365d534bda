//! Show how a string is split into placeholder segments.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use super::common::DelimiterArgs;
use crate::config::PlaceholderSettings;
use crate::placeholder::Segment;

/// Arguments for `cfgplate parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Text containing placeholders
    #[arg(value_name = "TEXT")]
    pub text: String,

    #[command(flatten)]
    pub delimiters: DelimiterArgs,
}

#[derive(Serialize)]
struct ParseReport<'a> {
    text: &'a str,
    keys: Vec<String>,
    segments: &'a [Segment],
}

impl ParseCommand {
    /// Print the segment tree as pretty JSON.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn execute(self, settings: PlaceholderSettings) -> Result<()> {
        println!("{}", self.run(settings)?);
        Ok(())
    }

    /// The segment tree as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the delimiters are invalid.
    pub fn run(&self, settings: PlaceholderSettings) -> Result<String> {
        let engine = self.delimiters.engine(settings, false)?;
        let parsed = engine.parse(&self.text);
        let report = ParseReport {
            text: parsed.text(),
            keys: parsed.placeholder_keys(),
            segments: parsed.segments(),
        };
        serde_json::to_string_pretty(&report).context("Failed to serialize parse result")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> serde_json::Value {
        let cmd = ParseCommand {
            text: text.to_string(),
            delimiters: DelimiterArgs::default(),
        };
        serde_json::from_str(&cmd.run(PlaceholderSettings::default()).unwrap()).unwrap()
    }

    #[test]
    fn test_simple_placeholder_report() {
        let report = run("Hello #{name:Guest}!");

        assert_eq!(report["text"], "Hello #{name:Guest}!");
        assert_eq!(report["keys"], serde_json::json!(["name"]));
        assert_eq!(report["segments"][0]["kind"], "literal");
        assert_eq!(report["segments"][1]["kind"], "simple");
        assert_eq!(report["segments"][1]["key"], "name");
        assert_eq!(report["segments"][1]["fallback"], "Guest");
    }

    #[test]
    fn test_nested_placeholder_report() {
        let report = run("#{#{env}.host}");
        let segment = &report["segments"][0];

        assert_eq!(segment["kind"], "nested");
        assert_eq!(segment["text"], "#{env}.host");
        assert_eq!(segment["key"][0]["key"], "env");
        assert_eq!(segment["key"][1]["text"], ".host");
        assert!(segment.get("fallback").is_none());
    }
}
