//! cfgplate CLI entry point
//!
//! Parses arguments, runs the selected subcommand and prints a
//! user-friendly error with exit status 1 on failure.

use anyhow::Result;
use cfgplate::cli;
use cfgplate::core::user_friendly_error;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
