//! Integration test suite for cfgplate
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **scenarios**: Placeholder resolution through the public library API
//! - **properties**: Property files loaded from disk and resolved in place
//! - **cli**: The `cfgplate` binary end to end

mod cli;
mod properties;
mod scenarios;
