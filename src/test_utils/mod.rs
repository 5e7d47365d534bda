//! Test helpers shared by unit and integration tests.
//!
//! Enabled for the crate's own tests and, through the `test-utils` feature,
//! for the integration test target.

use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::properties::PropertyMap;

static INIT_LOGGING: Once = Once::new();

/// Install a test-writer subscriber once per process.
///
/// With `level` set that level is used; otherwise `RUST_LOG` is honored, and
/// without either nothing is installed.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Write `content` to `dir/name` and return the path.
///
/// # Panics
///
/// Panics if the file cannot be written.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content)
        .unwrap_or_else(|e| panic!("Failed to write test file {}: {e}", path.display()));
    path
}

/// A [`PropertyMap`] from literal pairs.
pub fn property_map(pairs: &[(&str, &str)]) -> PropertyMap {
    pairs.iter().copied().collect()
}
