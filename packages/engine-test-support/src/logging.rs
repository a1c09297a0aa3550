//! Test logging bootstrap shared by the engine's unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Quiet unless asked: round logs are chatty at `debug`.
const DEFAULT_DIRECTIVE: &str = "warn";

/// `TEST_LOG`, then `RUST_LOG`, then [`DEFAULT_DIRECTIVE`].
fn test_filter() -> EnvFilter {
    ["TEST_LOG", "RUST_LOG"]
        .iter()
        .find_map(|key| std::env::var(key).ok())
        .map(EnvFilter::new)
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the test subscriber once per process. Safe to call from every
/// test binary's `ctor` hook.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        fmt()
            .with_env_filter(test_filter())
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init()
            .ok();
    });
}
