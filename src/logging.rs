//! Tracing subscriber setup shared by the binaries.

use std::env;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` (default `info`). Set `LOG_FORMAT=json`
/// for JSON lines instead of human-readable output. Calling this more than
/// once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let result = if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already initialized");
    }
}
