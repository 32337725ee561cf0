//! Console subscriber for the `tracing` events this crate emits.

use super::error::LogError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a formatted console subscriber as the global default.
///
/// `RUST_LOG` takes precedence over `default_filter` (e.g. `"statecraft=debug"`).
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_console(default_filter: &str) -> Result<(), LogError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .map_err(|e| LogError::Subscriber(e.to_string()))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LogError::Subscriber(e.to_string()))
}
