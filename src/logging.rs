//! Process-level tracing setup for the binary.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
pub const LOG_ENV_VAR: &str = "ENGINE_PROVIDER_LOG";

/// Filter applied when [`LOG_ENV_VAR`] is unset or invalid.
const DEFAULT_FILTER: &str = "info";

static INIT: OnceLock<()> = OnceLock::new();

/// Builds the filter from `directive`, falling back to [`DEFAULT_FILTER`].
fn build_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialise tracing output to stderr from [`LOG_ENV_VAR`].
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init() {
    INIT.get_or_init(|| {
        let directive = std::env::var(LOG_ENV_VAR).ok();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(build_filter(directive.as_deref()))
            .with_target(false)
            .with_writer(std::io::stderr);
        // Another subscriber may already be installed by an embedding process.
        if subscriber.try_init().is_err() {
            tracing::debug!("tracing subscriber already installed");
        }
    });
}
