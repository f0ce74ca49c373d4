//! Tracing setup for the backend.
//!
//! Emits bunyan-formatted JSON lines so the hosting layer can ship logs
//! without reparsing. Filtering is controlled through `RUST_LOG`.

use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Installs the global tracing subscriber.
///
/// Safe to call once per process; subsequent calls are ignored so tests
/// that initialize telemetry do not panic.
pub fn init_telemetry(name: &str, default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let formatting_layer = BunyanFormattingLayer::new(name.to_string(), std::io::stdout);

    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);

    // Ignored if a subscriber is already installed (e.g. by a test harness).
    let _ = set_global_default(subscriber);
}
