//! Tracing subscriber setup.

use super::exporter::{file_tracer_provider, SCOPE};
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// Installs the global subscriber: an [`EnvFilter`] built from
/// `config.trace_level` (default `info`) feeding an OpenTelemetry layer that
/// exports to [`paths::trace_file`].
///
/// Tracing is optional. If the data directory cannot be created, or a
/// subscriber is already installed, this returns without doing anything.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_LEVEL);

    if std::fs::create_dir_all(paths::data_dir()).is_err() {
        return;
    }

    let provider = file_tracer_provider(paths::trace_file(), resource());
    let _ = subscriber(level, &provider).try_init();
}

fn resource() -> Resource {
    Resource::new(vec![KeyValue::new("service.name", SCOPE)])
}

/// Filter plus OpenTelemetry layer over `provider`. Unparseable levels fall
/// back to `info`.
fn subscriber(level: &str, provider: &TracerProvider) -> impl tracing::Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));
    tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(provider.tracer(SCOPE)))
}

/// Runs `f` under the plugin's subscriber stack at `level`, exporting to a
/// scratch file, and returns the exported OTLP lines.
#[cfg(test)]
pub(crate) fn traced(level: &str, f: impl FnOnce()) -> String {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trace.json");
    let provider = file_tracer_provider(path.clone(), resource());

    tracing::subscriber::with_default(subscriber(level, &provider), f);
    std::fs::read_to_string(path).unwrap_or_default()
}
