//! Setup logging subsystem.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::config::{Log, LogFormat};

/// Installs the global subscriber. Keep the returned guard alive until exit
/// so buffered lines get flushed.
#[allow(clippy::print_stderr)]
pub fn setup(
    config: &Log,
    service_name: &str,
    crates_to_filter: impl AsRef<[&'static str]>,
) -> Option<WorkerGuard> {
    if !config.console.enabled {
        return None;
    }

    let (writer, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::try_new(console_directive(config, crates_to_filter.as_ref()))
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::WARN.as_str()));

    let result = match config.console.log_format {
        LogFormat::Default => tracing_subscriber::registry()
            .with(fmt::layer().with_writer(writer).with_filter(filter))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(writer)
                    .with_filter(filter),
            )
            .try_init(),
    };

    if let Err(error) = result {
        eprintln!("Logger was already initialised: {error}");
    }
    tracing::debug!(service = service_name, "logger initialised");

    Some(guard)
}

/// The configured directive, or `warn` for everything except our own crates
/// which log at the configured level.
fn console_directive(config: &Log, crates_to_filter: &[&'static str]) -> String {
    if let Some(directive) = config
        .console
        .filtering_directive
        .as_deref()
        .filter(|directive| !directive.trim().is_empty())
    {
        return directive.to_string();
    }

    let level = config.console.level.directive();
    std::iter::once(tracing::Level::WARN.as_str().to_lowercase())
        .chain(
            crates_to_filter
                .iter()
                .map(|crate_name| format!("{}={level}", crate_name.replace('-', "_"))),
        )
        .collect::<Vec<_>>()
        .join(",")
}
