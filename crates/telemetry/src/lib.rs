//! Logging bootstrap for the library catalog.

use library_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the event filter: `RUST_LOG` wins over the configured directive.
fn filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter))
}

/// Install the global tracing subscriber.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(filter(settings));

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| anyhow::anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::info!(
        target: "library-telemetry",
        format = ?settings.log_format,
        filter = %settings.filter,
        "telemetry initialized"
    );
    Ok(())
}
