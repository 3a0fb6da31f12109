//! Module runtime

use config::{LogFormat, TelemetryConfig};
use telemetry::{init_tracing, init_tracing_json};
use tracing::debug;

/// Initialise the module runtime
pub fn init_runtime(config: &TelemetryConfig) {
    match config.log_format {
        LogFormat::Json => init_tracing_json(&config.log_level),
        LogFormat::Text => init_tracing(&config.log_level),
    }

    debug!(
        log_level = %config.log_level,
        log_format = ?config.log_format,
        "Runtime initialized"
    );
}
