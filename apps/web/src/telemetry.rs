//! Telemetry initialization - tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,yatube_web=debug,yatube_infra=debug";

/// Telemetry configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Enable JSON logging (for production).
    pub json_logs: bool,
    /// Service name attached to the startup event.
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            service_name: "yatube".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Load configuration from `LOG_FORMAT` and `OTEL_SERVICE_NAME`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            json_logs: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),
            service_name: std::env::var("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),
        }
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );
}
