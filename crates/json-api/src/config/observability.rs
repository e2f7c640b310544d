//! Logging and telemetry settings.
//!
//! Environment variable names follow the OpenTelemetry SDK conventions so a
//! collector sidecar can be configured the same way as any other service.

use std::time::Duration;

use clap::Args;

/// Log line format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// One line per event, for terminals.
    Compact,

    /// One JSON object per event, for log shippers.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Requests slower than this are logged at `warn`.
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}

/// OpenTelemetry trace export settings.
#[derive(Debug, Args)]
pub struct TelemetryConfig {
    /// Export traces over OTLP.
    #[arg(long = "otel-enabled", env = "OTEL_ENABLED", default_value_t = false)]
    pub enabled: bool,

    /// Continue traces from incoming `traceparent` headers.
    #[arg(
        long = "otel-parent-propagation",
        env = "OTEL_PARENT_PROPAGATION_ENABLED",
        default_value_t = false
    )]
    pub parent_propagation: bool,

    /// OTLP gRPC collector endpoint.
    #[arg(
        long = "otel-endpoint",
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub endpoint: String,

    /// Seconds to wait on the collector before dropping a batch.
    #[arg(
        long = "otel-timeout-seconds",
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3_u64
    )]
    pub timeout_seconds: u64,

    /// Reported as `service.name`.
    #[arg(long = "otel-service-name", env = "OTEL_SERVICE_NAME", default_value = "dazzle-json")]
    pub service_name: String,

    /// Reported as `service.version`.
    #[arg(
        long = "otel-service-version",
        env = "OTEL_SERVICE_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub service_version: String,

    /// Reported as `deployment.environment.name`.
    #[arg(
        long = "otel-environment",
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub environment: String,

    /// Fraction of new root traces to keep, clamped to [0.0, 1.0].
    #[arg(long = "otel-sample-ratio", env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0_f64)]
    pub sample_ratio: f64,
}

impl TelemetryConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Parent contexts are only honoured while export is on.
    #[must_use]
    pub fn propagates_parent(&self) -> bool {
        self.enabled && self.parent_propagation
    }
}
