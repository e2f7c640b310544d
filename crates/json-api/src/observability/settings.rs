//! Request middleware settings, fixed at startup.

use std::sync::OnceLock;

use crate::config::ServerConfig;

#[derive(Debug, Clone, Copy)]
pub(super) struct RequestSettings {
    pub(super) slow_request_threshold_ms: u64,
    pub(super) parent_propagation: bool,
}

const DEFAULTS: RequestSettings = RequestSettings {
    slow_request_threshold_ms: 1_000,
    parent_propagation: false,
};

static SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

pub(super) fn apply_runtime_config(config: &ServerConfig) {
    let settings = RequestSettings {
        slow_request_threshold_ms: config.logging.slow_request_threshold_ms,
        parent_propagation: config.telemetry.propagates_parent(),
    };

    if SETTINGS.set(settings).is_err() {
        tracing::warn!("request settings were already applied");
    }
}

pub(super) fn current() -> RequestSettings {
    SETTINGS.get().copied().unwrap_or(DEFAULTS)
}
