//! Tracing subscriber setup.

use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable selecting the log format (`json` or `text`).
pub const LOG_FORMAT_VAR: &str = "HERALD_LOG_FORMAT";

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Filter used when `RUST_LOG` is unset (e.g. "info", "debug")
    pub log_level: String,
    /// Emit JSON lines instead of human-readable text
    pub json_logs: bool,
}

impl ObservabilityConfig {
    /// Configuration from the environment, with `verbose` raising the
    /// default level to debug.
    pub fn from_env(verbose: bool) -> Self {
        let log_level = if verbose { "debug" } else { "info" };
        Self {
            log_level: log_level.to_string(),
            json_logs: env::var(LOG_FORMAT_VAR)
                .map(|format| format.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }

    /// Filter honouring `RUST_LOG`, falling back to the configured level.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_level))
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_observability(
    config: &ObservabilityConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = tracing_subscriber::registry().with(config.filter());
    if config.json_logs {
        registry.with(fmt::layer().json().with_target(true)).try_init()?;
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()?;
    }
    Ok(())
}
