use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid --log-level filter '{filter}': {source}")]
    InvalidFilter {
        filter: String,
        #[source]
        source: ParseError,
    },

    #[error("Logging already initialised: {0}")]
    AlreadyInitialised(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// `RUST_LOG` when set and valid, otherwise the `--log-level` value.
fn log_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(log_level).map_err(|source| TelemetryError::InvalidFilter {
            filter: log_level.to_string(),
            source,
        })
    })
}

/// Route tracing output to stderr; stdout carries only command results.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(log_level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(TelemetryError::AlreadyInitialised)
}
